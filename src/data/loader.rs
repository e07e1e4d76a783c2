use bevy::asset::{io::Reader, ron, AssetLoader, LoadContext};
use std::collections::HashSet;
use std::future::Future;
use thiserror::Error;

use super::schema::ItemList;
use crate::inventory::components::ItemKind;

/// 物品表 *.items.ron / items.ron 的加载器
#[derive(Default)]
pub struct RonItemLoader;

#[derive(Debug, Error)]
pub enum RonItemLoaderError {
    #[error("读取物品表失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("物品表 RON 格式错误: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("物品表不是合法的 UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("物品 id 重复: {0}")]
    DuplicateId(String),
    #[error("物品 {0} 的 kind 不能是 Empty")]
    EmptyKind(String),
}

/// id 忽略大小写唯一；Empty 只表示空格子，不能出现在物品表里
fn check_entries(list: &ItemList) -> Result<(), RonItemLoaderError> {
    let mut seen = HashSet::new();
    for entry in &list.items {
        if entry.kind == ItemKind::Empty {
            return Err(RonItemLoaderError::EmptyKind(entry.id.clone()));
        }
        if !seen.insert(entry.id.to_lowercase()) {
            return Err(RonItemLoaderError::DuplicateId(entry.id.clone()));
        }
    }
    Ok(())
}

impl AssetLoader for RonItemLoader {
    type Asset = ItemList;
    type Settings = ();
    type Error = RonItemLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl Future<Output = Result<Self::Asset, Self::Error>> + Send {
        let path = load_context.path().display().to_string();
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            let text = std::str::from_utf8(&bytes)?;
            let list: ItemList = ron::de::from_str(text)?;
            check_entries(&list)?;
            bevy::log::debug!("{path}: {} 条物品定义", list.items.len());

            Ok(list)
        }
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}
