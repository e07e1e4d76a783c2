pub mod schema;
pub mod loader;

use bevy::asset::LoadState;
use bevy::prelude::*;
use schema::ItemList;
use crate::core::states::AppState;

pub const CATALOG_PATH: &str = "data/items.ron";

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    pub handle: Option<Handle<ItemList>>,
}

impl ItemAssets {
    pub fn list<'a>(&self, lists: &'a Assets<ItemList>) -> Option<&'a ItemList> {
        self.handle.as_ref().and_then(|h| lists.get(h))
    }
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .register_asset_loader(loader::RonItemLoader)
            .init_resource::<ItemAssets>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut item_assets: ResMut<ItemAssets>,
    asset_server: Res<AssetServer>,
) {
    let handle: Handle<ItemList> = asset_server.load(CATALOG_PATH);
    item_assets.handle = Some(handle);
}

/// 物品表就绪（或加载失败）后进入游戏；失败时场景退回内置金币
fn check_loaded(
    mut next: ResMut<NextState<AppState>>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
    asset_server: Res<AssetServer>,
) {
    let Some(h) = &item_assets.handle else {
        return;
    };

    if let Some(list) = lists.get(h) {
        info!("✔ Items loaded: {}", list.items.len());
        next.set(AppState::InGame);
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(h) {
        warn!("物品表 {CATALOG_PATH} 加载失败: {err}");
        next.set(AppState::InGame);
    }
}
