use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::Deserialize;

use crate::inventory::components::{ItemKind, NO_TINT, PickupDescriptor};

fn default_tint() -> [f32; 4] {
    NO_TINT
}

fn default_max_stack() -> u32 {
    1
}

/// items.ron 里的一条静态物品定义
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub id:   String,
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)] pub icon: String,
    #[serde(default = "default_tint")] pub tint: [f32; 4],
    #[serde(default)] pub stackable: bool,
    #[serde(default = "default_max_stack")] pub max_stack: u32,
    #[serde(default)] pub description: String,
}

impl ItemEntry {
    /// 物品表缺失时的内置金币
    pub fn gold_coin() -> Self {
        Self {
            id: "gold_coin".into(),
            kind: ItemKind::GoldCoin,
            name: "Gold Coin".into(),
            icon: "sprites/circle.png".into(),
            tint: [1.0, 0.84, 0.0, 1.0],
            stackable: false,
            max_stack: 1,
            description: "everybody loves me".into(),
        }
    }

    pub fn descriptor(&self) -> PickupDescriptor {
        PickupDescriptor::new(
            self.kind,
            self.name.clone(),
            self.icon.clone(),
            self.tint,
            self.stackable,
            self.max_stack,
        )
    }
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemEntry>,
}

impl ItemList {
    /// 按 id 或名称查找（忽略大小写）
    pub fn find(&self, token: &str) -> Option<&ItemEntry> {
        self.items
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(token) || e.name.eq_ignore_ascii_case(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::ron;

    #[test]
    fn parses_catalog_with_defaults() {
        let list: ItemList = ron::de::from_str(
            r#"(
                items: [
                    (id: "kitten", kind: Kitten, name: "Kitten"),
                    (id: "football", kind: Football, name: "Football",
                     tint: (0.2, 0.2, 0.2, 1.0), stackable: true, max_stack: 3),
                ],
            )"#,
        )
        .unwrap();

        let kitten = list.find("KITTEN").unwrap();
        assert_eq!(kitten.tint, NO_TINT);
        assert_eq!(kitten.max_stack, 1);

        let ball = list.find("Football").unwrap().descriptor();
        assert!(ball.stackable);
        assert_eq!(ball.max_stack, 3);
    }

    #[test]
    fn non_stackable_entry_forces_single_stack() {
        let mut entry = ItemEntry::gold_coin();
        entry.max_stack = 99;
        assert_eq!(entry.descriptor().max_stack, 1);
    }
}
