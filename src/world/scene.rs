use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use super::components::*;
use super::spawn::spawn_world_item;
use crate::core::config::LifecycleConfig;
use crate::data::{ItemAssets, schema::{ItemEntry, ItemList}};
use crate::inventory::components::ItemKind;

/// 进入游戏时生成玩家
pub fn spawn_hero(mut commands: Commands, config: Res<LifecycleConfig>) {
    commands.spawn((
        Name::new("Hero"),
        Player,
        Collector {
            radius: config.collector_radius,
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));
}

/// 一整条地板，顶面 y = -1
pub fn spawn_floor(mut commands: Commands) {
    commands.spawn((
        Name::new("Floor"),
        Solid {
            half_extents: Vec2::new(20.0, 0.5),
        },
        Transform::from_xyz(0.0, -1.5, 0.0),
    ));
}

/// 在原点附近的圆内随机撒金币
pub fn spawn_coins(
    mut commands: Commands,
    config: Res<LifecycleConfig>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    let descriptor = item_assets
        .list(&lists)
        .and_then(|list| list.items.iter().find(|e| e.kind == ItemKind::GoldCoin))
        .map(ItemEntry::descriptor)
        .unwrap_or_else(|| {
            warn!("物品表中没有金币，使用内置定义");
            ItemEntry::gold_coin().descriptor()
        });

    let mut rng = rand::thread_rng();
    for _ in 0..config.coin_count {
        let angle = rng.gen_range(0.0..TAU);
        let dist = config.coin_spawn_radius * rng.gen_range(0.0_f32..1.0).sqrt();
        let pos = Vec2::from_angle(angle) * dist;
        spawn_world_item(&mut commands, descriptor.clone(), pos, 0.0, config.item_radius);
    }
    info!("已生成 {} 枚金币", config.coin_count);
}
