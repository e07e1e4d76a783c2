use bevy::prelude::*;

use super::components::{Collectible, ITEM_Z};
use crate::inventory::components::PickupDescriptor;

/// 在世界中生成一个可拾取物品，返回的实体同时作为动画的宿主
pub fn spawn_world_item(
    commands: &mut Commands,
    descriptor: PickupDescriptor,
    position: Vec2,
    immunity: f32,
    radius: f32,
) -> Entity {
    debug!("生成世界物品 {} @ {position} (免疫 {immunity}s)", descriptor.name);
    commands
        .spawn((
            Name::new(descriptor.name.clone()),
            Collectible::new(descriptor, radius).with_immunity(immunity),
            Transform::from_translation(position.extend(ITEM_Z)),
        ))
        .id()
}
