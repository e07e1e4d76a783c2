pub mod components;
pub mod placement;
pub mod scene;
pub mod spawn;
mod systems;

use bevy::prelude::*;
use crate::core::{FrameSet, states::AppState};
use placement::PlacementRng;
use scene::*;
use systems::*;

/// 世界侧协作者：接触检测、拾取免疫、落点随机源
pub struct WorldPlugin;
impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementRng>().add_systems(
            Update,
            (tick_collection_immunity, detect_item_contacts)
                .chain()
                .in_set(FrameSet::World)
                .run_if(in_state(AppState::InGame)),
        );
    }
}

/// 场景搭建：玩家、地板、开局金币
pub struct ScenePlugin;
impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::InGame),
            (spawn_hero, spawn_floor, spawn_coins),
        );
    }
}
