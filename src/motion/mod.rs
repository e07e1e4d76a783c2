pub mod arc;
pub mod components;
mod systems;

use bevy::prelude::*;
use crate::core::{FrameSet, states::AppState};
use crate::display::components::SlotAnchors;
use systems::*;

/// 某个实体的弧线动画在本帧走完
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcTweenFinished {
    pub entity: Entity,
}

/// 唯一的动画驱动：每帧推进所有 ArcTween
pub struct MotionPlugin;
impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ArcTweenFinished>()
            .init_resource::<SlotAnchors>()
            .add_systems(
                Update,
                advance_arc_tweens
                    .in_set(FrameSet::Motion)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
