pub mod components;
mod systems;

use bevy::prelude::*;
use crate::core::{FrameSet, events::LogEvent, states::AppState};
use components::*;
use systems::*;

/// 显示侧协作者：HUD 锚点、界面镜像、背包已满提示
pub struct DisplayPlugin;
impl Plugin for DisplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SlotAnchors>()
            .init_resource::<InventoryView>()
            .init_resource::<NoticeInbox>()
            .init_resource::<ViewSubscription>()
            .add_event::<LogEvent>()
            .add_systems(Startup, subscribe_inventory_view)
            .add_systems(OnExit(AppState::InGame), unsubscribe_inventory_view)
            .add_systems(
                Update,
                layout_slot_anchors
                    .in_set(FrameSet::World)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                (refresh_inventory_view, show_inventory_full, float_messages)
                    .in_set(FrameSet::Display)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
