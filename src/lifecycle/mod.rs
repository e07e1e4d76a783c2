//! 收集 / 丢弃的编排：背包先改、动画后到、通知最后发

pub mod components;
mod systems;

use bevy::prelude::*;
use crate::core::{FrameSet, states::AppState};
use components::PendingCommits;
use systems::*;

pub struct LifecyclePlugin;
impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingCommits>()
            .add_systems(
                Update,
                (launch_flights, process_inventory_requests)
                    .chain()
                    .in_set(FrameSet::Requests)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                (commit_collections, settle_thrown_items, audit_orphaned_flights)
                    .chain()
                    .in_set(FrameSet::Commit)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

#[cfg(test)]
mod tests;
