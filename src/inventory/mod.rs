pub mod components;
pub mod error;
pub mod events;
pub mod observation;
pub mod store;

use bevy::prelude::*;
use crate::core::config::LifecycleConfig;
use events::*;
use store::SlotStore;

/// 背包插件：按配置的格数建好 SlotStore，并注册请求 / 已满事件
pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app
            .world()
            .get_resource::<LifecycleConfig>()
            .map_or_else(|| LifecycleConfig::default().slot_count, |c| c.slot_count);

        app.insert_resource(SlotStore::new(capacity))
            .add_event::<InventoryRequest>()
            .add_event::<InventoryFull>();
    }
}
