use std::collections::HashSet;

use super::components::*;
use crate::inventory::events::InventoryRequest;
use crate::motion::components::ArcTween;
use bevy::prelude::*;

/// 倒计时拾取免疫
pub fn tick_collection_immunity(time: Res<Time>, mut items: Query<&mut Collectible>) {
    for mut item in &mut items {
        if item.is_immune() {
            item.tick_immunity(time.delta());
        }
    }
}

/// 圆形重叠检测，只在"开始接触"的那一帧发出 Collect 请求
///
/// 已经重叠的一对必须先分开才能再次触发，所以扔出的物品不会被同一次重叠立刻捡回。
pub fn detect_item_contacts(
    collectors: Query<(Entity, &Transform, &Collector)>,
    items: Query<(Entity, &Transform, &Collectible, Has<ArcTween>)>,
    mut touching: Local<HashSet<(Entity, Entity)>>,
    mut requests: EventWriter<InventoryRequest>,
) {
    let mut now = HashSet::new();

    for (collector, c_tf, c) in &collectors {
        let c_pos = c_tf.translation.truncate();
        for (item, i_tf, collectible, in_flight) in &items {
            let reach = c.radius + collectible.radius;
            if c_pos.distance_squared(i_tf.translation.truncate()) > reach * reach {
                continue;
            }

            now.insert((collector, item));
            if touching.contains(&(collector, item)) {
                continue;
            }
            if !in_flight && collectible.is_collectible() {
                requests.write(InventoryRequest::Collect { item, collector });
            }
        }
    }

    *touching = now;
}
