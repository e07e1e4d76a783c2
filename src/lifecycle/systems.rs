use super::components::*;
use crate::core::config::LifecycleConfig;
use crate::inventory::{
    error::InventoryError,
    events::{InventoryFull, InventoryNotice, InventoryRequest},
    store::SlotStore,
};
use crate::motion::{ArcTweenFinished, components::ArcTween};
use crate::world::{
    components::{Collectible, Collector, Player, Solid},
    placement::{PlacementRng, SolidGeometry, resolve_throw_target},
    spawn::spawn_world_item,
};
use bevy::prelude::*;

/// 上一帧进入 Reserved / Released 的实体，这一帧挂上弧线动画并进入 Animating
pub fn launch_flights(
    mut commands: Commands,
    config: Res<LifecycleConfig>,
    mut collects: Query<(Entity, &Transform, &CollectFlight, &mut CollectionPhase)>,
    mut throws: Query<(Entity, &Transform, &ThrowFlight, &mut EjectionPhase)>,
) {
    for (entity, transform, flight, mut phase) in &mut collects {
        if *phase != CollectionPhase::Reserved {
            continue;
        }
        let start = transform.translation.truncate();
        commands
            .entity(entity)
            .insert(ArcTween::collect(start, flight.slot, &config));
        *phase = CollectionPhase::Animating;
        debug!("{} 飞向格子 {}", flight.name, flight.slot);
    }

    for (entity, transform, flight, mut phase) in &mut throws {
        if *phase != EjectionPhase::Released {
            continue;
        }
        let start = transform.translation.truncate();
        commands
            .entity(entity)
            .insert(ArcTween::throw(start, flight.landing, &config));
        *phase = EjectionPhase::Animating;
        debug!("格子 {} 的物品抛向 {}", flight.slot, flight.landing);
    }
}

/// 按发出顺序处理收集 / 丢弃 / 交换请求
///
/// 背包的修改在这里立即生效；收集的 ItemAdded 留到动画结束再发，丢弃和交换的通知当场发出。
pub fn process_inventory_requests(
    mut commands: Commands,
    mut requests: EventReader<InventoryRequest>,
    mut store: ResMut<SlotStore>,
    mut pending: ResMut<PendingCommits>,
    mut rng: ResMut<PlacementRng>,
    config: Res<LifecycleConfig>,
    mut items: Query<(
        &mut Collectible,
        &mut CollectionPhase,
        Option<&EjectionPhase>,
        Has<ArcTween>,
    )>,
    collectors: Query<&Transform, With<Collector>>,
    owners: Query<&Transform, With<Player>>,
    solids: Query<(&Transform, &Solid)>,
    mut full: EventWriter<InventoryFull>,
) {
    for request in requests.read() {
        match *request {
            InventoryRequest::Collect { item, collector } => {
                let Ok(collector_tf) = collectors.get(collector) else {
                    warn!("收集者 {collector} 不存在，忽略拾取请求");
                    continue;
                };
                let Ok((mut collectible, mut phase, ejection, in_flight)) =
                    items.get_mut(item)
                else {
                    warn!("物品 {item} 不存在，忽略拾取请求");
                    continue;
                };
                // 被扔出的物品要等落地（Spawned）才能再捡，免疫先结束也不行
                let thrown_in_air = ejection.is_some_and(|p| *p != EjectionPhase::Spawned);
                if in_flight || thrown_in_air {
                    debug!("{} 仍在飞行，拒绝拾取", collectible.descriptor.name);
                    continue;
                }
                if !collectible.is_collectible() || *phase != CollectionPhase::Idle {
                    debug!("{} 当前不可拾取 ({:?})", collectible.descriptor.name, *phase);
                    continue;
                }

                let name = collectible.descriptor.name.clone();
                match store.add(&collectible.descriptor) {
                    Ok(slot) => {
                        collectible.mark_collected();
                        *phase = CollectionPhase::Reserved;
                        pending.insert(item, slot);
                        commands.entity(item).insert(CollectFlight {
                            slot,
                            name: name.clone(),
                        });
                        info!("拾取 {name} → 格子 {slot}，已预约");
                    }
                    Err(InventoryError::Full) => {
                        info!("背包已满，无法拾取 {name}");
                        full.write(InventoryFull {
                            position: collector_tf.translation.truncate(),
                            item: name,
                        });
                    }
                    Err(err) => warn!("拾取 {name} 被拒绝: {err}"),
                }
            }

            InventoryRequest::Eject { slot } => {
                let descriptor = match store.get(slot) {
                    None => {
                        let err = InventoryError::IndexOutOfRange {
                            index: slot,
                            len: store.capacity(),
                        };
                        warn!("无法丢弃: {err}");
                        continue;
                    }
                    Some(s) => s.descriptor(),
                };
                let Some(descriptor) = descriptor else {
                    info!("无法丢弃: {}", InventoryError::EmptySlot(slot));
                    continue;
                };
                let Ok(owner) = owners.single() else {
                    warn!("找不到玩家，无法丢弃格子 {slot}");
                    continue;
                };

                let origin = owner.translation.truncate();
                let geometry = SolidGeometry::from_solids(&solids);
                let landing = resolve_throw_target(origin, &config, &geometry, &mut rng.0);

                let name = descriptor.name.clone();
                let entity = spawn_world_item(
                    &mut commands,
                    descriptor,
                    origin,
                    config.collection_immunity,
                    config.item_radius,
                );

                if let Err(err) = store.remove(slot) {
                    warn!("清空格子失败: {err}");
                    commands.entity(entity).despawn();
                    continue;
                }
                // 空格子不存在"半真"状态，立即可见
                store.notify(InventoryNotice::ItemRemoved { slot });
                commands
                    .entity(entity)
                    .insert((ThrowFlight { slot, landing }, EjectionPhase::Released));
                info!("丢弃格子 {slot} 的 {name} → {landing}");
            }

            InventoryRequest::Move { from, to } => match store.move_item(from, to) {
                Ok(()) => store.notify(InventoryNotice::ItemMoved { from, to }),
                Err(err) => warn!("无法交换格子 {from} ↔ {to}: {err}"),
            },
        }
    }
}

/// 飞行结束：先发 ItemAdded，再销毁世界物品
pub fn commit_collections(
    mut commands: Commands,
    mut finished: EventReader<ArcTweenFinished>,
    store: Res<SlotStore>,
    mut pending: ResMut<PendingCommits>,
    mut flights: Query<(&CollectFlight, &mut CollectionPhase)>,
) {
    for ev in finished.read() {
        let Ok((flight, mut phase)) = flights.get_mut(ev.entity) else {
            continue;
        };

        store.notify(InventoryNotice::ItemAdded {
            name: flight.name.clone(),
            slot: flight.slot,
        });
        *phase = CollectionPhase::Committed;
        pending.remove(ev.entity);
        commands.entity(ev.entity).despawn();
        debug!("{} 已提交到格子 {}", flight.name, flight.slot);
    }
}

/// 抛物落地：恢复缩放并移除动画，之后等免疫结束即可再次拾取
pub fn settle_thrown_items(
    mut commands: Commands,
    mut finished: EventReader<ArcTweenFinished>,
    mut flights: Query<(&ThrowFlight, &mut Transform, &mut EjectionPhase)>,
) {
    for ev in finished.read() {
        let Ok((flight, mut transform, mut phase)) = flights.get_mut(ev.entity) else {
            continue;
        };

        transform.scale = Vec3::ONE;
        *phase = EjectionPhase::Spawned;
        commands.entity(ev.entity).remove::<(ArcTween, ThrowFlight)>();
        debug!("格子 {} 的物品落地于 {}", flight.slot, flight.landing);
    }
}

/// 飞行途中实体被外部销毁：格子保持已写入状态，不补发通知，也不回滚
pub fn audit_orphaned_flights(
    mut pending: ResMut<PendingCommits>,
    flights: Query<(), With<CollectFlight>>,
) {
    pending.retain(|entity, slot| {
        if flights.contains(entity) {
            return true;
        }
        warn!("飞向格子 {slot} 的物品 {entity} 在提交前消失，格子内容保留但未通知显示层");
        false
    });
}
