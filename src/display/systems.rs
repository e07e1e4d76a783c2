use super::components::*;
use crate::core::{config::LifecycleConfig, events::LogEvent};
use crate::inventory::{
    events::{InventoryFull, InventoryNotice},
    store::SlotStore,
};
use crate::world::components::Player;
use bevy::prelude::*;

/// 把显示层挂到背包的通知通道上
pub fn subscribe_inventory_view(
    mut store: ResMut<SlotStore>,
    inbox: Res<NoticeInbox>,
    mut view: ResMut<InventoryView>,
    mut subscription: ResMut<ViewSubscription>,
) {
    let queue = inbox.0.clone();
    let id = store.subscribe(move |notice| {
        if let Ok(mut queue) = queue.lock() {
            queue.push_back(notice.clone());
        }
    });
    subscription.0 = Some(id);
    view.slots = vec![None; store.capacity()];
}

/// 离开游戏时退订，之后的通知不再进入界面队列
pub fn unsubscribe_inventory_view(
    mut store: ResMut<SlotStore>,
    mut subscription: ResMut<ViewSubscription>,
) {
    if let Some(id) = subscription.0.take() {
        store.unsubscribe(id);
        debug!("界面已退订背包通知");
    }
}

/// HUD 网格跟随玩家，重新计算每格的世界坐标
pub fn layout_slot_anchors(
    config: Res<LifecycleConfig>,
    store: Res<SlotStore>,
    player: Query<&Transform, With<Player>>,
    mut anchors: ResMut<SlotAnchors>,
) {
    let base = player
        .single()
        .map(|tf| tf.translation.truncate())
        .unwrap_or(Vec2::ZERO);
    let step = config.slot_size + config.slot_spacing;
    let columns = config.grid_columns.max(1);
    // 网格水平居中
    let half_width = (columns - 1) as f32 * step / 2.0;

    anchors.origin = base + config.hud_offset();
    let origin = anchors.origin;
    anchors.positions = (0..store.capacity())
        .map(|i| {
            let (row, col) = (i / columns, i % columns);
            origin + Vec2::new(col as f32 * step - half_width, -(row as f32) * step)
        })
        .collect();
}

/// 取出本帧收到的通知：重新查询背包刷新界面，并打一行日志
pub fn refresh_inventory_view(
    inbox: Res<NoticeInbox>,
    store: Res<SlotStore>,
    mut view: ResMut<InventoryView>,
    mut log: EventWriter<LogEvent>,
) {
    let drained: Vec<InventoryNotice> = match inbox.0.lock() {
        Ok(mut queue) => queue.drain(..).collect(),
        Err(_) => return,
    };

    for notice in drained {
        match notice {
            InventoryNotice::ItemAdded { name, slot } => {
                view.refresh(slot, store.get(slot));
                let qty = store.get(slot).map_or(0, |s| s.quantity);
                log.write(LogEvent(format!("获得 {name} → [{slot}] ×{qty}")));
            }
            InventoryNotice::ItemMoved { from, to } => {
                view.refresh(from, store.get(from));
                view.refresh(to, store.get(to));
                log.write(LogEvent(format!("交换 [{from}] ↔ [{to}]")));
            }
            InventoryNotice::ItemRemoved { slot } => {
                view.refresh(slot, None);
                log.write(LogEvent(format!("[{slot}] 已清空")));
            }
        }
    }
}

pub fn show_inventory_full(
    mut commands: Commands,
    mut events: EventReader<InventoryFull>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in events.read() {
        let message = FloatingMessage::inventory_full();
        log.write(LogEvent(format!("{}：{} 没能放进背包", message.text, ev.item)));
        commands.spawn((
            Name::new("InventoryFullMessage"),
            message,
            Transform::from_translation(ev.position.extend(100.0)),
        ));
    }
}

pub fn float_messages(
    mut commands: Commands,
    time: Res<Time>,
    mut messages: Query<(Entity, &mut FloatingMessage, &mut Transform)>,
) {
    for (entity, mut message, mut transform) in &mut messages {
        message.timer.tick(time.delta());
        transform.translation.y += message.rise_speed * time.delta_secs();
        if message.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}
