use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::inventory::{components::Slot, events::InventoryNotice, observation::SubscriberId};

/// 每个格子在世界中的实时位置，随 HUD 每帧重新计算
#[derive(Resource, Debug, Clone, Default)]
pub struct SlotAnchors {
    pub origin: Vec2,
    pub positions: Vec<Vec2>,
}

impl SlotAnchors {
    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.positions.get(index).copied()
    }
}

/// 某格在界面上的样子
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub name: String,
    pub quantity: u32,
    pub tint: [f32; 4],
}

impl From<&Slot> for SlotView {
    fn from(slot: &Slot) -> Self {
        Self {
            name: slot.name.clone(),
            quantity: slot.quantity,
            tint: slot.tint,
        }
    }
}

/// 界面上"看得到"的背包，只随通知刷新
#[derive(Resource, Debug, Clone, Default)]
pub struct InventoryView {
    pub slots: Vec<Option<SlotView>>,
}

impl InventoryView {
    pub fn get(&self, index: usize) -> Option<&SlotView> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// 重新从背包读取一格
    pub fn refresh(&mut self, index: usize, slot: Option<&Slot>) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = slot.filter(|s| !s.is_empty()).map(SlotView::from);
    }
}

/// 订阅回调写入、显示系统每帧取出的通知队列
#[derive(Resource, Clone, Default)]
pub struct NoticeInbox(pub Arc<Mutex<VecDeque<InventoryNotice>>>);

/// 界面在背包通知通道上的订阅句柄
#[derive(Resource, Debug, Default)]
pub struct ViewSubscription(pub Option<SubscriberId>);

/// "背包已满"飘字：上浮后消失
#[derive(Component, Debug)]
pub struct FloatingMessage {
    pub text: String,
    pub timer: Timer,
    pub rise_speed: f32,
}

impl FloatingMessage {
    pub fn inventory_full() -> Self {
        Self {
            text: "Inventory Full".into(),
            timer: Timer::from_seconds(1.5, TimerMode::Once),
            rise_speed: 0.5,
        }
    }
}
