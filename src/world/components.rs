use std::time::Duration;

use bevy::prelude::*;

use crate::inventory::components::PickupDescriptor;
use crate::lifecycle::components::CollectionPhase;

/// 世界物品的 z 值，压在地面之上
pub const ITEM_Z: f32 = 5.0;

/// 玩家标记组件；丢弃物品从玩家位置抛出
#[derive(Component)]
pub struct Player;

/// 能拾取物品的一方（圆形范围）
#[derive(Component, Debug, Clone, Copy)]
pub struct Collector {
    pub radius: f32,
}

/// 可拾取的世界物品
#[derive(Component, Debug, Clone)]
#[require(Transform, CollectionPhase)]
pub struct Collectible {
    pub descriptor: PickupDescriptor,
    pub radius: f32,
    collected: bool,
    /// 拾取免疫：刚被扔出的物品在计时结束前不能再被捡起
    immunity: Option<Timer>,
}

impl Collectible {
    pub fn new(descriptor: PickupDescriptor, radius: f32) -> Self {
        Self {
            descriptor,
            radius,
            collected: false,
            immunity: None,
        }
    }

    pub fn with_immunity(mut self, seconds: f32) -> Self {
        self.immunity = (seconds > 0.0).then(|| Timer::from_seconds(seconds, TimerMode::Once));
        self
    }

    pub fn is_immune(&self) -> bool {
        self.immunity.is_some()
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn is_collectible(&self) -> bool {
        !self.collected && !self.is_immune()
    }

    /// 预约成功后立即调用，防止同一帧被第二个收集者再捡一次
    pub fn mark_collected(&mut self) {
        self.collected = true;
    }

    pub fn tick_immunity(&mut self, delta: Duration) {
        if let Some(timer) = &mut self.immunity {
            timer.tick(delta);
            if timer.finished() {
                self.immunity = None;
            }
        }
    }
}

/// 实心地形（轴对齐矩形，以 Transform 为中心）
#[derive(Component, Debug, Clone, Copy)]
#[require(Transform)]
pub struct Solid {
    pub half_extents: Vec2,
}
