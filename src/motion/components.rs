use bevy::prelude::*;

use super::arc::ArcMotion;
use crate::core::config::{Easing, LifecycleConfig};
use crate::display::components::SlotAnchors;

/// 动画终点的位置来源，每帧重新询问一次
pub trait PositionSource: Send + Sync + 'static {
    fn current_position(&self, anchors: &SlotAnchors) -> Vec2;
}

/// 跟随背包某一格在世界中的实时位置（HUD 会移动）
#[derive(Debug, Clone, Copy)]
pub struct LiveSlot(pub usize);

impl PositionSource for LiveSlot {
    fn current_position(&self, anchors: &SlotAnchors) -> Vec2 {
        anchors.position(self.0).unwrap_or(anchors.origin)
    }
}

/// 固定的地面落点
#[derive(Debug, Clone, Copy)]
pub struct FixedPoint(pub Vec2);

impl PositionSource for FixedPoint {
    fn current_position(&self, _anchors: &SlotAnchors) -> Vec2 {
        self.0
    }
}

/// 挂在被动画的实体上；实体销毁时随之消失
#[derive(Component)]
pub struct ArcTween {
    pub motion: ArcMotion,
    pub target: Box<dyn PositionSource>,
}

impl ArcTween {
    pub fn new(
        start: Vec2,
        target: impl PositionSource,
        duration: f32,
        arc_height: f32,
        easing: Easing,
    ) -> Self {
        Self {
            motion: ArcMotion::new(start, duration, arc_height, easing),
            target: Box::new(target),
        }
    }

    /// 收集：飞向背包格
    pub fn collect(start: Vec2, slot: usize, config: &LifecycleConfig) -> Self {
        Self::new(start, LiveSlot(slot), config.collect_duration, config.arc_height, config.easing)
    }

    /// 抛出：飞向地面落点
    pub fn throw(start: Vec2, landing: Vec2, config: &LifecycleConfig) -> Self {
        Self::new(start, FixedPoint(landing), config.throw_duration, config.arc_height, config.easing)
    }
}
