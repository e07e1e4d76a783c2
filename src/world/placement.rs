//! 丢弃物品的落点计算：水平随机方向 + 向下探测地面

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::components::Solid;
use crate::core::config::LifecycleConfig;

/// 向下的碰撞探测
pub trait GroundProbe {
    /// 从 from 竖直向下投射 max_distance，返回最先碰到的表面点
    fn cast_down(&self, from: Vec2, max_distance: f32) -> Option<Vec2>;
}

/// 当前帧所有 Solid 的矩形快照
#[derive(Debug, Clone, Default)]
pub struct SolidGeometry {
    rects: Vec<Rect>,
}

impl SolidGeometry {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    pub fn from_solids<'a>(solids: impl IntoIterator<Item = (&'a Transform, &'a Solid)>) -> Self {
        let rects = solids
            .into_iter()
            .map(|(tf, solid)| Rect::from_center_half_size(tf.translation.truncate(), solid.half_extents))
            .collect();
        Self { rects }
    }
}

impl GroundProbe for SolidGeometry {
    fn cast_down(&self, from: Vec2, max_distance: f32) -> Option<Vec2> {
        self.rects
            .iter()
            .filter(|r| from.x >= r.min.x && from.x <= r.max.x && from.y >= r.min.y)
            // 起点在矩形内部时就地命中
            .map(|r| r.max.y.min(from.y))
            .filter(|y| from.y - y <= max_distance)
            .max_by(f32::total_cmp)
            .map(|y| Vec2::new(from.x, y))
    }
}

/// 抛物落点用的随机源，测试时可换成固定种子
#[derive(Resource)]
pub struct PlacementRng(pub StdRng);

impl Default for PlacementRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// 计算丢弃落点。探测不到地面时退回 origin 的高度。
pub fn resolve_throw_target<R: Rng>(
    origin: Vec2,
    config: &LifecycleConfig,
    probe: &impl GroundProbe,
    rng: &mut R,
) -> Vec2 {
    // 横版视角下只保留水平分量的方向
    let angle = rng.gen_range(0.0..TAU);
    let x = origin.x + angle.cos().signum() * config.throw_distance;

    let probe_start = Vec2::new(x, origin.y + config.probe_lift);
    match probe.cast_down(probe_start, config.probe_distance) {
        Some(hit) => {
            debug!("探测到地面 y={}，落点 ({x}, {})", hit.y, hit.y + config.ground_clearance);
            Vec2::new(x, hit.y + config.ground_clearance)
        }
        None => {
            warn!("{probe_start} 下方没有地面，使用起点高度 y={}", origin.y);
            Vec2::new(x, origin.y)
        }
    }
}
