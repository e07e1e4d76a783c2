//! 弧线插值：收集飞入背包和抛回世界共用同一套计算

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::core::config::Easing;

/// 飞到终点时的缩放
pub const END_SCALE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSample {
    pub position: Vec2,
    pub scale: f32,
}

/// 归一化时间 t 处的位置和缩放；target 由调用方每次重新采样
pub fn sample_arc(start: Vec2, target: Vec2, t: f32, easing: Easing, arc_height: f32) -> ArcSample {
    let t = t.clamp(0.0, 1.0);
    let eased = easing.apply(t);
    let base = start.lerp(target, eased);
    let arc = arc_height * (PI * t).sin();
    ArcSample {
        position: base + Vec2::new(0.0, arc),
        scale: scale_at(eased),
    }
}

/// 从 1.0 线性缩到 END_SCALE
fn scale_at(eased: f32) -> f32 {
    1.0 + (END_SCALE - 1.0) * eased
}

/// 可恢复的弧线进度：起点只记录一次，每帧推进一次
#[derive(Debug, Clone, PartialEq)]
pub struct ArcMotion {
    start: Vec2,
    elapsed: f32,
    duration: f32,
    arc_height: f32,
    easing: Easing,
    complete: bool,
}

impl ArcMotion {
    pub fn new(start: Vec2, duration: f32, arc_height: f32, easing: Easing) -> Self {
        Self {
            start,
            elapsed: 0.0,
            duration: duration.max(0.0),
            arc_height,
            easing,
            complete: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// 推进 dt 秒。完成后返回 None 且不再有任何变化。
    ///
    /// 到达 t >= 1 时直接吸附到本帧的 target，避免浮点误差导致停在终点附近。
    pub fn advance(&mut self, dt: f32, target: Vec2) -> Option<ArcSample> {
        if self.complete {
            return None;
        }
        self.elapsed += dt.max(0.0);
        let t = self.progress();
        if t >= 1.0 {
            self.complete = true;
            return Some(ArcSample {
                position: target,
                scale: scale_at(self.easing.apply(1.0)),
            });
        }
        Some(sample_arc(self.start, target, t, self.easing, self.arc_height))
    }
}
