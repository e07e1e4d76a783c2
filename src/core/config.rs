//! 生命周期相关的全部可调参数，从 TOML 读取

use std::path::Path;

use anyhow::{Context, ensure};
use bevy::prelude::*;
use serde_derive::Deserialize;

/// 动画缓动曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Easing {
    Linear,
    /// 3t² - 2t³，两端切线为 0
    #[default]
    SmoothStep,
    QuadInOut,
}

impl Easing {
    /// 输入会先被夹到 [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub slot_count: usize,

    // 弧线动画
    pub arc_height: f32,
    pub collect_duration: f32,
    pub throw_duration: f32,
    pub easing: Easing,

    // 抛出落点
    pub throw_distance: f32,
    pub probe_lift: f32,
    pub probe_distance: f32,
    pub ground_clearance: f32,
    pub collection_immunity: f32,

    // 接触判定
    pub collector_radius: f32,
    pub item_radius: f32,

    // 背包 HUD 网格
    pub grid_columns: usize,
    pub slot_size: f32,
    pub slot_spacing: f32,
    pub hud_offset: [f32; 2],

    // 开局散落的金币
    pub coin_count: usize,
    pub coin_spawn_radius: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            slot_count: 12,
            arc_height: 2.0,
            collect_duration: 0.6,
            throw_duration: 0.5,
            easing: Easing::SmoothStep,
            throw_distance: 2.0,
            probe_lift: 10.0,
            probe_distance: 100.0,
            ground_clearance: 0.1,
            collection_immunity: 0.3,
            collector_radius: 1.0,
            item_radius: 0.5,
            grid_columns: 4,
            slot_size: 0.8,
            slot_spacing: 0.1,
            hud_offset: [2.0, 1.0],
            coin_count: 10,
            coin_spawn_radius: 8.0,
        }
    }
}

impl LifecycleConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("配置文件 {} 无效", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("TOML 解析失败")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.slot_count > 0, "slot_count 必须大于 0");
        ensure!(self.grid_columns > 0, "grid_columns 必须大于 0");
        for (name, value) in [
            ("collect_duration", self.collect_duration),
            ("throw_duration", self.throw_duration),
            ("throw_distance", self.throw_distance),
            ("probe_lift", self.probe_lift),
            ("probe_distance", self.probe_distance),
            ("ground_clearance", self.ground_clearance),
            ("collection_immunity", self.collection_immunity),
            ("collector_radius", self.collector_radius),
            ("item_radius", self.item_radius),
        ] {
            ensure!(value >= 0.0, "{name} 不能为负数 (得到 {value})");
        }
        Ok(())
    }

    pub fn hud_offset(&self) -> Vec2 {
        Vec2::from_array(self.hud_offset)
    }
}
