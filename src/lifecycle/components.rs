use std::collections::HashMap;

use bevy::prelude::*;

/// 收集流程：Idle → Reserved → Animating → Committed，线性且不可取消
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionPhase {
    #[default]
    Idle,
    /// 背包已写入，通知未发；下一帧挂上动画
    Reserved,
    Animating,
    /// ItemAdded 已发出，实体随即销毁
    Committed,
}

/// 丢弃流程：Idle → Released → Animating → Spawned
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EjectionPhase {
    #[default]
    Idle,
    /// 格子已清空，ItemRemoved 已发出；下一帧挂上动画
    Released,
    Animating,
    /// 落地，动画组件已移除
    Spawned,
}

/// 正飞向背包的物品
#[derive(Component, Debug, Clone)]
pub struct CollectFlight {
    pub slot: usize,
    pub name: String,
}

/// 正被抛向地面的物品
#[derive(Component, Debug, Clone, Copy)]
pub struct ThrowFlight {
    pub slot: usize,
    pub landing: Vec2,
}

/// 已预约但尚未提交的收集：实体 → 格子
#[derive(Resource, Debug, Default)]
pub struct PendingCommits {
    by_entity: HashMap<Entity, usize>,
}

impl PendingCommits {
    pub fn insert(&mut self, entity: Entity, slot: usize) {
        self.by_entity.insert(entity, slot);
    }

    pub fn remove(&mut self, entity: Entity) -> Option<usize> {
        self.by_entity.remove(&entity)
    }

    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.by_entity.get(&entity).copied()
    }

    pub fn len(&self) -> usize {
        self.by_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_entity.is_empty()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(Entity, usize) -> bool) {
        self.by_entity.retain(|e, slot| keep(*e, *slot));
    }
}
