use bevy::prelude::*;

/// 外部对背包的请求。三种请求共用一个事件队列，保证同一帧内按发出顺序处理
#[derive(Event, Debug, Clone, PartialEq)]
pub enum InventoryRequest {
    /// 世界碰撞层：某物品碰到了收集者
    Collect { item: Entity, collector: Entity },
    /// UI：把第 slot 格扔回世界
    Eject { slot: usize },
    /// UI：交换两格
    Move { from: usize, to: usize },
}

/// 背包对外的提交通知，经 SlotStore 的订阅回调同步送达；显示层收到后应重新 get(index)
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryNotice {
    ItemAdded { name: String, slot: usize },
    ItemMoved { from: usize, to: usize },
    ItemRemoved { slot: usize },
}

/// 背包已满时给玩家的提示，position 为收集者所在位置
#[derive(Event, Debug, Clone)]
pub struct InventoryFull {
    pub position: Vec2,
    pub item: String,
}
