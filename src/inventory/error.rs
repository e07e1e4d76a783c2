use thiserror::Error;

/// 背包操作的可恢复错误；调用方记录日志后继续，不会中断帧循环
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("背包已满")]
    Full,
    #[error("格子索引 {index} 超出范围 (共 {len} 格)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("格子 {0} 为空")]
    EmptySlot(usize),
    #[error("描述符的物品种类为 Empty")]
    EmptyDescriptor,
}
