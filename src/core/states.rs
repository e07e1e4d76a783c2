use bevy::prelude::*;

/// 会话的大状态；玩法系统只在 InGame 下运行
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Startup,
    /// 等待物品表 items.ron 载入
    Loading,
    InGame,
    Shutdown,
}
