use bevy::prelude::*;

pub mod config;
pub mod events;
pub mod states;

use config::LifecycleConfig;

/// 配置文件默认位置（相对工作目录）
pub const CONFIG_PATH: &str = "assets/config/lifecycle.toml";

/// 每帧的固定执行顺序：世界接触 → 请求处理 → 动画推进 → 提交 → 显示
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    World,
    Requests,
    Motion,
    Commit,
    Display,
}

/// 把 FrameSet 串成一条链；测试里的无窗口 App 也要调用
pub fn configure_frame_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::World,
            FrameSet::Requests,
            FrameSet::Motion,
            FrameSet::Commit,
            FrameSet::Display,
        )
            .chain(),
    );
}

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        let config = match LifecycleConfig::load(CONFIG_PATH) {
            Ok(config) => {
                info!("配置已载入: {CONFIG_PATH}");
                config
            }
            Err(err) => {
                warn!("配置载入失败，使用默认值: {err:#}");
                LifecycleConfig::default()
            }
        };

        configure_frame_sets(app);
        app.init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .insert_resource(config)
            .add_systems(OnEnter(AppState::Shutdown), request_exit);
    }
}

/// 进入 Shutdown 后退出程序；此前 OnExit(InGame) 的清理已经跑完
fn request_exit(mut exit: EventWriter<AppExit>) {
    info!("正在退出");
    exit.write(AppExit::Success);
}
