use bevy::prelude::*;

/// 面向终端的一行输出，由 main 里的 forward_log_event 统一打印
#[derive(Event, Debug, Clone)]
pub struct LogEvent(pub String);
