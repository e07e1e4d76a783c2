//! 文字 CLI：读取 stdin → 解析命令 → 发请求 / 打印背包

use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::{config::LifecycleConfig, events::LogEvent, states::AppState};
use crate::data::{ItemAssets, schema::{ItemEntry, ItemList}};
use crate::display::components::{InventoryView, SlotView};
use crate::inventory::{events::InventoryRequest, store::SlotStore};
use crate::lifecycle::components::PendingCommits;
use crate::world::{components::Player, spawn::spawn_world_item};

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// spawn 不带坐标时，物品出现在玩家右侧这么远
const SPAWN_OFFSET: Vec2 = Vec2::new(3.0, 0.0);

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Ok(mut buf) = buffer.lock() {
                        buf.push_back(line.to_string());
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Inventory,
    Dump,
    Spawn { id: String, at: Option<Vec2> },
    Goto(Vec2),
    Drop(usize),
    Move { from: usize, to: usize },
    Usage(&'static str),
    Unsupported(String),
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

fn execute_cli_commands(
    mut commands: Commands,
    mut line_reader: EventReader<CliLine>,
    mut next_state: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
    mut requests: EventWriter<InventoryRequest>,
    state: Res<State<AppState>>,
    config: Res<LifecycleConfig>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
    store: Res<SlotStore>,
    view: Res<InventoryView>,
    pending: Res<PendingCommits>,
    mut player: Query<&mut Transform, With<Player>>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(
                    "命令列表:
  help                   查看帮助
  status                 查看当前状态
  exit / quit            退出程序
  items                  列出所有物品
  items <token>          用 id / uuid / 名称 查询单个物品
  inv                    查看背包（标出尚未提交的格子）
  dump                   以 JSON 打印背包
  spawn <id> [x y]       在世界中生成物品
  goto <x> <y>           把玩家移到指定位置
  drop <slot>            把某格扔回世界
  move <from> <to>       交换两格
  ".into()));
            }

            Command::Status => {
                let cnt = item_assets.list(&lists).map_or(0, |list| list.items.len());
                log.write(LogEvent(format!(
                    "State: {:?}, Items Loaded: {}, Slots: {}/{}, In Flight: {}, Subscribers: {}",
                    state.get(),
                    cnt,
                    store.occupied(),
                    store.capacity(),
                    pending.len(),
                    store.subscriber_count()
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                next_state.set(AppState::Shutdown);
            }

            Command::Items(token) => {
                let Some(list) = item_assets.list(&lists) else {
                    log.write(LogEvent("物品表未加载".into()));
                    continue;
                };
                match token {
                    None => {
                        for entry in &list.items {
                            let uuid = uuid_from_id(&entry.id);
                            log.write(LogEvent(format!(
                                "{} | {} | {}",
                                uuid, entry.id, entry.name
                            )));
                        }
                    }
                    Some(t) => match find_entry(list, &t) {
                        Some(e) => {
                            let uuid = uuid_from_id(&e.id);
                            log.write(LogEvent(format!(
                                "==================================================
UUID  : {uuid}
ID    : {}
Name  : {}
Kind  : {:?}
Stack : {}
Desc  : {}
==================================================",
                                e.id,
                                e.name,
                                e.kind,
                                if e.stackable { e.max_stack } else { 1 },
                                e.description
                            )));
                        }
                        None => {
                            log.write(LogEvent("未找到匹配物品".into()));
                        }
                    },
                }
            }

            Command::Inventory => {
                if store.occupied() == 0 {
                    log.write(LogEvent("背包是空的".into()));
                    continue;
                }
                for (i, slot) in store.slots().iter().enumerate() {
                    if slot.is_empty() {
                        continue;
                    }
                    // 背包已写入、界面还没看到：物品仍在飞行
                    let shown = view.get(i) == Some(&SlotView::from(slot));
                    log.write(LogEvent(format!(
                        "[{i}] {} ×{}{}",
                        slot.name,
                        slot.quantity,
                        if shown { "" } else { "  (飞行中)" }
                    )));
                }
            }

            Command::Dump => match serde_json::to_string_pretty(store.slots()) {
                Ok(json) => {
                    log.write(LogEvent(json));
                }
                Err(err) => {
                    log.write(LogEvent(format!("序列化失败: {err}")));
                }
            },

            Command::Spawn { id, at } => {
                let Some(entry) = item_assets.list(&lists).and_then(|l| find_entry(l, &id)) else {
                    log.write(LogEvent(format!("未知物品: {id}")));
                    continue;
                };
                let pos = at.unwrap_or_else(|| {
                    player
                        .single()
                        .map(|tf| tf.translation.truncate() + SPAWN_OFFSET)
                        .unwrap_or(SPAWN_OFFSET)
                });
                spawn_world_item(&mut commands, entry.descriptor(), pos, 0.0, config.item_radius);
                log.write(LogEvent(format!("生成 {} @ {pos}", entry.name)));
            }

            Command::Goto(pos) => match player.single_mut() {
                Ok(mut tf) => {
                    tf.translation.x = pos.x;
                    tf.translation.y = pos.y;
                    log.write(LogEvent(format!("玩家 → {pos}")));
                }
                Err(_) => {
                    log.write(LogEvent("找不到玩家".into()));
                }
            },

            Command::Drop(slot) => {
                requests.write(InventoryRequest::Eject { slot });
            }

            Command::Move { from, to } => {
                requests.write(InventoryRequest::Move { from, to });
            }

            Command::Usage(usage) => {
                log.write(LogEvent(format!("用法: {usage}")));
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = parts.collect();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => Command::Items(args.first().map(|s| s.to_string())),
        "inventory" | "inv" => Command::Inventory,
        "dump" => Command::Dump,
        "spawn" => match args.as_slice() {
            [id] => Command::Spawn {
                id: id.to_string(),
                at: None,
            },
            [id, x, y] => match parse_point(x, y) {
                Some(at) => Command::Spawn {
                    id: id.to_string(),
                    at: Some(at),
                },
                None => Command::Usage("spawn <id> [x y]"),
            },
            _ => Command::Usage("spawn <id> [x y]"),
        },
        "goto" => match args.as_slice() {
            [x, y] => parse_point(x, y).map_or(Command::Usage("goto <x> <y>"), Command::Goto),
            _ => Command::Usage("goto <x> <y>"),
        },
        "drop" => match args.as_slice() {
            [slot] => slot.parse().map_or(Command::Usage("drop <slot>"), Command::Drop),
            _ => Command::Usage("drop <slot>"),
        },
        "move" | "mv" => match args.as_slice() {
            [a, b] => match (a.parse(), b.parse()) {
                (Ok(from), Ok(to)) => Command::Move { from, to },
                _ => Command::Usage("move <from> <to>"),
            },
            _ => Command::Usage("move <from> <to>"),
        },
        other => Command::Unsupported(other.into()),
    }
}

fn parse_point(x: &str, y: &str) -> Option<Vec2> {
    Some(Vec2::new(x.parse().ok()?, y.parse().ok()?))
}

/// id / 名称 / uuid 任一匹配
fn find_entry<'a>(list: &'a ItemList, token: &str) -> Option<&'a ItemEntry> {
    list.find(token).or_else(|| {
        let token = token.to_lowercase();
        list.items
            .iter()
            .find(|e| uuid_from_id(&e.id).to_string() == token)
    })
}

fn uuid_from_id(id: &str) -> Uuid {
    // 固定 namespace + id 字节生成版本 5 UUID，同一 id 总得到同一值
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}
