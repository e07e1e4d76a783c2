use serde_derive::{Deserialize, Serialize};

/// 物品种类；Empty 是空格子的哨兵值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    Empty,
    GoldCoin,
    Kitten,
    GameBoy,
    Trophy,
    Books,
    Guitar,
    Cigarette,
    Football,
    Custom,
}

/// 空格子的默认色调（白）
pub const NO_TINT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// 世界物品被拾取时携带的身份信息，拷贝进格子后即丢弃
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupDescriptor {
    pub kind: ItemKind,
    pub name: String,
    /// 图标资源路径，渲染层自行解析
    pub icon: String,
    pub tint: [f32; 4],
    pub stackable: bool,
    pub max_stack: u32,
}

impl PickupDescriptor {
    /// 不可堆叠的物品 max_stack 恒为 1
    pub fn new(
        kind: ItemKind,
        name: impl Into<String>,
        icon: impl Into<String>,
        tint: [f32; 4],
        stackable: bool,
        max_stack: u32,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            icon: icon.into(),
            tint,
            stackable,
            max_stack: if stackable { max_stack.max(1) } else { 1 },
        }
    }
}

/// 背包中的一格
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub kind: ItemKind,
    pub name: String,
    pub icon: String,
    pub tint: [f32; 4],
    pub stackable: bool,
    pub max_stack: u32,
    pub quantity: u32,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            kind: ItemKind::Empty,
            name: String::new(),
            icon: String::new(),
            tint: NO_TINT,
            stackable: false,
            max_stack: 1,
            quantity: 0,
        }
    }
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.kind == ItemKind::Empty
    }

    /// 能否再叠一个同样的物品进来
    pub fn accepts_stack_of(&self, desc: &PickupDescriptor) -> bool {
        !self.is_empty()
            && self.stackable
            && self.kind == desc.kind
            && self.name == desc.name
            && self.quantity < self.max_stack
    }

    pub fn fill(&mut self, desc: &PickupDescriptor) {
        *self = Slot {
            kind: desc.kind,
            name: desc.name.clone(),
            icon: desc.icon.clone(),
            tint: desc.tint,
            stackable: desc.stackable,
            max_stack: if desc.stackable { desc.max_stack.max(1) } else { 1 },
            quantity: 1,
        };
    }

    pub fn clear(&mut self) {
        *self = Slot::default();
    }

    /// 空格子没有描述符
    pub fn descriptor(&self) -> Option<PickupDescriptor> {
        if self.is_empty() {
            return None;
        }
        Some(PickupDescriptor {
            kind: self.kind,
            name: self.name.clone(),
            icon: self.icon.clone(),
            tint: self.tint,
            stackable: self.stackable,
            max_stack: self.max_stack,
        })
    }
}
