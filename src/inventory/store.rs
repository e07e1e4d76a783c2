use bevy::prelude::*;

use super::components::{PickupDescriptor, Slot};
use super::error::InventoryError;
use super::events::InventoryNotice;
use super::observation::{NoticeChannel, SubscriberId};

/// 玩家背包：固定 N 格，本会话唯一（挂在 Resource）
///
/// 增删改都立即生效，但不会自己发通知；何时 notify 由编排层决定。
#[derive(Resource)]
pub struct SlotStore {
    slots: Vec<Slot>,
    channel: NoticeChannel,
}

impl SlotStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
            channel: NoticeChannel::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// 放入一个物品，返回落入的格子
    ///
    /// 可堆叠时先按索引升序找同种未满的堆，其次找第一个空格；都没有则返回 Full 且不做任何修改。
    pub fn add(&mut self, desc: &PickupDescriptor) -> Result<usize, InventoryError> {
        if desc.kind == super::components::ItemKind::Empty {
            return Err(InventoryError::EmptyDescriptor);
        }

        if desc.stackable {
            if let Some((idx, slot)) = self
                .slots
                .iter_mut()
                .enumerate()
                .find(|(_, s)| s.accepts_stack_of(desc))
            {
                slot.quantity += 1;
                return Ok(idx);
            }
        }

        let (idx, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.is_empty())
            .ok_or(InventoryError::Full)?;
        slot.fill(desc);
        Ok(idx)
    }

    /// 清空一格，返回原内容
    pub fn remove(&mut self, index: usize) -> Result<Slot, InventoryError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::IndexOutOfRange { index, len })?;
        Ok(std::mem::take(slot))
    }

    /// 交换两格的全部内容
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), InventoryError> {
        let len = self.slots.len();
        for index in [from, to] {
            if index >= len {
                return Err(InventoryError::IndexOutOfRange { index, len });
            }
        }
        self.slots.swap(from, to);
        Ok(())
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&InventoryNotice) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.channel.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.channel.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.channel.len()
    }

    /// 提交点：同步通知所有订阅者
    pub fn notify(&self, notice: InventoryNotice) {
        debug!("背包通知: {notice:?}");
        self.channel.publish(&notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::components::{ItemKind, NO_TINT};
    use std::sync::{Arc, Mutex};

    fn coin(stackable: bool, max: u32) -> PickupDescriptor {
        PickupDescriptor::new(ItemKind::GoldCoin, "Gold Coin", "icons/coin.png", NO_TINT, stackable, max)
    }

    fn kitten() -> PickupDescriptor {
        PickupDescriptor::new(ItemKind::Kitten, "Kitten", "icons/kitten.png", NO_TINT, false, 1)
    }

    #[test]
    fn non_stackable_fills_ascending_then_full() {
        let mut store = SlotStore::new(3);
        let c = coin(false, 1);

        assert_eq!(store.add(&c), Ok(0));
        assert_eq!(store.add(&c), Ok(1));
        assert_eq!(store.add(&c), Ok(2));
        assert_eq!(store.add(&c), Err(InventoryError::Full));
        assert!(store.slots().iter().all(|s| s.quantity == 1 && s.max_stack == 1));
    }

    #[test]
    fn stackable_fills_lowest_stack_first() {
        let mut store = SlotStore::new(3);
        let c = coin(true, 5);

        for _ in 0..5 {
            assert_eq!(store.add(&c), Ok(0));
        }
        assert_eq!(store.get(0).unwrap().quantity, 5);

        assert_eq!(store.add(&c), Ok(1));
        assert_eq!(store.get(1).unwrap().quantity, 1);
        assert!(store.get(2).unwrap().is_empty());
    }

    #[test]
    fn stacking_prefers_existing_stack_over_earlier_empty_slot() {
        let mut store = SlotStore::new(3);
        let c = coin(true, 5);
        store.add(&kitten()).unwrap();
        store.add(&c).unwrap();
        store.remove(0).unwrap();

        // 0 号格已空，但 1 号有未满的金币堆
        assert_eq!(store.add(&c), Ok(1));
        assert_eq!(store.get(1).unwrap().quantity, 2);
    }

    #[test]
    fn different_name_does_not_stack() {
        let mut store = SlotStore::new(2);
        let a = coin(true, 5);
        let mut b = coin(true, 5);
        b.name = "Silver Coin".into();

        assert_eq!(store.add(&a), Ok(0));
        assert_eq!(store.add(&b), Ok(1));
    }

    #[test]
    fn full_store_is_left_unchanged() {
        let mut store = SlotStore::new(2);
        store.add(&kitten()).unwrap();
        store.add(&coin(true, 1)).unwrap();
        let before = store.slots().to_vec();

        assert_eq!(store.add(&coin(true, 1)), Err(InventoryError::Full));
        assert_eq!(store.add(&kitten()), Err(InventoryError::Full));
        assert_eq!(store.slots(), before.as_slice());
    }

    #[test]
    fn empty_descriptor_rejected() {
        let mut store = SlotStore::new(2);
        let desc = PickupDescriptor::new(ItemKind::Empty, "", "", NO_TINT, false, 1);
        assert_eq!(store.add(&desc), Err(InventoryError::EmptyDescriptor));
        assert_eq!(store.occupied(), 0);
    }

    #[test]
    fn move_twice_restores_configuration() {
        let mut store = SlotStore::new(3);
        store.add(&coin(true, 5)).unwrap();
        store.add(&coin(true, 5)).unwrap();
        store.add(&kitten()).unwrap();
        let before = store.slots().to_vec();

        store.move_item(0, 2).unwrap();
        assert_eq!(store.get(0).unwrap().kind, ItemKind::Empty);
        assert_eq!(store.get(2).unwrap().quantity, 2);

        store.move_item(0, 2).unwrap();
        assert_eq!(store.slots(), before.as_slice());
    }

    #[test]
    fn out_of_range_is_reported_without_mutation() {
        let mut store = SlotStore::new(2);
        store.add(&kitten()).unwrap();
        let before = store.slots().to_vec();

        assert_eq!(
            store.move_item(0, 5),
            Err(InventoryError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(
            store.remove(9),
            Err(InventoryError::IndexOutOfRange { index: 9, len: 2 })
        );
        assert!(store.get(2).is_none());
        assert_eq!(store.slots(), before.as_slice());
    }

    #[test]
    fn remove_returns_previous_contents_and_clears() {
        let mut store = SlotStore::new(2);
        store.add(&kitten()).unwrap();

        let old = store.remove(0).unwrap();
        assert_eq!(old.name, "Kitten");
        assert_eq!(store.get(0), Some(&Slot::default()));
    }

    #[test]
    fn mutations_never_notify_on_their_own() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = SlotStore::new(2);
        let s = seen.clone();
        store.subscribe(move |n| s.lock().unwrap().push(n.clone()));

        store.add(&kitten()).unwrap();
        store.move_item(0, 1).unwrap();
        store.remove(1).unwrap();
        assert!(seen.lock().unwrap().is_empty());

        store.notify(InventoryNotice::ItemRemoved { slot: 1 });
        assert_eq!(
            *seen.lock().unwrap(),
            vec![InventoryNotice::ItemRemoved { slot: 1 }]
        );
    }

    #[test]
    fn slot_descriptor_round_trips_identity() {
        let mut store = SlotStore::new(1);
        let c = coin(true, 5);
        store.add(&c).unwrap();
        assert_eq!(store.get(0).unwrap().descriptor(), Some(c));
        assert_eq!(Slot::default().descriptor(), None);
    }
}
