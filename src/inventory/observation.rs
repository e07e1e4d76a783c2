use super::events::InventoryNotice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn Fn(&InventoryNotice) + Send + Sync>;

/// 同步回调列表：publish 时立即按订阅顺序调用，不排队
#[derive(Default)]
pub struct NoticeChannel {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Subscriber)>,
}

impl NoticeChannel {
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&InventoryNotice) + Send + Sync + 'static,
    ) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn publish(&self, notice: &InventoryNotice) {
        for (_, callback) in &self.subscribers {
            callback(notice);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}
