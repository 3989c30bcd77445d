//! 监听器集合与订阅句柄

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// 取消订阅的回调
type CancelFn = Box<dyn FnOnce() + Send + Sync>;

/// 订阅句柄
///
/// 调用 [`Subscription::unsubscribe`] 移除对应的监听器。
/// 直接丢弃句柄不会取消订阅，监听器会一直保留到所属集合被清空。
pub struct Subscription {
    cancel: Option<CancelFn>,
}

impl Subscription {
    fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// 取消订阅
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

struct ListenerSlots<T: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Arc<T>)>,
}

/// 按注册顺序保存的监听器集合
///
/// 通知时先取快照再调用，监听器内部可以安全地增删订阅。
pub struct ListenerSet<T: ?Sized> {
    inner: Arc<RwLock<ListenerSlots<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> ListenerSet<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ListenerSlots {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// 添加监听器，返回订阅句柄
    pub fn add(&self, listener: Arc<T>) -> Subscription {
        let id = {
            let mut slots = self.inner.write();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.entries.push((id, listener));
            id
        };

        let slots = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(slots) = slots.upgrade() {
                slots.write().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// 按注册顺序返回当前监听器的快照
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.inner
            .read()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.write().entries.clear();
    }
}

impl<T: ?Sized> Clone for ListenerSet<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
