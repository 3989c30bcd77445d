/*!
 * 信号总线
 *
 * 以信号名称为键的进程内订阅系统，用于主题切换、打开命令面板等横切信号。
 * 同步订阅者按注册顺序在发送方的调用栈中执行；异步消费者可以通过
 * [`SignalBus::stream`] 获取广播接收端。
 */

use super::listeners::{ListenerSet, Subscription};
use crate::utils::error::AppResult;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error};

/// 广播通道默认容量
pub const DEFAULT_SIGNAL_CAPACITY: usize = 256;

/// 内置信号名称
pub mod names {
    pub const THEME_SET: &str = "theme:set";
    pub const THEME_TOGGLE: &str = "theme:toggle";
    pub const PALETTE_OPEN: &str = "palette:open";
    pub const SIDEBAR_TOGGLE: &str = "sidebar:toggle";
    pub const STATUSBAR_TOGGLE: &str = "statusbar:toggle";
    pub const FILE_NEW: &str = "file:new";
    pub const FILE_OPEN: &str = "file:open";
    pub const FILE_SAVE: &str = "file:save";
    pub const FILE_SAVE_AS: &str = "file:save-as";
    pub const EDIT_UNDO: &str = "edit:undo";
    pub const EDIT_REDO: &str = "edit:redo";
    pub const SEARCH_FIND: &str = "search:find";
    pub const HELP_SHORTCUTS: &str = "help:shortcuts";
    pub const WINDOW_RELOAD: &str = "window:reload";
}

/// 一次信号发送
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub payload: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    pub fn new(name: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// 信号订阅者
pub type SignalHandler = dyn Fn(&Signal) -> AppResult<()> + Send + Sync;

pub struct SignalBus {
    subscribers: RwLock<HashMap<String, ListenerSet<SignalHandler>>>,
    sender: broadcast::Sender<Signal>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SIGNAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            subscribers: RwLock::new(HashMap::new()),
            sender,
        }
    }

    /// 订阅指定名称的信号
    pub fn subscribe<F>(&self, name: impl Into<String>, handler: F) -> Subscription
    where
        F: Fn(&Signal) -> AppResult<()> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("订阅信号: {}", name);

        let listeners = self
            .subscribers
            .write()
            .entry(name)
            .or_insert_with(ListenerSet::new)
            .clone();
        let handler: Arc<SignalHandler> = Arc::new(handler);
        listeners.add(handler)
    }

    /// 发送信号，返回被调用的同步订阅者数量
    ///
    /// 单个订阅者出错只记录日志，不影响其余订阅者。
    pub fn emit(&self, name: &str, payload: Option<serde_json::Value>) -> usize {
        let signal = Signal::new(name, payload);
        let handlers = self
            .subscribers
            .read()
            .get(name)
            .map(ListenerSet::snapshot)
            .unwrap_or_default();

        debug!("发送信号: {} ({} 个订阅者)", name, handlers.len());

        for handler in &handlers {
            if let Err(e) = handler(&signal) {
                error!("信号 {} 的订阅者处理失败: {:#}", name, e);
            }
        }

        // 没有异步接收端时发送会失败，忽略即可
        let _ = self.sender.send(signal);
        handlers.len()
    }

    /// 获取所有信号的广播流
    pub fn stream(&self) -> broadcast::Receiver<Signal> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscribers
            .read()
            .get(name)
            .map(ListenerSet::len)
            .unwrap_or(0)
    }

    /// 清空所有同步订阅者
    pub fn clear(&self) {
        let subscribers = self.subscribers.read();
        for listeners in subscribers.values() {
            listeners.clear();
        }
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}
