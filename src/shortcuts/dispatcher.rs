/*!
 * 快捷键分发器
 *
 * 负责：
 * - 维护规范按键组合到命令的绑定表
 * - 将原始按键事件匹配到绑定并通过命令目录执行
 * - 把未匹配绑定或被绑定守卫拒绝的按键转发给被动监听器
 */

use super::conflict_detector::{ConflictDetectionResult, ShortcutConflictDetector};
use super::display;
use super::error::{ShortcutError, ShortcutResult};
use super::platform_adapter::PlatformAdapter;
use super::types::{KeyCombination, KeyListener, KeyPress, ShortcutBinding};
use crate::commands::{CommandCatalog, ExecutionGuard, ExecutionOutcome, ExecutionSource};
use crate::events::{ListenerSet, Subscription};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 按键事件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDispatch {
    /// 分发器已禁用
    Disabled,
    /// 目标元素接受文本输入，不处理
    TextInput,
    /// 执行了绑定的命令，包括执行失败的情况
    Executed { command_id: String },
    /// 匹配到绑定但命令目录未执行（命令不存在或被守卫阻止），按键已被占用
    Claimed { command_id: String },
    /// 没有可执行的绑定，已转发给被动监听器
    Forwarded,
}

pub struct ShortcutDispatcher {
    catalog: Arc<CommandCatalog>,
    /// 规范字符串 -> 绑定
    bindings: RwLock<HashMap<String, ShortcutBinding>>,
    listeners: ListenerSet<KeyListener>,
    enabled: AtomicBool,
    adapter: Option<PlatformAdapter>,
}

impl ShortcutDispatcher {
    pub fn new(catalog: Arc<CommandCatalog>) -> Self {
        Self {
            catalog,
            bindings: RwLock::new(HashMap::new()),
            listeners: ListenerSet::new(),
            enabled: AtomicBool::new(true),
            adapter: None,
        }
    }

    /// 注册前按平台适配所有组合
    pub fn with_platform_adapter(mut self, adapter: PlatformAdapter) -> Self {
        self.adapter = Some(adapter);
        self
    }

    fn resolve(&self, combination: &KeyCombination) -> KeyCombination {
        match &self.adapter {
            Some(adapter) => adapter.adapt(combination),
            None => combination.clone(),
        }
    }

    /// 注册快捷键，组合已被占用时返回冲突错误
    pub fn register_shortcut(
        &self,
        command_id: &str,
        combination: &KeyCombination,
        guard: ExecutionGuard,
    ) -> ShortcutResult<()> {
        let combination = self.resolve(combination);
        let canonical = combination.canonical();

        let mut bindings = self.bindings.write();
        if let Some(existing) = bindings.get(&canonical) {
            warn!(
                "快捷键冲突: {} 已绑定到 {}，忽略 {}",
                canonical, existing.command_id, command_id
            );
            return Err(ShortcutError::Conflict {
                combination: canonical,
                existing_command: existing.command_id.clone(),
            });
        }

        debug!("注册快捷键: {} -> {}", canonical, command_id);
        bindings.insert(
            canonical,
            ShortcutBinding {
                command_id: command_id.to_string(),
                combination,
                guard,
            },
        );
        Ok(())
    }

    /// 注销快捷键，返回是否存在该绑定
    pub fn unregister_shortcut(&self, combination: &KeyCombination) -> bool {
        let canonical = self.resolve(combination).canonical();
        let removed = self.bindings.write().remove(&canonical);
        if let Some(binding) = &removed {
            debug!("注销快捷键: {} -> {}", canonical, binding.command_id);
        }
        removed.is_some()
    }

    /// 为目录中声明了快捷键的可见命令注册绑定，冲突的跳过，返回注册数量
    ///
    /// 描述符的守卫由命令目录在执行时检查，绑定本身不带守卫。
    pub fn register_from_catalog(&self) -> usize {
        let mut registered = 0;
        for descriptor in self.catalog.get_all() {
            let Some(keybinding) = &descriptor.keybinding else {
                continue;
            };
            if self
                .register_shortcut(&descriptor.id, keybinding, ExecutionGuard::Unguarded)
                .is_ok()
            {
                registered += 1;
            }
        }

        info!("从命令目录注册快捷键: {} 个", registered);
        registered
    }

    pub fn is_shortcut_available(&self, combination: &KeyCombination) -> bool {
        let canonical = self.resolve(combination).canonical();
        !self.bindings.read().contains_key(&canonical)
    }

    /// 查找命令绑定的快捷键，多个绑定时返回规范字符串最小的一个
    pub fn get_shortcut_for_command(&self, command_id: &str) -> Option<KeyCombination> {
        self.bindings
            .read()
            .iter()
            .filter(|(_, binding)| binding.command_id == command_id)
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, binding)| binding.combination.clone())
    }

    pub fn get_display_text(&self, combination: &KeyCombination) -> String {
        display::get_display_text(combination)
    }

    /// 所有绑定，按规范字符串排序
    pub fn get_all_shortcuts(&self) -> Vec<ShortcutBinding> {
        let bindings = self.bindings.read();
        let mut keys: Vec<&String> = bindings.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| bindings.get(key).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.bindings.write().clear();
    }

    /// 检测目录中多个命令声明同一快捷键的情况
    pub fn detect_catalog_conflicts(&self) -> ConflictDetectionResult {
        let descriptors = self.catalog.get_all();
        let result = ShortcutConflictDetector::new().detect_in_descriptors(&descriptors);
        for conflict in &result.conflicts {
            warn!(
                "快捷键 {} 被多个命令声明: {}",
                conflict.key_combination,
                conflict.command_ids.join(", ")
            );
        }
        result
    }

    /// 处理按键事件
    ///
    /// 修饰键必须精确匹配：`Ctrl+Shift+S` 不会触发 `Ctrl+S` 的绑定。
    /// 绑定守卫拒绝时按键转发给被动监听器；一旦交给命令目录，按键即被占用。
    /// 命令执行失败只记录日志。
    pub async fn handle_key_press(&self, event: &mut KeyPress) -> KeyDispatch {
        if !self.is_enabled() {
            return KeyDispatch::Disabled;
        }
        if event.target.accepts_text() {
            return KeyDispatch::TextInput;
        }

        let canonical = event.combination().canonical();
        let binding = self.bindings.read().get(&canonical).cloned();

        if let Some(binding) = binding {
            event.prevent_default();
            event.stop_propagation();

            if binding.guard.allows() {
                match self
                    .catalog
                    .execute_command(&binding.command_id, None, ExecutionSource::Keyboard)
                    .await
                {
                    Ok(ExecutionOutcome::Executed) => {
                        return KeyDispatch::Executed {
                            command_id: binding.command_id,
                        };
                    }
                    Ok(outcome) => {
                        debug!("快捷键 {} 未执行命令: {:?}", canonical, outcome);
                        return KeyDispatch::Claimed {
                            command_id: binding.command_id,
                        };
                    }
                    Err(e) => {
                        error!("快捷键 {} 执行命令失败: {}", canonical, e);
                        return KeyDispatch::Executed {
                            command_id: binding.command_id,
                        };
                    }
                }
            } else {
                debug!("快捷键 {} 的守卫拒绝执行: {}", canonical, binding.command_id);
            }
        }

        self.notify_listeners(event);
        KeyDispatch::Forwarded
    }

    /// 注册被动按键监听器
    pub fn add_key_listener<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&KeyPress) + Send + Sync + 'static,
    {
        let listener: Arc<KeyListener> = Arc::new(listener);
        self.listeners.add(listener)
    }

    pub fn clear_key_listeners(&self) {
        self.listeners.clear();
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
        info!("快捷键分发已启用");
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        info!("快捷键分发已禁用");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn notify_listeners(&self, event: &KeyPress) {
        for listener in self.listeners.snapshot() {
            listener(event);
        }
    }
}
