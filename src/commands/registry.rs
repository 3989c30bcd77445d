/*!
 * 命令目录
 *
 * 负责：
 * - 命令注册、注销和查询
 * - 按类别过滤和排序搜索
 * - 带守卫检查的命令执行、历史记录和执行通知
 *
 * 内部状态使用读写锁保护，锁不会跨越 `.await` 持有，
 * 因此命令执行期间仍可以注册、查询和搜索。
 */

use super::error::{CommandError, CommandResult};
use super::history::{CommandUsage, ExecutionHistory, ExecutionStats};
use super::search::{self, ScoredCommand};
use super::types::{
    CommandArgs, CommandCategory, CommandDescriptor, ExecutionRecord, ExecutionSource,
};
use crate::events::{ListenerSet, Subscription};
use crate::utils::error::AppResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 执行成功后的监听器
///
/// 监听器按注册顺序同步调用，返回的错误只记录日志。
pub type ExecutionObserver = dyn Fn(&ExecutionRecord) -> AppResult<()> + Send + Sync;

/// 非失败的执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Executed,
    /// 命令不存在，已跳过
    NotFound,
    /// 执行守卫拒绝，已跳过
    Blocked,
}

struct CatalogEntry {
    seq: u64,
    descriptor: Arc<CommandDescriptor>,
}

#[derive(Default)]
struct CatalogState {
    entries: HashMap<String, CatalogEntry>,
    next_seq: u64,
}

pub struct CommandCatalog {
    state: RwLock<CatalogState>,
    history: RwLock<ExecutionHistory>,
    observers: ListenerSet<ExecutionObserver>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::with_history(ExecutionHistory::new())
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self::with_history(ExecutionHistory::with_limit(limit))
    }

    fn with_history(history: ExecutionHistory) -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
            history: RwLock::new(history),
            observers: ListenerSet::new(),
        }
    }

    /// 注册命令
    ///
    /// ID 已存在时保留原命令并返回 [`CommandError::AlreadyRegistered`]。
    pub fn register(&self, descriptor: CommandDescriptor) -> CommandResult<()> {
        if descriptor.id.trim().is_empty() {
            warn!("忽略 ID 为空的命令: {}", descriptor.title);
            return Err(CommandError::InvalidDescriptor {
                reason: "命令 ID 不能为空".to_string(),
            });
        }
        if descriptor.title.trim().is_empty() {
            warn!("忽略标题为空的命令: {}", descriptor.id);
            return Err(CommandError::InvalidDescriptor {
                reason: format!("命令 {} 的标题不能为空", descriptor.id),
            });
        }

        let mut state = self.state.write();
        if state.entries.contains_key(&descriptor.id) {
            warn!("命令已注册，忽略重复注册: {}", descriptor.id);
            return Err(CommandError::AlreadyRegistered {
                command_id: descriptor.id,
            });
        }

        let seq = state.next_seq;
        state.next_seq += 1;

        debug!("注册命令: {} ({})", descriptor.id, descriptor.category);
        state.entries.insert(
            descriptor.id.clone(),
            CatalogEntry {
                seq,
                descriptor: Arc::new(descriptor),
            },
        );
        Ok(())
    }

    /// 批量注册，单个失败不影响其余命令，返回成功注册的数量
    pub fn register_all<I>(&self, descriptors: I) -> usize
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        let registered = descriptors
            .into_iter()
            .map(|descriptor| self.register(descriptor))
            .filter(Result::is_ok)
            .count();

        info!("批量注册命令完成: {} 个", registered);
        registered
    }

    /// 注销命令，返回是否存在该命令
    pub fn unregister(&self, command_id: &str) -> bool {
        let removed = self.state.write().entries.remove(command_id).is_some();
        if removed {
            debug!("注销命令: {}", command_id);
        }
        removed
    }

    /// 移除所有命令，执行历史保留
    pub fn clear(&self) {
        self.state.write().entries.clear();
        info!("已清空命令目录");
    }

    pub fn get(&self, command_id: &str) -> Option<Arc<CommandDescriptor>> {
        self.state
            .read()
            .entries
            .get(command_id)
            .map(|entry| Arc::clone(&entry.descriptor))
    }

    pub fn contains(&self, command_id: &str) -> bool {
        self.state.read().entries.contains_key(command_id)
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 所有非隐藏命令，优先级降序，相同优先级保持注册顺序
    pub fn get_all(&self) -> Vec<Arc<CommandDescriptor>> {
        let state = self.state.read();
        let mut entries: Vec<&CatalogEntry> = state
            .entries
            .values()
            .filter(|entry| !entry.descriptor.hidden)
            .collect();

        entries.sort_by(|a, b| {
            b.descriptor
                .priority
                .cmp(&a.descriptor.priority)
                .then_with(|| a.seq.cmp(&b.seq))
        });

        entries
            .into_iter()
            .map(|entry| Arc::clone(&entry.descriptor))
            .collect()
    }

    pub fn get_by_category(&self, category: CommandCategory) -> Vec<Arc<CommandDescriptor>> {
        self.get_all()
            .into_iter()
            .filter(|descriptor| descriptor.category == category)
            .collect()
    }

    /// 搜索命令，空查询返回 [`CommandCatalog::get_all`]
    pub fn search(&self, query: &str) -> Vec<Arc<CommandDescriptor>> {
        self.search_with_scores(query)
            .into_iter()
            .map(|scored| scored.descriptor)
            .collect()
    }

    /// 带得分的搜索结果，空查询时得分均为 0
    pub fn search_with_scores(&self, query: &str) -> Vec<ScoredCommand> {
        let query = search::normalize_query(query);
        if query.is_empty() {
            return self
                .get_all()
                .into_iter()
                .map(|descriptor| ScoredCommand {
                    descriptor,
                    score: 0,
                })
                .collect();
        }

        let results = search::rank(self.candidates_in_registration_order(), &query);
        debug!("搜索命令 '{}': {} 个结果", query, results.len());
        results
    }

    /// 执行命令
    ///
    /// 命令不存在或守卫拒绝时返回对应的 [`ExecutionOutcome`]，不会报错；
    /// 只有命令处理器失败时才返回错误，此时不写入历史也不通知监听器。
    pub async fn execute_command(
        &self,
        command_id: &str,
        args: CommandArgs,
        source: ExecutionSource,
    ) -> CommandResult<ExecutionOutcome> {
        let Some(descriptor) = self.get(command_id) else {
            error!("命令不存在: {}", command_id);
            return Ok(ExecutionOutcome::NotFound);
        };

        if !descriptor.can_execute() {
            warn!("命令当前不可执行: {}", command_id);
            return Ok(ExecutionOutcome::Blocked);
        }

        debug!("执行命令: {} (来源: {})", command_id, source);

        if let Err(e) = descriptor.handler.execute(args.clone()).await {
            error!("命令执行失败: {} - {:#}", command_id, e);
            return Err(CommandError::ExecutionFailed {
                command_id: command_id.to_string(),
                source: e,
            });
        }

        let record = ExecutionRecord::new(command_id, source, args);
        self.history.write().push(record.clone());
        self.notify_observers(&record);

        Ok(ExecutionOutcome::Executed)
    }

    /// 注册执行成功监听器
    pub fn on_command_execute<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&ExecutionRecord) -> AppResult<()> + Send + Sync + 'static,
    {
        let observer: Arc<ExecutionObserver> = Arc::new(observer);
        self.observers.add(observer)
    }

    pub fn clear_observers(&self) {
        self.observers.clear();
    }

    /// 最近的执行记录，最新的在前
    pub fn get_recent(&self, count: usize) -> Vec<ExecutionRecord> {
        self.history.read().recent(count)
    }

    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }

    pub fn get_execution_stats(&self) -> ExecutionStats {
        self.history.read().stats()
    }

    pub fn get_most_used_commands(&self, count: usize) -> Vec<CommandUsage> {
        self.history.read().most_used(count)
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    fn candidates_in_registration_order(&self) -> Vec<Arc<CommandDescriptor>> {
        let state = self.state.read();
        let mut entries: Vec<&CatalogEntry> = state.entries.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries
            .into_iter()
            .map(|entry| Arc::clone(&entry.descriptor))
            .collect()
    }

    fn notify_observers(&self, record: &ExecutionRecord) {
        for observer in self.observers.snapshot() {
            if let Err(e) = observer(record) {
                error!("命令执行监听器处理失败: {} - {:#}", record.command_id, e);
            }
        }
    }
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self::new()
    }
}
