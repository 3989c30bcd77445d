/*!
 * 命令执行历史
 *
 * 最新的记录在前，超过容量时静默丢弃最旧的记录。
 * 记录只引用命令 ID，命令被注销后历史保持不变。
 */

use super::types::{ExecutionRecord, ExecutionSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// 默认历史容量
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// 统计信息中包含的常用命令数量
pub const STATS_MOST_USED_LIMIT: usize = 10;

/// 单个命令的使用次数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandUsage {
    pub command_id: String,
    pub count: usize,
}

/// 执行统计信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStats {
    pub total_executions: usize,
    pub unique_commands: usize,
    pub by_source: HashMap<ExecutionSource, usize>,
    pub most_used: Vec<CommandUsage>,
    pub last_executed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ExecutionHistory {
    records: VecDeque<ExecutionRecord>,
    limit: usize,
}

impl ExecutionHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// 容量至少为 1
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            records: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, record: ExecutionRecord) {
        self.records.push_front(record);
        self.records.truncate(self.limit);
    }

    /// 最近的 `count` 条记录，最新的在前
    pub fn recent(&self, count: usize) -> Vec<ExecutionRecord> {
        self.records.iter().take(count).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExecutionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// 按使用次数降序，次数相同时最近使用的在前
    pub fn most_used(&self, count: usize) -> Vec<CommandUsage> {
        let mut usages: Vec<CommandUsage> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for record in &self.records {
            match positions.get(record.command_id.as_str()) {
                Some(&index) => usages[index].count += 1,
                None => {
                    positions.insert(record.command_id.as_str(), usages.len());
                    usages.push(CommandUsage {
                        command_id: record.command_id.clone(),
                        count: 1,
                    });
                }
            }
        }

        usages.sort_by(|a, b| b.count.cmp(&a.count));
        usages.truncate(count);
        usages
    }

    pub fn stats(&self) -> ExecutionStats {
        let mut by_source = HashMap::new();
        for record in &self.records {
            *by_source.entry(record.source).or_insert(0) += 1;
        }

        let unique_commands = self
            .records
            .iter()
            .map(|record| record.command_id.as_str())
            .collect::<std::collections::HashSet<_>>()
            .len();

        ExecutionStats {
            total_executions: self.records.len(),
            unique_commands,
            by_source,
            most_used: self.most_used(STATS_MOST_USED_LIMIT),
            last_executed_at: self.records.front().map(|record| record.timestamp),
        }
    }
}

impl Default for ExecutionHistory {
    fn default() -> Self {
        Self::new()
    }
}
