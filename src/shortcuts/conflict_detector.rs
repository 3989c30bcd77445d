/*!
 * 快捷键冲突检测器模块
 *
 * 检测多个命令声明同一按键组合的情况。
 */

use super::types::KeyCombination;
use crate::commands::CommandDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 快捷键冲突
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutConflict {
    /// 冲突的规范按键组合
    pub key_combination: String,
    /// 声明该组合的命令，按声明顺序
    pub command_ids: Vec<String>,
}

/// 快捷键冲突检测结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictDetectionResult {
    pub has_conflicts: bool,
    pub conflicts: Vec<ShortcutConflict>,
}

/// 快捷键冲突检测器
#[derive(Debug, Default)]
pub struct ShortcutConflictDetector;

impl ShortcutConflictDetector {
    pub fn new() -> Self {
        Self
    }

    /// 检测命令声明的快捷键冲突
    pub fn detect_in_descriptors(
        &self,
        descriptors: &[Arc<CommandDescriptor>],
    ) -> ConflictDetectionResult {
        self.detect(descriptors.iter().filter_map(|descriptor| {
            descriptor
                .keybinding
                .as_ref()
                .map(|keybinding| (descriptor.id.as_str(), keybinding))
        }))
    }

    /// 检测任意 (命令, 组合) 序列中的冲突，结果按规范组合排序
    pub fn detect<'a, I>(&self, bindings: I) -> ConflictDetectionResult
    where
        I: IntoIterator<Item = (&'a str, &'a KeyCombination)>,
    {
        let mut key_map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (command_id, combination) in bindings {
            key_map
                .entry(combination.canonical())
                .or_default()
                .push(command_id.to_string());
        }

        let conflicts: Vec<ShortcutConflict> = key_map
            .into_iter()
            .filter(|(_, command_ids)| command_ids.len() > 1)
            .map(|(key_combination, command_ids)| ShortcutConflict {
                key_combination,
                command_ids,
            })
            .collect();

        ConflictDetectionResult {
            has_conflicts: !conflicts.is_empty(),
            conflicts,
        }
    }
}
