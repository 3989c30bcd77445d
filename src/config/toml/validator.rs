/*!
 * TOML配置验证器
 *
 * 负责验证配置的有效性和完整性
 */

use crate::{
    config::types::{CommandsConfig, ShortcutsConfig, WorkbenchConfig},
    utils::error::AppResult,
};
use anyhow::bail;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// 执行历史容量的允许范围
pub const HISTORY_LIMIT_RANGE: std::ops::RangeInclusive<usize> = 1..=10_000;

/// TOML配置验证器
pub struct TomlConfigValidator;

impl TomlConfigValidator {
    pub fn new() -> Self {
        Self
    }

    /// 验证完整配置
    ///
    /// 存在错误时返回汇总的错误；通过时返回警告列表。
    pub fn validate_config(&self, config: &WorkbenchConfig) -> AppResult<Vec<String>> {
        debug!("开始验证配置");

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if config.version.trim().is_empty() {
            errors.push("配置版本不能为空".to_string());
        }

        if let Err(e) = self.validate_commands_config(&config.commands) {
            errors.push(format!("命令配置验证失败: {}", e));
        }

        self.validate_shortcuts_config(&config.shortcuts, &mut errors, &mut warnings);

        if !errors.is_empty() {
            bail!("配置验证失败: {}", errors.join(", "));
        }

        for warning in &warnings {
            warn!("配置警告: {}", warning);
        }
        info!("配置验证通过");
        Ok(warnings)
    }

    fn validate_commands_config(&self, commands: &CommandsConfig) -> AppResult<()> {
        if !HISTORY_LIMIT_RANGE.contains(&commands.history_limit) {
            bail!(
                "执行历史容量必须在{}-{}之间，当前值: {}",
                HISTORY_LIMIT_RANGE.start(),
                HISTORY_LIMIT_RANGE.end(),
                commands.history_limit
            );
        }
        Ok(())
    }

    fn validate_shortcuts_config(
        &self,
        shortcuts: &ShortcutsConfig,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        let mut seen: HashMap<String, &str> = HashMap::new();

        for (index, binding) in shortcuts.bindings.iter().enumerate() {
            if binding.command.trim().is_empty() {
                errors.push(format!("第{}个快捷键绑定缺少命令", index + 1));
            }

            let combination = match binding.combination() {
                Ok(combination) => combination,
                Err(e) => {
                    errors.push(format!("第{}个快捷键绑定无效: {}", index + 1, e));
                    continue;
                }
            };

            if binding.modifiers.is_empty() {
                warnings.push(format!(
                    "快捷键 {} 没有修饰键，可能与普通输入冲突",
                    combination
                ));
            }

            let canonical = combination.canonical();
            if let Some(existing) = seen.get(&canonical) {
                errors.push(format!(
                    "快捷键 {} 重复绑定: {} 与 {}",
                    canonical, existing, binding.command
                ));
            } else {
                seen.insert(canonical, &binding.command);
            }
        }
    }
}

impl Default for TomlConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
