/*!
 * 配置系统数据类型定义
 *
 * 结构与 TOML 配置文件格式保持一致，缺失的节使用默认值。
 */

use crate::shortcuts::{KeyCombination, ShortcutResult};
use serde::{Deserialize, Serialize};

/// 主配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkbenchConfig {
    /// 配置版本
    pub version: String,

    /// 日志配置 (对应 TOML 中的 [logging])
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 命令配置 (对应 TOML 中的 [commands])
    #[serde(default)]
    pub commands: CommandsConfig,

    /// 快捷键配置 (对应 TOML 中的 [shortcuts])
    #[serde(default)]
    pub shortcuts: ShortcutsConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// 默认日志级别，`RUST_LOG` 优先
    pub level: String,
}

/// 命令配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommandsConfig {
    /// 执行历史容量
    pub history_limit: usize,
}

/// 快捷键配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShortcutsConfig {
    /// 是否启用快捷键分发
    pub enabled: bool,

    /// 非 macOS 平台上把 Cmd 映射为 Ctrl
    pub adapt_to_platform: bool,

    /// 用户自定义绑定 (对应 TOML 中的 [[shortcuts.bindings]])
    pub bindings: Vec<ShortcutBindingConfig>,
}

/// 用户自定义快捷键绑定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortcutBindingConfig {
    /// 主按键
    pub key: String,

    /// 修饰键列表
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// 绑定的命令 ID
    pub command: String,
}

impl ShortcutBindingConfig {
    pub fn new(key: &str, modifiers: &[&str], command: &str) -> Self {
        Self {
            key: key.to_string(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            command: command.to_string(),
        }
    }

    /// 解析为规范按键组合
    pub fn combination(&self) -> ShortcutResult<KeyCombination> {
        KeyCombination::from_parts(&self.key, &self.modifiers)
    }
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        super::defaults::create_default_config()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        super::defaults::create_default_logging_config()
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        super::defaults::create_default_commands_config()
    }
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        super::defaults::create_default_shortcuts_config()
    }
}
