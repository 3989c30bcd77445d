/*!
 * 配置系统默认值
 */

use crate::commands::DEFAULT_HISTORY_LIMIT;
use crate::config::types::*;
use crate::config::CONFIG_VERSION;

/// 创建默认配置
pub fn create_default_config() -> WorkbenchConfig {
    WorkbenchConfig {
        version: CONFIG_VERSION.to_string(),
        logging: create_default_logging_config(),
        commands: create_default_commands_config(),
        shortcuts: create_default_shortcuts_config(),
    }
}

pub fn create_default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: "info".to_string(),
    }
}

pub fn create_default_commands_config() -> CommandsConfig {
    CommandsConfig {
        history_limit: DEFAULT_HISTORY_LIMIT,
    }
}

/// 默认没有用户绑定，内置命令自带快捷键
pub fn create_default_shortcuts_config() -> ShortcutsConfig {
    ShortcutsConfig {
        enabled: true,
        adapt_to_platform: false,
        bindings: Vec::new(),
    }
}
