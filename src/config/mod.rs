/*!
 * 配置系统模块
 *
 * 基于 TOML 的工作台配置：日志级别、命令历史容量和快捷键设置。
 */

pub mod defaults;
pub mod paths;
pub mod toml;
pub mod types;

pub use defaults::*;
pub use paths::ConfigPaths;
pub use self::toml::{TomlConfigReader, TomlConfigValidator, TomlConfigWriter};
pub use types::*;

/// 配置系统版本
pub const CONFIG_VERSION: &str = "1.0.0";

/// 应用目录名
pub const APP_DIR_NAME: &str = "codeforge";

/// 配置目录名
pub const CONFIG_DIR_NAME: &str = "config";

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// 日志目录名
pub const LOGS_DIR_NAME: &str = "logs";
