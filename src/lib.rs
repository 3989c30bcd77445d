//! CodeForge 工作台核心
//!
//! 代码编辑器外壳的命令与快捷键核心，提供：
//! - 命令目录：注册、查询、排序搜索和带历史记录的命令执行
//! - 快捷键分发：规范按键组合、按键事件分发和被动监听
//! - 信号总线：主题切换、打开命令面板等跨组件信号
//! - 工作台：基于 TOML 配置组合以上组件

pub mod commands; // 命令目录与执行历史
pub mod config; // TOML 配置系统
pub mod events; // 信号总线与监听器
pub mod setup; // 日志初始化与工作台组合
pub mod shortcuts; // 快捷键系统
pub mod utils; // 工具和错误处理模块

pub use commands::{
    handler_fn, CommandCatalog, CommandCategory, CommandDescriptor, CommandError,
    ExecutionGuard, ExecutionOutcome, ExecutionRecord, ExecutionSource,
};
pub use events::{Signal, SignalBus, Subscription};
pub use setup::{init_logging, Workbench};
pub use shortcuts::{KeyCombination, KeyPress, Modifier, ShortcutDispatcher};
