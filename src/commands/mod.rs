/*!
 * 命令系统
 *
 * 命令目录负责命令的注册、查询、搜索和执行，
 * 执行记录保存在有容量上限的历史缓冲区中。
 */

pub mod builtin;
pub mod error;
pub mod history;
pub mod registry;
pub mod search;
pub mod types;

pub use builtin::{builtin_commands, register_builtin_commands};
pub use error::{CommandError, CommandResult};
pub use history::{
    CommandUsage, ExecutionHistory, ExecutionStats, DEFAULT_HISTORY_LIMIT, STATS_MOST_USED_LIMIT,
};
pub use registry::{CommandCatalog, ExecutionObserver, ExecutionOutcome};
pub use search::ScoredCommand;
pub use types::{
    handler_fn, CommandArgs, CommandCategory, CommandDescriptor, CommandHandler, ExecutionGuard,
    ExecutionRecord, ExecutionSource, FnHandler,
};
