//! 命令系统错误类型

use thiserror::Error;

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    /// 重复注册，原有命令保持不变
    #[error("命令已注册: {command_id}")]
    AlreadyRegistered { command_id: String },

    #[error("无效的命令描述: {reason}")]
    InvalidDescriptor { reason: String },

    /// 命令处理器自身失败，唯一会传播给调用方的执行错误
    #[error("命令执行失败: {command_id} - {source}")]
    ExecutionFailed {
        command_id: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CommandError {
    pub fn command_id(&self) -> Option<&str> {
        match self {
            CommandError::AlreadyRegistered { command_id }
            | CommandError::ExecutionFailed { command_id, .. } => Some(command_id),
            CommandError::InvalidDescriptor { .. } => None,
        }
    }
}
