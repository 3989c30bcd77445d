/*!
 * 快捷键系统错误类型
 */

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("快捷键 {combination} 已绑定到命令 {existing_command}")]
    Conflict {
        combination: String,
        existing_command: String,
    },
    #[error("快捷键缺少主按键")]
    EmptyKey,
    #[error("未知的修饰键: {modifier}")]
    UnknownModifier { modifier: String },
    #[error("重复的修饰键: {modifier}")]
    DuplicateModifier { modifier: String },
    #[error("快捷键包含多个主按键: {input}")]
    MultipleKeys { input: String },
}

pub type ShortcutResult<T> = Result<T, ShortcutError>;
