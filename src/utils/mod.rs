// 工具模块

pub mod error;

pub use error::{app_error, AppError, AppResult};
