//! 应用程序初始化

pub mod error;
pub mod workbench;

pub use error::{SetupError, SetupResult};
pub use workbench::{PaletteEntry, Workbench};

use tracing::info;
use tracing_subscriber::{self, EnvFilter};

/// 初始化日志系统
///
/// `RUST_LOG` 优先，未设置时使用配置中的默认级别。
pub fn init_logging(default_level: &str) -> SetupResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_level(true)
        .try_init()
        .map_err(|e| SetupError::Logging(e.to_string()))?;

    info!("日志系统初始化完成");
    Ok(())
}
