/*!
 * 配置系统路径管理模块
 *
 * 提供统一的配置文件路径管理，支持跨平台路径解析和目录创建。
 */

use crate::config::{APP_DIR_NAME, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOGS_DIR_NAME};
use crate::utils::error::AppResult;
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};

/// 配置路径管理器
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// 应用程序数据目录
    app_data_dir: PathBuf,

    /// 配置目录
    config_dir: PathBuf,

    /// 日志目录
    logs_dir: PathBuf,
}

impl ConfigPaths {
    /// 根据当前平台确定配置目录并创建
    ///
    /// - Windows: `%APPDATA%\codeforge`
    /// - macOS: `~/Library/Application Support/codeforge`
    /// - Linux: `~/.config/codeforge`
    pub fn new() -> AppResult<Self> {
        let base = dirs::config_dir().ok_or_else(|| anyhow!("无法获取配置目录"))?;
        Self::with_app_data_dir(base.join(APP_DIR_NAME))
    }

    /// 使用自定义应用数据目录
    pub fn with_app_data_dir<P: AsRef<Path>>(app_data_dir: P) -> AppResult<Self> {
        let app_data_dir = app_data_dir.as_ref().to_path_buf();
        let paths = Self {
            config_dir: app_data_dir.join(CONFIG_DIR_NAME),
            logs_dir: app_data_dir.join(LOGS_DIR_NAME),
            app_data_dir,
        };

        paths.ensure_directories_exist()?;
        Ok(paths)
    }

    fn ensure_directories_exist(&self) -> AppResult<()> {
        for dir in [&self.app_data_dir, &self.config_dir, &self.logs_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("无法创建目录: {}", dir.display()))?;
            }
        }
        Ok(())
    }

    pub fn app_data_dir(&self) -> &Path {
        &self.app_data_dir
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// 主配置文件路径
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }
}
