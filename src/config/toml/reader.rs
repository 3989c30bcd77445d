/*!
 * TOML配置读取器
 *
 * 负责从文件系统读取和解析TOML配置文件
 */

use crate::{
    config::{defaults::create_default_config, paths::ConfigPaths, types::WorkbenchConfig},
    utils::error::AppResult,
};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// TOML配置读取器
pub struct TomlConfigReader {
    config_path: PathBuf,
}

impl TomlConfigReader {
    /// 使用平台默认配置路径
    pub fn new() -> AppResult<Self> {
        let paths = ConfigPaths::new()?;
        Ok(Self::with_path(paths.config_file()))
    }

    /// 使用指定的配置文件路径
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// 从文件系统加载TOML配置，文件不存在时返回默认配置
    pub async fn load_config(&self) -> AppResult<WorkbenchConfig> {
        debug!("开始加载TOML配置: {:?}", self.config_path);

        if !self.config_path.exists() {
            info!("配置文件不存在，使用默认配置: {}", self.config_path.display());
            return Ok(create_default_config());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("无法读取配置文件: {}", self.config_path.display()))?;

        let config = self.parse_toml_content(&content)?;
        info!("配置文件解析成功");
        Ok(config)
    }

    /// 解析TOML内容为配置结构
    pub fn parse_toml_content(&self, content: &str) -> AppResult<WorkbenchConfig> {
        toml::from_str::<WorkbenchConfig>(content)
            .with_context(|| format!("TOML配置解析失败 (文件: {})", self.config_path.display()))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
