/*!
 * TOML配置写入器
 *
 * 先写入临时文件再重命名，避免写入中断留下不完整的配置文件
 */

use crate::{config::types::WorkbenchConfig, utils::error::AppResult};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// TOML配置写入器
pub struct TomlConfigWriter {
    config_path: PathBuf,
}

impl TomlConfigWriter {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// 序列化配置为TOML文本
    pub fn to_toml_string(config: &WorkbenchConfig) -> AppResult<String> {
        toml::to_string_pretty(config).context("配置序列化为TOML失败")
    }

    /// 保存配置到文件
    pub async fn config_save(&self, config: &WorkbenchConfig) -> AppResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("无法创建配置目录: {}", parent.display()))?;
        }

        let content = Self::to_toml_string(config)?;
        self.atomic_write(&content).await
    }

    async fn atomic_write(&self, content: &str) -> AppResult<()> {
        let temp_path = self
            .config_path
            .with_extension(format!("tmp.{}", std::process::id()));

        fs::write(&temp_path, content)
            .await
            .with_context(|| format!("无法写入临时配置文件: {}", temp_path.display()))?;

        if let Err(e) = fs::rename(&temp_path, &self.config_path).await {
            warn!("重命名临时配置文件失败: {}", e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(e).with_context(|| {
                format!("无法写入配置文件: {}", self.config_path.display())
            });
        }

        debug!("配置文件写入成功: {}", self.config_path.display());
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
