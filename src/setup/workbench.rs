/*!
 * 工作台
 *
 * 组合信号总线、命令目录和快捷键分发器，每个进程构建一次。
 */

use super::error::{SetupError, SetupResult};
use crate::commands::{
    register_builtin_commands, CommandArgs, CommandCatalog, CommandCategory, CommandResult,
    ExecutionGuard, ExecutionOutcome, ExecutionSource,
};
use crate::config::{TomlConfigReader, TomlConfigValidator, WorkbenchConfig};
use crate::events::SignalBus;
use crate::shortcuts::{get_display_text, PlatformAdapter, ShortcutDispatcher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 命令面板中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: CommandCategory,
    /// 当前生效的快捷键显示文本
    pub shortcut: Option<String>,
}

pub struct Workbench {
    config: WorkbenchConfig,
    bus: Arc<SignalBus>,
    catalog: Arc<CommandCatalog>,
    dispatcher: Arc<ShortcutDispatcher>,
}

impl Workbench {
    /// 按配置构建工作台
    ///
    /// 先注册配置中的用户绑定，再注册命令自带的快捷键，冲突时用户绑定优先。
    pub fn bootstrap(config: WorkbenchConfig) -> SetupResult<Self> {
        TomlConfigValidator::new().validate_config(&config)?;

        let bus = Arc::new(SignalBus::new());
        let catalog = Arc::new(CommandCatalog::with_history_limit(
            config.commands.history_limit,
        ));

        let mut dispatcher = ShortcutDispatcher::new(Arc::clone(&catalog));
        if config.shortcuts.adapt_to_platform {
            dispatcher = dispatcher.with_platform_adapter(PlatformAdapter::new());
        }
        if !config.shortcuts.enabled {
            dispatcher.disable();
        }
        let dispatcher = Arc::new(dispatcher);

        register_builtin_commands(&catalog, &bus);

        let mut user_bindings = 0;
        for binding in &config.shortcuts.bindings {
            let combination = binding
                .combination()
                .map_err(|source| SetupError::Shortcut {
                    command: binding.command.clone(),
                    source,
                })?;

            if !catalog.contains(&binding.command) {
                warn!("快捷键绑定的命令尚未注册: {}", binding.command);
            }

            match dispatcher.register_shortcut(
                &binding.command,
                &combination,
                ExecutionGuard::Unguarded,
            ) {
                Ok(()) => user_bindings += 1,
                Err(e) => warn!("跳过用户快捷键 {} -> {}: {}", binding.key, binding.command, e),
            }
        }
        debug!(
            "用户快捷键: 已应用 {} / {} 个",
            user_bindings,
            config.shortcuts.bindings.len()
        );

        dispatcher.register_from_catalog();

        info!(
            "工作台初始化完成: {} 个命令, {} 个快捷键",
            catalog.len(),
            dispatcher.len()
        );

        Ok(Self {
            config,
            bus,
            catalog,
            dispatcher,
        })
    }

    /// 从配置文件加载并构建工作台
    pub async fn load(reader: &TomlConfigReader) -> SetupResult<Self> {
        let config = reader.load_config().await?;
        Self::bootstrap(config)
    }

    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    pub fn bus(&self) -> &Arc<SignalBus> {
        &self.bus
    }

    pub fn catalog(&self) -> &Arc<CommandCatalog> {
        &self.catalog
    }

    pub fn dispatcher(&self) -> &Arc<ShortcutDispatcher> {
        &self.dispatcher
    }

    /// 命令面板条目，按搜索排序
    pub fn palette_entries(&self, query: &str) -> Vec<PaletteEntry> {
        self.catalog
            .search(query)
            .into_iter()
            .map(|descriptor| PaletteEntry {
                shortcut: self
                    .dispatcher
                    .get_shortcut_for_command(&descriptor.id)
                    .map(|combination| get_display_text(&combination)),
                id: descriptor.id.clone(),
                title: descriptor.title.clone(),
                description: descriptor.description.clone(),
                category: descriptor.category,
            })
            .collect()
    }

    /// 从命令面板执行命令
    pub async fn execute_from_palette(
        &self,
        command_id: &str,
        args: CommandArgs,
    ) -> CommandResult<ExecutionOutcome> {
        self.catalog
            .execute_command(command_id, args, ExecutionSource::Palette)
            .await
    }

    /// 停止分发快捷键并移除所有监听器
    pub fn shutdown(&self) {
        self.dispatcher.disable();
        self.dispatcher.clear_key_listeners();
        self.catalog.clear_observers();
        self.bus.clear();
        info!("工作台已关闭");
    }
}
