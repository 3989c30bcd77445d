/*!
 * 命令系统类型定义
 *
 * 定义命令描述、命令类别、执行来源、执行守卫和执行记录等核心数据结构。
 */

use crate::shortcuts::KeyCombination;
use crate::utils::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// 命令参数，由具体命令自行解释
pub type CommandArgs = Option<serde_json::Value>;

/// 命令类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    Theme,
    File,
    Edit,
    View,
    Search,
    Git,
    Terminal,
    Debug,
    Help,
    Extension,
    #[default]
    General,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 11] = [
        CommandCategory::Theme,
        CommandCategory::File,
        CommandCategory::Edit,
        CommandCategory::View,
        CommandCategory::Search,
        CommandCategory::Git,
        CommandCategory::Terminal,
        CommandCategory::Debug,
        CommandCategory::Help,
        CommandCategory::Extension,
        CommandCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandCategory::Theme => "theme",
            CommandCategory::File => "file",
            CommandCategory::Edit => "edit",
            CommandCategory::View => "view",
            CommandCategory::Search => "search",
            CommandCategory::Git => "git",
            CommandCategory::Terminal => "terminal",
            CommandCategory::Debug => "debug",
            CommandCategory::Help => "help",
            CommandCategory::Extension => "extension",
            CommandCategory::General => "general",
        }
    }
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommandCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        CommandCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == lower)
            .ok_or_else(|| format!("未知的命令类别: {}", s))
    }
}

/// 命令执行来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionSource {
    Palette,
    Keyboard,
    Menu,
    Programmatic,
}

impl fmt::Display for ExecutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionSource::Palette => write!(f, "palette"),
            ExecutionSource::Keyboard => write!(f, "keyboard"),
            ExecutionSource::Menu => write!(f, "menu"),
            ExecutionSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// 命令处理器
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, args: CommandArgs) -> AppResult<()>;
}

/// 基于闭包的命令处理器，通过 [`handler_fn`] 创建
pub struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(CommandArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    async fn execute(&self, args: CommandArgs) -> AppResult<()> {
        (self.f)(args).await
    }
}

/// 将异步闭包包装为命令处理器
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn CommandHandler>
where
    F: Fn(CommandArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    Arc::new(FnHandler { f })
}

/// 执行守卫
///
/// `Unguarded` 总是允许执行；`Predicate` 在每次执行前求值。
#[derive(Clone, Default)]
pub enum ExecutionGuard {
    #[default]
    Unguarded,
    Predicate(Arc<dyn Fn() -> bool + Send + Sync>),
}

impl ExecutionGuard {
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        ExecutionGuard::Predicate(Arc::new(predicate))
    }

    pub fn allows(&self) -> bool {
        match self {
            ExecutionGuard::Unguarded => true,
            ExecutionGuard::Predicate(predicate) => predicate(),
        }
    }

    pub fn is_guarded(&self) -> bool {
        matches!(self, ExecutionGuard::Predicate(_))
    }
}

impl fmt::Debug for ExecutionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionGuard::Unguarded => write!(f, "Unguarded"),
            ExecutionGuard::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// 命令描述
#[derive(Clone)]
pub struct CommandDescriptor {
    /// 命名空间形式的唯一 ID，例如 `file.save`
    pub id: String,
    /// 显示标题，也是搜索的主要依据
    pub title: String,
    pub description: Option<String>,
    pub category: CommandCategory,
    /// 额外的搜索关键词
    pub keywords: Vec<String>,
    pub keybinding: Option<KeyCombination>,
    /// 优先级，数值越大排序越靠前
    pub priority: i32,
    /// 隐藏命令不出现在列表和搜索结果中，但可以直接执行
    pub hidden: bool,
    pub handler: Arc<dyn CommandHandler>,
    pub guard: ExecutionGuard,
}

impl CommandDescriptor {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: CommandCategory,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category,
            keywords: Vec::new(),
            keybinding: None,
            priority: 0,
            hidden: false,
            handler,
            guard: ExecutionGuard::Unguarded,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keybinding(mut self, keybinding: KeyCombination) -> Self {
        self.keybinding = Some(keybinding);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_guard(mut self, guard: ExecutionGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn can_execute(&self) -> bool {
        self.guard.allows()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("keywords", &self.keywords)
            .field("keybinding", &self.keybinding)
            .field("priority", &self.priority)
            .field("hidden", &self.hidden)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

/// 命令执行记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub command_id: String,
    pub timestamp: DateTime<Utc>,
    pub source: ExecutionSource,
    pub args: CommandArgs,
}

impl ExecutionRecord {
    pub fn new(command_id: impl Into<String>, source: ExecutionSource, args: CommandArgs) -> Self {
        Self {
            command_id: command_id.into(),
            timestamp: Utc::now(),
            source,
            args,
        }
    }
}
