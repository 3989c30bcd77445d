/*!
 * 快捷键系统类型定义
 *
 * 定义修饰键、按键组合、按键事件和快捷键绑定等核心数据结构。
 */

use super::error::{ShortcutError, ShortcutResult};
use crate::commands::ExecutionGuard;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// 修饰键
///
/// 枚举顺序即规范字符串中的字母顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Ctrl,
    Meta,
    Shift,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Alt => "alt",
            Modifier::Ctrl => "ctrl",
            Modifier::Meta => "meta",
            Modifier::Shift => "shift",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modifier {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alt" | "option" => Ok(Modifier::Alt),
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "meta" | "cmd" | "command" | "super" | "win" => Ok(Modifier::Meta),
            "shift" => Ok(Modifier::Shift),
            _ => Err(ShortcutError::UnknownModifier {
                modifier: s.to_string(),
            }),
        }
    }
}

/// 平台类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOS,
    Linux,
}

impl Platform {
    /// 检测当前平台
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

/// 规范化主按键名称
///
/// 转为小写并折叠常见别名，例如 `esc` -> `escape`、`up` -> `arrowup`。
pub fn normalize_key(key: &str) -> String {
    if key == " " {
        return "space".to_string();
    }

    let lower = key.trim().to_lowercase();
    match lower.as_str() {
        "spacebar" => "space".to_string(),
        "esc" => "escape".to_string(),
        "return" => "enter".to_string(),
        "del" => "delete".to_string(),
        "up" => "arrowup".to_string(),
        "down" => "arrowdown".to_string(),
        "left" => "arrowleft".to_string(),
        "right" => "arrowright".to_string(),
        _ => lower,
    }
}

/// 快捷键按键组合
///
/// 始终以规范形式保存：主按键小写，修饰键为有序集合。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCombination {
    /// 主按键
    key: String,
    /// 修饰键集合
    modifiers: BTreeSet<Modifier>,
}

impl KeyCombination {
    pub fn new<I>(key: &str, modifiers: I) -> Self
    where
        I: IntoIterator<Item = Modifier>,
    {
        Self {
            key: normalize_key(key),
            modifiers: modifiers.into_iter().collect(),
        }
    }

    /// 不带修饰键的组合
    pub fn plain(key: &str) -> Self {
        Self::new(key, Vec::new())
    }

    /// 从配置中的按键和修饰键字符串创建
    pub fn from_parts<S: AsRef<str>>(key: &str, modifiers: &[S]) -> ShortcutResult<Self> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(ShortcutError::EmptyKey);
        }

        let mut parsed = BTreeSet::new();
        for modifier in modifiers {
            let modifier: Modifier = modifier.as_ref().parse()?;
            if !parsed.insert(modifier) {
                return Err(ShortcutError::DuplicateModifier {
                    modifier: modifier.to_string(),
                });
            }
        }

        Ok(Self {
            key,
            modifiers: parsed,
        })
    }

    /// 解析 `Ctrl+Shift+P` 形式的字符串
    pub fn parse(input: &str) -> ShortcutResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ShortcutError::EmptyKey);
        }
        // `Ctrl++` 中最后的 `+` 是主按键
        let (body, plus_key) = match trimmed.strip_suffix("++") {
            Some(body) => (body, Some("+")),
            None if trimmed == "+" => ("", Some("+")),
            None => (trimmed, None),
        };

        let mut modifiers = Vec::new();
        let mut key: Option<&str> = plus_key;
        for part in body.split('+').map(str::trim).filter(|part| !part.is_empty()) {
            match part.parse::<Modifier>() {
                Ok(_) => modifiers.push(part),
                Err(_) if key.is_none() => key = Some(part),
                Err(_) => {
                    return Err(ShortcutError::MultipleKeys {
                        input: input.to_string(),
                    })
                }
            }
        }

        let key = key.ok_or(ShortcutError::EmptyKey)?;
        Self::from_parts(key, &modifiers)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.modifiers.iter().copied()
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// 规范字符串，例如 `ctrl+shift+p`
    pub fn canonical(&self) -> String {
        let mut parts: Vec<&str> = self.modifiers.iter().map(Modifier::as_str).collect();
        parts.push(&self.key);
        parts.join("+")
    }

    /// 替换修饰键后的新组合
    pub fn map_modifiers<F>(&self, f: F) -> Self
    where
        F: Fn(Modifier) -> Modifier,
    {
        Self {
            key: self.key.clone(),
            modifiers: self.modifiers.iter().copied().map(f).collect(),
        }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for KeyCombination {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// 按键事件的目标元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyTarget {
    #[default]
    Document,
    Input,
    TextArea,
    ContentEditable,
}

impl KeyTarget {
    /// 目标是否接受文本输入
    pub fn accepts_text(&self) -> bool {
        !matches!(self, KeyTarget::Document)
    }
}

/// 原始按键事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub target: KeyTarget,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            target: KeyTarget::Document,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// 按组合构造事件
    pub fn from_combination(combination: &KeyCombination) -> Self {
        Self {
            ctrl: combination.has(Modifier::Ctrl),
            shift: combination.has(Modifier::Shift),
            alt: combination.has(Modifier::Alt),
            meta: combination.has(Modifier::Meta),
            ..Self::new(combination.key())
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_target(mut self, target: KeyTarget) -> Self {
        self.target = target;
        self
    }

    /// 事件对应的规范组合，修饰键精确取自事件标志
    pub fn combination(&self) -> KeyCombination {
        let flags = [
            (self.alt, Modifier::Alt),
            (self.ctrl, Modifier::Ctrl),
            (self.meta, Modifier::Meta),
            (self.shift, Modifier::Shift),
        ];
        KeyCombination::new(
            &self.key,
            flags
                .into_iter()
                .filter_map(|(pressed, modifier)| pressed.then_some(modifier)),
        )
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// 快捷键绑定
#[derive(Debug, Clone)]
pub struct ShortcutBinding {
    pub command_id: String,
    pub combination: KeyCombination,
    pub guard: ExecutionGuard,
}

/// 被动按键监听器，收到没有执行任何命令的按键事件
pub type KeyListener = dyn Fn(&KeyPress) + Send + Sync;
