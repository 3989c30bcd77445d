/*!
 * 快捷键平台适配器模块
 *
 * 处理平台特定的修饰键映射：非 macOS 平台上 `meta` (Cmd) 映射为 `ctrl`。
 */

use super::types::{KeyCombination, Modifier, Platform};

/// 平台适配器
#[derive(Debug, Clone, Copy)]
pub struct PlatformAdapter {
    platform: Platform,
}

impl PlatformAdapter {
    /// 使用当前平台创建
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// 将组合适配到目标平台
    pub fn adapt(&self, combination: &KeyCombination) -> KeyCombination {
        match self.platform {
            Platform::MacOS => combination.clone(),
            Platform::Windows | Platform::Linux => combination.map_modifiers(|modifier| match modifier {
                Modifier::Meta => Modifier::Ctrl,
                other => other,
            }),
        }
    }
}

impl Default for PlatformAdapter {
    fn default() -> Self {
        Self::new()
    }
}
