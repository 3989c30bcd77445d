/*!
 * 快捷键系统
 *
 * 提供按键组合的规范化与解析、快捷键绑定表、按键分发、
 * 冲突检测和平台适配。
 */

pub mod conflict_detector;
pub mod dispatcher;
pub mod display;
pub mod error;
pub mod platform_adapter;
pub mod types;

pub use conflict_detector::{ConflictDetectionResult, ShortcutConflict, ShortcutConflictDetector};
pub use dispatcher::{KeyDispatch, ShortcutDispatcher};
pub use display::get_display_text;
pub use error::{ShortcutError, ShortcutResult};
pub use platform_adapter::PlatformAdapter;
pub use types::{
    normalize_key, KeyCombination, KeyListener, KeyPress, KeyTarget, Modifier, Platform,
    ShortcutBinding,
};
