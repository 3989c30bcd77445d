/*!
 * 内置命令
 *
 * 工作台默认提供的命令。命令本身不直接操作界面，而是在信号总线上
 * 发出对应信号，由界面层订阅处理。
 */

use super::registry::CommandCatalog;
use super::types::{handler_fn, CommandArgs, CommandCategory, CommandDescriptor, CommandHandler};
use crate::events::{names, SignalBus};
use crate::shortcuts::{KeyCombination, Modifier};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// 发出信号的命令处理器
///
/// 有固定载荷时使用固定载荷，否则转发命令参数。
fn emit_signal(
    bus: &Arc<SignalBus>,
    signal: &'static str,
    fixed_payload: Option<Value>,
) -> Arc<dyn CommandHandler> {
    let bus = Arc::clone(bus);
    handler_fn(move |args: CommandArgs| {
        let bus = Arc::clone(&bus);
        let payload = fixed_payload.clone().or(args);
        async move {
            bus.emit(signal, payload);
            Ok(())
        }
    })
}

fn ctrl(key: &str) -> KeyCombination {
    KeyCombination::new(key, [Modifier::Ctrl])
}

fn ctrl_shift(key: &str) -> KeyCombination {
    KeyCombination::new(key, [Modifier::Ctrl, Modifier::Shift])
}

/// 内置命令列表
pub fn builtin_commands(bus: &Arc<SignalBus>) -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new(
            "view.commandPalette",
            "Show Command Palette",
            CommandCategory::View,
            emit_signal(bus, names::PALETTE_OPEN, None),
        )
        .with_description("Search and run any command")
        .with_keywords(["palette", "commands", "run"])
        .with_keybinding(ctrl_shift("p"))
        .with_priority(100),
        CommandDescriptor::new(
            "theme.toggle",
            "Toggle Theme",
            CommandCategory::Theme,
            emit_signal(bus, names::THEME_TOGGLE, None),
        )
        .with_description("Switch between light and dark themes")
        .with_keywords(["dark", "light", "appearance"])
        .with_priority(60),
        CommandDescriptor::new(
            "theme.light",
            "Theme: Light",
            CommandCategory::Theme,
            emit_signal(bus, names::THEME_SET, Some(json!({ "theme": "light" }))),
        )
        .with_keywords(["appearance", "color"])
        .with_priority(40),
        CommandDescriptor::new(
            "theme.dark",
            "Theme: Dark",
            CommandCategory::Theme,
            emit_signal(bus, names::THEME_SET, Some(json!({ "theme": "dark" }))),
        )
        .with_keywords(["appearance", "color"])
        .with_priority(40),
        CommandDescriptor::new(
            "file.new",
            "New File",
            CommandCategory::File,
            emit_signal(bus, names::FILE_NEW, None),
        )
        .with_description("Create a new untitled file")
        .with_keywords(["create", "untitled"])
        .with_keybinding(ctrl("n"))
        .with_priority(90),
        CommandDescriptor::new(
            "file.open",
            "Open File",
            CommandCategory::File,
            emit_signal(bus, names::FILE_OPEN, None),
        )
        .with_description("Open a file from disk")
        .with_keywords(["load", "browse"])
        .with_keybinding(ctrl("o"))
        .with_priority(85),
        CommandDescriptor::new(
            "file.save",
            "Save",
            CommandCategory::File,
            emit_signal(bus, names::FILE_SAVE, None),
        )
        .with_description("Save the active file")
        .with_keywords(["write", "persist"])
        .with_keybinding(ctrl("s"))
        .with_priority(95),
        CommandDescriptor::new(
            "file.saveAs",
            "Save As",
            CommandCategory::File,
            emit_signal(bus, names::FILE_SAVE_AS, None),
        )
        .with_description("Save the active file under a new name")
        .with_keywords(["write", "copy", "rename"])
        .with_keybinding(ctrl_shift("s"))
        .with_priority(70),
        CommandDescriptor::new(
            "edit.undo",
            "Undo",
            CommandCategory::Edit,
            emit_signal(bus, names::EDIT_UNDO, None),
        )
        .with_keywords(["revert", "back"])
        .with_keybinding(ctrl("z"))
        .with_priority(80),
        CommandDescriptor::new(
            "edit.redo",
            "Redo",
            CommandCategory::Edit,
            emit_signal(bus, names::EDIT_REDO, None),
        )
        .with_keywords(["repeat", "forward"])
        .with_keybinding(ctrl_shift("z"))
        .with_priority(80),
        CommandDescriptor::new(
            "search.find",
            "Find",
            CommandCategory::Search,
            emit_signal(bus, names::SEARCH_FIND, None),
        )
        .with_description("Find text in the active editor")
        .with_keywords(["search", "lookup"])
        .with_keybinding(ctrl("f"))
        .with_priority(75),
        CommandDescriptor::new(
            "view.toggleSidebar",
            "Toggle Sidebar",
            CommandCategory::View,
            emit_signal(bus, names::SIDEBAR_TOGGLE, None),
        )
        .with_keywords(["explorer", "panel", "layout"])
        .with_keybinding(ctrl("b"))
        .with_priority(50),
        CommandDescriptor::new(
            "view.toggleStatusBar",
            "Toggle Status Bar",
            CommandCategory::View,
            emit_signal(bus, names::STATUSBAR_TOGGLE, None),
        )
        .with_keywords(["layout", "footer"])
        .with_priority(40),
        CommandDescriptor::new(
            "help.shortcuts",
            "Keyboard Shortcuts",
            CommandCategory::Help,
            emit_signal(bus, names::HELP_SHORTCUTS, None),
        )
        .with_description("Show all keyboard shortcuts")
        .with_keywords(["keybindings", "hotkeys"])
        .with_keybinding(ctrl("/"))
        .with_priority(30),
        CommandDescriptor::new(
            "general.reloadWindow",
            "Reload Window",
            CommandCategory::General,
            emit_signal(bus, names::WINDOW_RELOAD, None),
        )
        .with_keywords(["refresh", "restart"])
        .with_keybinding(ctrl("r"))
        .with_priority(20),
    ]
}

/// 注册内置命令，返回注册数量
pub fn register_builtin_commands(catalog: &CommandCatalog, bus: &Arc<SignalBus>) -> usize {
    let registered = catalog.register_all(builtin_commands(bus));
    info!("内置命令注册完成: {} 个", registered);
    registered
}
