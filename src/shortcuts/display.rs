/*!
 * 快捷键显示文本
 */

use super::types::{KeyCombination, Modifier};

/// 显示顺序：Ctrl、Cmd、Alt、Shift
const DISPLAY_ORDER: [(Modifier, &str); 4] = [
    (Modifier::Ctrl, "Ctrl"),
    (Modifier::Meta, "Cmd"),
    (Modifier::Alt, "Alt"),
    (Modifier::Shift, "Shift"),
];

/// 生成面向用户的快捷键文本，例如 `Ctrl+Shift+P`
pub fn get_display_text(combination: &KeyCombination) -> String {
    let mut parts: Vec<String> = DISPLAY_ORDER
        .iter()
        .filter(|(modifier, _)| combination.has(*modifier))
        .map(|(_, label)| label.to_string())
        .collect();

    parts.push(key_label(combination.key()));
    parts.join("+")
}

fn key_label(key: &str) -> String {
    match key {
        "space" => "Space".to_string(),
        "arrowup" => "↑".to_string(),
        "arrowdown" => "↓".to_string(),
        "arrowleft" => "←".to_string(),
        "arrowright" => "→".to_string(),
        "enter" => "↵".to_string(),
        "escape" => "Esc".to_string(),
        "backspace" => "⌫".to_string(),
        "delete" => "Del".to_string(),
        "tab" => "Tab".to_string(),
        other => other.to_uppercase(),
    }
}
