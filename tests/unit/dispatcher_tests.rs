//! 快捷键分发测试：精确修饰键匹配、守卫、被动监听、启用开关

#[path = "../test_utils/mod.rs"]
mod test_utils;

#[cfg(test)]
mod tests {
    use super::test_utils::fixtures::{catalog_with, counting_command, failing_command, noop_command};
    use codeforge_lib::commands::{ExecutionGuard, ExecutionSource};
    use codeforge_lib::shortcuts::{
        KeyCombination, KeyDispatch, KeyPress, KeyTarget, Modifier, ShortcutDispatcher,
        ShortcutError,
    };
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    fn combo(input: &str) -> KeyCombination {
        KeyCombination::parse(input).unwrap()
    }

    #[test]
    fn test_second_registration_keeps_first_binding() {
        let dispatcher = ShortcutDispatcher::new(catalog_with(vec![]));

        dispatcher
            .register_shortcut("file.save", &combo("Ctrl+S"), ExecutionGuard::Unguarded)
            .unwrap();
        let result =
            dispatcher.register_shortcut("file.saveAll", &combo("control+s"), ExecutionGuard::Unguarded);

        assert!(matches!(result, Err(ShortcutError::Conflict { .. })));
        assert_eq!(dispatcher.len(), 1);
        assert_eq!(dispatcher.get_all_shortcuts()[0].command_id, "file.save");
        assert_eq!(dispatcher.get_shortcut_for_command("file.saveAll"), None);
    }

    #[test]
    fn test_register_from_catalog_skips_hidden_and_conflicts() {
        let catalog = catalog_with(vec![
            noop_command("file.save", "Save")
                .with_keybinding(combo("Ctrl+S"))
                .with_priority(95),
            noop_command("file.saveCopy", "Save Copy").with_keybinding(combo("Ctrl+S")),
            noop_command("internal.debug", "Debug")
                .with_keybinding(combo("Ctrl+D"))
                .hidden(),
            noop_command("edit.undo", "Undo").with_keybinding(combo("Ctrl+Z")),
            noop_command("view.zen", "Zen Mode"),
        ]);
        let dispatcher = ShortcutDispatcher::new(Arc::clone(&catalog));

        assert_eq!(dispatcher.register_from_catalog(), 2);
        assert_eq!(
            dispatcher.get_shortcut_for_command("file.save"),
            Some(combo("Ctrl+S"))
        );
        assert!(dispatcher.is_shortcut_available(&combo("Ctrl+D")));

        let conflicts = dispatcher.detect_catalog_conflicts();
        assert!(conflicts.has_conflicts);
        assert_eq!(conflicts.conflicts[0].key_combination, "ctrl+s");
        assert_eq!(
            conflicts.conflicts[0].command_ids,
            vec!["file.save", "file.saveCopy"]
        );
    }

    #[tokio::test]
    async fn test_exact_modifier_match() {
        let (escape, counter) = counting_command("view.closePanel", "Close Panel");
        let catalog = catalog_with(vec![escape]);
        let dispatcher = ShortcutDispatcher::new(Arc::clone(&catalog));
        dispatcher
            .register_shortcut("view.closePanel", &combo("Escape"), ExecutionGuard::Unguarded)
            .unwrap();

        let mut with_ctrl = KeyPress::new("Escape").with_ctrl();
        assert_eq!(
            dispatcher.handle_key_press(&mut with_ctrl).await,
            KeyDispatch::Forwarded
        );
        assert!(!with_ctrl.default_prevented());
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        let mut plain = KeyPress::new("Esc");
        assert_eq!(
            dispatcher.handle_key_press(&mut plain).await,
            KeyDispatch::Executed {
                command_id: "view.closePanel".to_string()
            }
        );
        assert!(plain.default_prevented());
        assert!(plain.propagation_stopped());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_extra_modifier_does_not_trigger_subset_binding() {
        let (save, counter) = counting_command("file.save", "Save");
        let dispatcher = ShortcutDispatcher::new(catalog_with(vec![save]));
        dispatcher
            .register_shortcut("file.save", &combo("Ctrl+S"), ExecutionGuard::Unguarded)
            .unwrap();

        let mut event = KeyPress::new("s").with_ctrl().with_shift();
        assert_eq!(dispatcher.handle_key_press(&mut event).await, KeyDispatch::Forwarded);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_keyboard_source_recorded() {
        let catalog = catalog_with(vec![noop_command("edit.undo", "Undo")]);
        let dispatcher = ShortcutDispatcher::new(Arc::clone(&catalog));
        dispatcher
            .register_shortcut(
                "edit.undo",
                &KeyCombination::new("z", [Modifier::Ctrl]),
                ExecutionGuard::Unguarded,
            )
            .unwrap();

        let mut event = KeyPress::from_combination(&combo("Ctrl+Z"));
        dispatcher.handle_key_press(&mut event).await;

        let recent = catalog.get_recent(1);
        assert_eq!(recent[0].command_id, "edit.undo");
        assert_eq!(recent[0].source, ExecutionSource::Keyboard);
    }

    #[tokio::test]
    async fn test_guard_rejection_forwards_to_listeners() {
        let (format, counter) = counting_command("edit.format", "Format");
        let dispatcher = ShortcutDispatcher::new(catalog_with(vec![format]));
        let allowed = Arc::new(AtomicBool::new(false));
        let guard = {
            let allowed = Arc::clone(&allowed);
            ExecutionGuard::predicate(move || allowed.load(Ordering::SeqCst))
        };
        dispatcher
            .register_shortcut("edit.format", &combo("Alt+Shift+F"), guard)
            .unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let _listener = {
            let seen = Arc::clone(&seen);
            dispatcher.add_key_listener(move |event: &KeyPress| {
                seen.lock().push(event.combination().canonical());
            })
        };

        let mut event = KeyPress::new("f").with_alt().with_shift();
        assert_eq!(dispatcher.handle_key_press(&mut event).await, KeyDispatch::Forwarded);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(*seen.lock(), vec!["alt+shift+f"]);

        allowed.store(true, Ordering::SeqCst);
        let mut event = KeyPress::new("f").with_alt().with_shift();
        assert!(matches!(
            dispatcher.handle_key_press(&mut event).await,
            KeyDispatch::Executed { .. }
        ));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_binding_checks_descriptor_guard_once() {
        let allowed = Arc::new(AtomicBool::new(true));
        let guard_calls = Arc::new(AtomicUsize::new(0));
        let guard = {
            let allowed = Arc::clone(&allowed);
            let guard_calls = Arc::clone(&guard_calls);
            ExecutionGuard::predicate(move || {
                guard_calls.fetch_add(1, Ordering::SeqCst);
                allowed.load(Ordering::SeqCst)
            })
        };
        let (cut, counter) = counting_command("edit.cut", "Cut");
        let catalog = catalog_with(vec![cut
            .with_keybinding(combo("Ctrl+X"))
            .with_guard(guard)]);
        let dispatcher = ShortcutDispatcher::new(Arc::clone(&catalog));
        assert_eq!(dispatcher.register_from_catalog(), 1);

        let listener_calls = Arc::new(AtomicUsize::new(0));
        let _listener = {
            let listener_calls = Arc::clone(&listener_calls);
            dispatcher.add_key_listener(move |_: &KeyPress| {
                listener_calls.fetch_add(1, Ordering::SeqCst);
            })
        };

        let mut event = KeyPress::new("x").with_ctrl();
        assert_eq!(
            dispatcher.handle_key_press(&mut event).await,
            KeyDispatch::Executed {
                command_id: "edit.cut".to_string()
            }
        );
        assert_eq!(guard_calls.load(Ordering::SeqCst), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        allowed.store(false, Ordering::SeqCst);
        let mut event = KeyPress::new("x").with_ctrl();
        assert_eq!(
            dispatcher.handle_key_press(&mut event).await,
            KeyDispatch::Claimed {
                command_id: "edit.cut".to_string()
            }
        );
        assert!(event.default_prevented());
        assert_eq!(guard_calls.load(Ordering::SeqCst), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(listener_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_failure_is_swallowed() {
        let catalog = catalog_with(vec![failing_command("file.save", "Save", "read-only")]);
        let dispatcher = ShortcutDispatcher::new(Arc::clone(&catalog));
        dispatcher
            .register_shortcut("file.save", &combo("Ctrl+S"), ExecutionGuard::Unguarded)
            .unwrap();

        let mut event = KeyPress::new("s").with_ctrl();
        assert!(matches!(
            dispatcher.handle_key_press(&mut event).await,
            KeyDispatch::Executed { .. }
        ));
        assert_eq!(catalog.history_len(), 0);
    }

    #[tokio::test]
    async fn test_text_input_and_disabled_states() {
        let (save, counter) = counting_command("file.save", "Save");
        let dispatcher = ShortcutDispatcher::new(catalog_with(vec![save]));
        dispatcher
            .register_shortcut("file.save", &combo("Ctrl+S"), ExecutionGuard::Unguarded)
            .unwrap();

        let listener_calls = Arc::new(Mutex::new(0usize));
        let _listener = {
            let listener_calls = Arc::clone(&listener_calls);
            dispatcher.add_key_listener(move |_: &KeyPress| {
                *listener_calls.lock() += 1;
            })
        };

        let mut in_editor = KeyPress::new("s")
            .with_ctrl()
            .with_target(KeyTarget::ContentEditable);
        assert_eq!(
            dispatcher.handle_key_press(&mut in_editor).await,
            KeyDispatch::TextInput
        );

        dispatcher.disable();
        assert!(!dispatcher.is_enabled());
        let mut event = KeyPress::new("s").with_ctrl();
        assert_eq!(dispatcher.handle_key_press(&mut event).await, KeyDispatch::Disabled);

        dispatcher.enable();
        let mut event = KeyPress::new("s").with_ctrl();
        assert!(matches!(
            dispatcher.handle_key_press(&mut event).await,
            KeyDispatch::Executed { .. }
        ));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(*listener_calls.lock(), 0);
    }

    #[test]
    fn test_display_text() {
        let dispatcher = ShortcutDispatcher::new(catalog_with(vec![]));
        assert_eq!(dispatcher.get_display_text(&combo("shift+ctrl+p")), "Ctrl+Shift+P");
        assert_eq!(dispatcher.get_display_text(&combo("Cmd+Backspace")), "Cmd+⌫");
        assert_eq!(dispatcher.get_display_text(&combo("Alt+Up")), "Alt+↑");
    }
}
