//! 命令目录测试：注册、搜索排序、执行历史

#[path = "../test_utils/mod.rs"]
mod test_utils;

#[cfg(test)]
mod tests {
    use super::test_utils::fixtures::{
        catalog_with, counting_command, failing_command, noop_command,
    };
    use super::test_utils::helpers::{ids, titles};
    use codeforge_lib::commands::{
        CommandCatalog, CommandCategory, CommandError, ExecutionGuard, ExecutionOutcome,
        ExecutionRecord, ExecutionSource,
    };
    use crate::{assert_operation_failure, assert_operation_success};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_get_all_excludes_hidden_and_sorts_by_priority() {
        let catalog = catalog_with(vec![
            noop_command("a", "Alpha").with_priority(1),
            noop_command("b", "Beta").with_priority(5),
            noop_command("c", "Gamma").with_priority(1),
            noop_command("d", "Delta").with_priority(9).hidden(),
            noop_command("e", "Epsilon"),
        ]);

        let all = catalog.get_all();
        assert!(all.iter().all(|d| !d.hidden));
        assert_eq!(ids(&all), vec!["b", "a", "c", "e"]);
        assert!(all.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let catalog = CommandCatalog::new();
        assert_operation_success!(catalog.register(noop_command("file.save", "Save")), "首次注册");
        let err = assert_operation_failure!(
            catalog.register(noop_command("file.save", "Save Again")),
            "重复注册"
        );

        assert!(matches!(err, CommandError::AlreadyRegistered { .. }));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("file.save").unwrap().title, "Save");
    }

    #[test]
    fn test_get_by_category() {
        let mut toggle = noop_command("theme.toggle", "Toggle Theme");
        toggle.category = CommandCategory::Theme;
        let catalog = catalog_with(vec![
            noop_command("general.one", "One"),
            toggle,
            noop_command("general.two", "Two").with_priority(3),
        ]);

        assert_eq!(
            ids(&catalog.get_by_category(CommandCategory::General)),
            vec!["general.two", "general.one"]
        );
        assert_eq!(
            ids(&catalog.get_by_category(CommandCategory::Theme)),
            vec!["theme.toggle"]
        );
        assert!(catalog.get_by_category(CommandCategory::Git).is_empty());
    }

    #[test]
    fn test_empty_query_equals_get_all() {
        let catalog = catalog_with(vec![
            noop_command("a", "Alpha").with_priority(2),
            noop_command("b", "Beta"),
            noop_command("c", "Hidden").hidden(),
        ]);

        assert_eq!(ids(&catalog.search("")), ids(&catalog.get_all()));
        assert_eq!(ids(&catalog.search("   \t")), ids(&catalog.get_all()));
    }

    #[test]
    fn test_exact_title_ranks_first() {
        let catalog = catalog_with(vec![
            noop_command("view.toggleTerminal", "Toggle Terminal").with_priority(50),
            noop_command("terminal.new", "Terminal"),
            noop_command("terminal.kill", "Kill Terminal").with_priority(90),
        ]);

        let results = catalog.search_with_scores("terminal");
        assert_eq!(results[0].descriptor.id, "terminal.new");
        assert_eq!(results[0].score, 100);
        assert!(results[1..].iter().all(|r| r.score < 100));
    }

    #[test]
    fn test_fuzzy_boundary_cases() {
        let catalog = catalog_with(vec![noop_command("file.saveFile", "Save File")]);

        assert!(catalog.search("svf").is_empty());
        assert!(catalog.search("sf").is_empty());

        let results = catalog.search_with_scores("sav");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 80);
    }

    #[test]
    fn test_fuzzy_match_on_short_title() {
        let catalog = catalog_with(vec![noop_command("file.open", "Open")]);

        let results = catalog.search_with_scores("opn");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 15);
    }

    #[test]
    fn test_save_and_save_as_ordering() {
        let catalog = catalog_with(vec![
            noop_command("file.saveAs", "Save As").with_priority(70),
            noop_command("file.save", "Save").with_priority(95),
        ]);

        assert_eq!(titles(&catalog.search("save")), vec!["Save", "Save As"]);
    }

    #[test]
    fn test_search_matches_secondary_fields() {
        let catalog = catalog_with(vec![
            noop_command("view.zen", "Zen Mode").with_keywords(["focus", "distraction"]),
            noop_command("help.about", "About").with_description("Version and focus info"),
        ]);

        assert_eq!(ids(&catalog.search("focus")), vec!["help.about", "view.zen"]);
    }

    #[tokio::test]
    async fn test_unknown_command_is_skipped() {
        let catalog = CommandCatalog::new();
        let outcome = catalog
            .execute_command("missing.command", None, ExecutionSource::Palette)
            .await
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::NotFound);
        assert_eq!(catalog.history_len(), 0);
    }

    #[tokio::test]
    async fn test_guard_blocks_execution() {
        let enabled = Arc::new(AtomicBool::new(false));
        let (descriptor, counter) = counting_command("edit.format", "Format Document");
        let guard = {
            let enabled = Arc::clone(&enabled);
            ExecutionGuard::predicate(move || enabled.load(Ordering::SeqCst))
        };
        let catalog = catalog_with(vec![descriptor.with_guard(guard)]);

        let outcome = catalog
            .execute_command("edit.format", None, ExecutionSource::Menu)
            .await
            .unwrap();
        assert_eq!(outcome, ExecutionOutcome::Blocked);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        enabled.store(true, Ordering::SeqCst);
        let outcome = catalog
            .execute_command("edit.format", None, ExecutionSource::Menu)
            .await
            .unwrap();
        assert_eq!(outcome, ExecutionOutcome::Executed);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_execution_leaves_history_and_observers_untouched() {
        let catalog = catalog_with(vec![failing_command("file.save", "Save", "disk full")]);
        let observed = Arc::new(AtomicUsize::new(0));
        let _subscription = {
            let observed = Arc::clone(&observed);
            catalog.on_command_execute(move |_: &ExecutionRecord| {
                observed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };

        let err = assert_operation_failure!(
            catalog
                .execute_command("file.save", None, ExecutionSource::Keyboard)
                .await,
            "执行失败的命令"
        );

        assert!(matches!(err, CommandError::ExecutionFailed { .. }));
        assert_eq!(catalog.history_len(), 0);
        assert_eq!(observed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_observers_isolated_and_ordered() {
        let catalog = catalog_with(vec![noop_command("edit.undo", "Undo")]);
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let _failing = catalog.on_command_execute(|_: &ExecutionRecord| {
            Err(codeforge_lib::utils::app_error("observer broke"))
        });
        let _first = {
            let order = Arc::clone(&order);
            catalog.on_command_execute(move |_: &ExecutionRecord| {
                order.lock().push("first");
                Ok(())
            })
        };
        let second = {
            let order = Arc::clone(&order);
            catalog.on_command_execute(move |_: &ExecutionRecord| {
                order.lock().push("second");
                Ok(())
            })
        };

        catalog
            .execute_command("edit.undo", None, ExecutionSource::Programmatic)
            .await
            .unwrap();
        assert_eq!(*order.lock(), vec!["first", "second"]);

        second.unsubscribe();
        catalog
            .execute_command("edit.undo", None, ExecutionSource::Programmatic)
            .await
            .unwrap();
        assert_eq!(*order.lock(), vec!["first", "second", "first"]);
    }

    #[tokio::test]
    async fn test_history_ring_buffer() {
        let catalog = catalog_with(vec![noop_command("general.tick", "Tick")]);

        for i in 0..150 {
            catalog
                .execute_command("general.tick", Some(json!(i)), ExecutionSource::Programmatic)
                .await
                .unwrap();
            assert!(catalog.history_len() <= 100);
        }

        assert_eq!(catalog.history_len(), 100);
        let recent: Vec<_> = catalog
            .get_recent(5)
            .into_iter()
            .map(|record| record.args)
            .collect();
        assert_eq!(
            recent,
            vec![
                Some(json!(149)),
                Some(json!(148)),
                Some(json!(147)),
                Some(json!(146)),
                Some(json!(145)),
            ]
        );
    }

    #[tokio::test]
    async fn test_history_keeps_unregistered_commands() {
        let catalog = catalog_with(vec![noop_command("a", "Alpha"), noop_command("b", "Beta")]);

        for id in ["a", "b", "a"] {
            catalog
                .execute_command(id, None, ExecutionSource::Palette)
                .await
                .unwrap();
        }
        catalog.unregister("a");

        let most_used = catalog.get_most_used_commands(5);
        assert_eq!(most_used[0].command_id, "a");
        assert_eq!(most_used[0].count, 2);

        let stats = catalog.get_execution_stats();
        assert_eq!(stats.total_executions, 3);
        assert_eq!(stats.unique_commands, 2);
        assert_eq!(stats.by_source.get(&ExecutionSource::Palette), Some(&3));
        assert!(stats.last_executed_at.is_some());

        catalog.clear_history();
        assert_eq!(catalog.get_execution_stats().total_executions, 0);
    }
}
