use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use backoffice_engine::config::{MountSync, TableConfig};
use backoffice_engine::events::EventResult;
use backoffice_engine::table::{
    ChangeOrigin, Column, PagerAction, PaginatedTable, RowKey, TableHandle,
};
use serde::Serialize;
use serde_json::json;

type Calls = Arc<Mutex<Vec<(usize, usize)>>>;

fn recording_table(total: usize) -> (PaginatedTable, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&calls);
    let table = PaginatedTable::new(vec![
        Column::new("Name", "name"),
        Column::new("Country", "institution.country.name"),
        Column::new("Amount", "amount"),
    ])
    .with_total_record_count(total)
    .on_sync(move |index, size| seen.lock().unwrap().push((index, size)));
    (table, calls)
}

fn calls(calls: &Calls) -> Vec<(usize, usize)> {
    calls.lock().unwrap().clone()
}

// ============================================================================
// Sync Callback
// ============================================================================

#[test]
fn test_each_pager_change_syncs_once() {
    let (table, recorded) = recording_table(100);

    table.dispatch(PagerAction::Next);
    table.dispatch(PagerAction::GoTo(5));
    table.dispatch(PagerAction::Previous);
    table.dispatch(PagerAction::Last);
    table.dispatch(PagerAction::First);

    assert_eq!(
        calls(&recorded),
        vec![(1, 10), (5, 10), (4, 10), (9, 10), (0, 10)]
    );
    assert_eq!(table.last_change_origin(), Some(ChangeOrigin::Internal));
}

#[test]
fn test_set_page_index_does_not_sync() {
    let (table, recorded) = recording_table(100);
    let handle = table.handle();

    handle.set_page_index(3);

    assert_eq!(handle.page_index(), 3);
    assert_eq!(table.page_index(), 3);
    assert!(calls(&recorded).is_empty());
    assert_eq!(table.last_change_origin(), Some(ChangeOrigin::External));
}

#[test]
fn test_page_size_change_resets_and_syncs_once() {
    let (table, recorded) = recording_table(100);
    table.dispatch(PagerAction::GoTo(4));

    let result = table.dispatch(PagerAction::SetPageSize(25));

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(table.page_index(), 0);
    assert_eq!(table.page_size(), 25);
    assert_eq!(calls(&recorded), vec![(4, 10), (0, 25)]);
}

#[test]
fn test_page_size_change_on_first_page_still_syncs_once() {
    let (table, recorded) = recording_table(100);
    table.dispatch(PagerAction::SetPageSize(50));
    assert_eq!(calls(&recorded), vec![(0, 50)]);
}

#[test]
fn test_next_is_disabled_on_last_page() {
    let (table, recorded) = recording_table(23);

    let results: Vec<EventResult> = (0..3).map(|_| table.dispatch(PagerAction::Next)).collect();

    assert_eq!(
        results,
        vec![EventResult::Consumed, EventResult::Consumed, EventResult::Ignored]
    );
    assert_eq!(
        results.iter().map(EventResult::is_handled).collect::<Vec<_>>(),
        vec![true, true, false]
    );
    assert_eq!(calls(&recorded), vec![(1, 10), (2, 10)]);
    assert_eq!(table.page_index(), 2);
    assert!(!table.render().pager.can_next);
}

#[test]
fn test_disabled_actions_do_not_sync() {
    let (table, recorded) = recording_table(30);
    assert_eq!(table.dispatch(PagerAction::Previous), EventResult::Ignored);
    assert_eq!(table.dispatch(PagerAction::First), EventResult::Ignored);
    assert_eq!(table.dispatch(PagerAction::GoTo(3)), EventResult::Ignored);
    assert_eq!(table.dispatch(PagerAction::SetPageSize(10)), EventResult::Ignored);
    assert_eq!(table.dispatch(PagerAction::SetPageSize(12)), EventResult::Ignored);
    assert!(calls(&recorded).is_empty());
}

#[test]
fn test_fetch_then_reconcile_does_not_double_fetch() {
    // Owning page: sync -> fetch -> total arrives -> force the confirmed page.
    let (table, recorded) = recording_table(0);
    let handle = table.handle();

    handle.set_page_index(0);
    table.set_total_record_count(45);
    table.dispatch(PagerAction::Next);
    let server_page_number = 2;
    handle.set_page_index(server_page_number - 1);

    assert_eq!(calls(&recorded), vec![(1, 10)]);
    assert_eq!(handle.page_index(), 1);
    assert_eq!(handle.total_record_count(), 45);
}

#[test]
fn test_last_set_page_index_wins() {
    let (table, _) = recording_table(100);
    let handle = table.handle();
    handle.set_page_index(7);
    handle.set_page_index(2);
    handle.set_page_index(5);
    assert_eq!(table.page_index(), 5);
}

#[test]
fn test_sync_callback_can_reenter_table() {
    let handle_slot = Arc::new(Mutex::new(None::<TableHandle>));
    let slot = Arc::clone(&handle_slot);
    let observed = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&observed);

    let table = PaginatedTable::new(vec![Column::new("Name", "name")])
        .with_total_record_count(50)
        .on_sync(move |index, _| {
            if let Some(handle) = slot.lock().unwrap().as_ref() {
                seen.lock().unwrap().push((index, handle.page_index()));
            }
        });
    *handle_slot.lock().unwrap() = Some(table.handle());

    table.dispatch(PagerAction::Next);

    assert!(!table.is_syncing());
    assert_eq!(*observed.lock().unwrap(), vec![(1, 1)]);
}

#[test]
fn test_panicking_callback_clears_syncing_flag() {
    let table = PaginatedTable::new(vec![Column::new("Name", "name")])
        .with_total_record_count(50)
        .on_sync(|_, _| panic!("fetch wiring failed"));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| table.dispatch(PagerAction::Next)));

    assert!(outcome.is_err());
    assert!(!table.is_syncing());
    assert_eq!(table.page_index(), 1);
}

// ============================================================================
// Mount Policy
// ============================================================================

#[test]
fn test_mount_does_not_sync_by_default() {
    let (table, recorded) = recording_table(10);
    assert_eq!(table.mount(), EventResult::Ignored);
    assert!(table.is_mounted());
    assert!(calls(&recorded).is_empty());
}

#[test]
fn test_without_pre_loading_syncs_once_on_mount() {
    let (table, recorded) = recording_table(10);
    let table = table.without_pre_loading();

    assert_eq!(table.mount(), EventResult::Consumed);
    assert_eq!(table.mount(), EventResult::Ignored);
    assert_eq!(calls(&recorded), vec![(0, 10)]);
}

#[test]
fn test_immediate_mount_from_config() {
    let config = TableConfig {
        page_sizes: vec![20, 40],
        default_page_size: 20,
        mount_sync: MountSync::Immediate,
        warn_on_keys: false,
    };
    let recorded: Calls = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&recorded);
    let table = PaginatedTable::with_config(vec![], &config)
        .unwrap()
        .on_sync(move |index, size| seen.lock().unwrap().push((index, size)));

    table.mount();
    assert_eq!(calls(&recorded), vec![(0, 20)]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = TableConfig {
        default_page_size: 7,
        ..TableConfig::default()
    };
    assert!(PaginatedTable::with_config(vec![], &config).is_err());
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_resolves_nested_paths_and_amounts() {
    let (table, _) = recording_table(2);
    table.set_rows(vec![
        json!({
            "name": "Acme Bank",
            "institution": { "country": { "name": "Kenya" } },
            "amount": 1500000
        }),
        json!({ "name": "Orphan", "institution": null, "amount": "12.5" }),
    ]);

    let view = table.render();

    assert_eq!(view.headers, vec!["Name", "Country", "Amount"]);
    assert_eq!(view.rows[0].cells, vec!["Acme Bank", "Kenya", "1,500,000"]);
    assert_eq!(view.rows[1].cells, vec!["Orphan", "", "12.5"]);
    assert_eq!(view.rows[0].key, RowKey::Index(0));
    assert_eq!(view.rows[1].key, RowKey::Index(1));
}

#[test]
fn test_render_uses_key_field() {
    let (table, _) = recording_table(2);
    let table = table.with_key_field("id").with_rows(vec![
        json!({ "id": "inst-1", "name": "A" }),
        json!({ "id": "inst-2", "name": "B" }),
    ]);
    assert_eq!(
        table.row_keys(),
        vec![
            RowKey::Field(String::from("inst-1")),
            RowKey::Field(String::from("inst-2"))
        ]
    );
}

#[test]
fn test_render_pager_summary() {
    let (table, _) = recording_table(23);
    table.dispatch(PagerAction::Next);

    let pager = table.render().pager;

    assert_eq!(pager.label, "11-20 of 23");
    assert_eq!(pager.page_count, 3);
    assert!(pager.can_previous);
    assert!(pager.can_next);
    assert_eq!(pager.page_sizes, vec![5, 10, 25, 50]);
}

#[test]
fn test_render_tolerates_huge_external_index() {
    let (table, recorded) = recording_table(23);
    let handle = table.handle();

    for index in [usize::MAX / 5, usize::MAX] {
        handle.set_page_index(index);
        let pager = table.render().pager;

        assert_eq!(pager.page_index, index);
        assert_eq!(pager.label, "0-0 of 23");
        assert!(pager.can_previous);
        assert!(!pager.can_next);
    }

    assert_eq!(table.dispatch(PagerAction::Next), EventResult::Ignored);
    assert_eq!(table.dispatch(PagerAction::Last), EventResult::Consumed);
    assert_eq!(calls(&recorded), vec![(2, 10)]);
}

#[test]
fn test_render_reports_loading() {
    let (table, _) = recording_table(0);
    table.set_loading(true);
    let view = table.render();
    assert!(view.loading);
    assert!(!view.is_empty());
}

#[test]
fn test_set_records_serializes_rows() {
    #[derive(Serialize)]
    struct Biller {
        code: String,
        name: String,
    }

    let table = PaginatedTable::new(vec![Column::new("Biller", "name")]).with_key_field("code");
    table
        .set_records(&[Biller {
            code: String::from("KPLC"),
            name: String::from("Kenya Power"),
        }])
        .unwrap();

    let view = table.render();
    assert_eq!(view.rows[0].key, RowKey::Field(String::from("KPLC")));
    assert_eq!(view.rows[0].cells, vec!["Kenya Power"]);
}

#[test]
fn test_dirty_flag_follows_changes() {
    let (table, _) = recording_table(30);
    assert!(table.is_dirty());
    table.clear_dirty();
    table.render();
    assert!(!table.is_dirty());
    table.dispatch(PagerAction::Next);
    assert!(table.is_dirty());
}

#[test]
fn test_tables_have_distinct_ids() {
    let (first, _) = recording_table(0);
    let (second, _) = recording_table(0);
    assert_ne!(first.id(), second.id());
    assert_eq!(first.id_string(), first.id().to_string());
    assert!(first.id_string().starts_with("__table_"));
}
