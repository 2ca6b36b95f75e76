// Live/historical reconciliation as seen through the app's view.

use analysis_feed::app::{AppEvent, handle_app_event};
use analysis_feed::feed::{HistoryPage, merge_messages};
use pretty_assertions::assert_eq;
use std::sync::Arc;

use crate::helpers::{FakeBackend, message, test_app};

#[test]
fn shared_id_appears_once_with_live_fields() {
    let historical = vec![message("a", 1), message("b", 2), message("c", 3)];
    let mut fresh = message("b", 2);
    fresh.content = "revised estimate".to_owned();
    let live = vec![fresh.clone(), message("d", 4)];

    let merged = merge_messages(&live, &historical, true);

    let b: Vec<_> = merged.iter().filter(|m| m.id == "b").collect();
    assert_eq!(b, vec![&fresh]);
    assert_eq!(merged.len(), 4);
}

#[test]
fn merged_output_is_ordered_and_repeatable() {
    let historical: Vec<_> = [9, 3, 7, 1].iter().map(|n| message(&format!("h{n}"), *n)).collect();
    let live: Vec<_> = [8, 2].iter().map(|n| message(&format!("l{n}"), *n)).collect();

    let first = merge_messages(&live, &historical, true);
    let second = merge_messages(&live, &historical, true);

    assert!(first.windows(2).all(|w| w[0].sequence_number <= w[1].sequence_number));
    assert_eq!(first, second);
}

#[tokio::test]
async fn live_snapshot_overrides_buffered_history_in_view() {
    let backend = Arc::new(FakeBackend::default());
    let mut app = test_app(backend, true);

    let ticket = app.history.begin_request(1);
    let page = HistoryPage {
        items: vec![message("a", 1), message("b", 2)],
        total: 2,
        has_next: false,
    };
    handle_app_event(&mut app, AppEvent::HistoryLoaded { ticket, page });

    let mut live_b = message("b", 2);
    live_b.content = "live".to_owned();
    handle_app_event(&mut app, AppEvent::LiveSnapshot(vec![live_b, message("c", 3)]));

    let ids: Vec<&str> = app.view.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(app.view[1].content, "live");
}

#[tokio::test]
async fn live_only_mode_ignores_history() {
    let backend = Arc::new(FakeBackend::default());
    let mut app = test_app(backend, false);

    let ticket = app.history.begin_request(1);
    let page = HistoryPage { items: vec![message("old", 1)], total: 1, has_next: false };
    handle_app_event(&mut app, AppEvent::HistoryLoaded { ticket, page });
    handle_app_event(&mut app, AppEvent::LiveSnapshot(vec![message("z", 5), message("y", 4)]));

    let ids: Vec<&str> = app.view.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "y"]);
}
