// Paging the historical log through the app, the way "load more" does.

use analysis_feed::app::{load_more, refresh, request_history_page};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::helpers::{FakeBackend, pump_one, test_app};

#[tokio::test]
async fn two_pages_merge_into_hundred_ordered_messages() {
    let backend = Arc::new(FakeBackend::with_history(120));
    let mut app = test_app(backend.clone(), true);

    request_history_page(&mut app, 1);
    pump_one(&mut app).await;
    assert_eq!(app.history.len(), 50);
    assert_eq!(app.history.total(), 120);
    assert!(app.history.has_next());

    load_more(&mut app);
    pump_one(&mut app).await;
    assert_eq!(app.history.len(), 100);

    let ids: HashSet<&str> = app.history.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids.len(), 100);

    // Empty live set: the view is exactly the buffered history, ascending.
    assert_eq!(app.view.len(), 100);
    assert!(app.view.windows(2).all(|w| w[0].sequence_number < w[1].sequence_number));
    assert_eq!(app.view.first().map(|m| m.sequence_number), Some(21));
    assert_eq!(app.view.last().map(|m| m.sequence_number), Some(120));

    let pages: Vec<u32> = backend.history_calls.lock().unwrap().iter().map(|q| q.page).collect();
    assert_eq!(pages, vec![1, 2]);
}

#[tokio::test]
async fn load_more_stops_after_last_page() {
    let backend = Arc::new(FakeBackend::with_history(60));
    let mut app = test_app(backend.clone(), true);

    request_history_page(&mut app, 1);
    pump_one(&mut app).await;
    load_more(&mut app);
    pump_one(&mut app).await;
    assert_eq!(app.history.len(), 60);
    assert!(!app.history.has_next());

    load_more(&mut app);
    assert!(!app.history.is_loading());
    assert_eq!(backend.history_calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn refresh_replaces_buffer_with_first_page() {
    let backend = Arc::new(FakeBackend::with_history(120));
    let mut app = test_app(backend, true);

    request_history_page(&mut app, 1);
    pump_one(&mut app).await;
    load_more(&mut app);
    pump_one(&mut app).await;
    assert_eq!(app.history.len(), 100);

    refresh(&mut app);
    pump_one(&mut app).await;
    assert_eq!(app.history.len(), 50);
    assert_eq!(app.history.current_page(), 1);
}

#[tokio::test]
async fn failed_page_keeps_previous_data_and_shows_banner() {
    let backend = Arc::new(FakeBackend::with_history(120));
    let mut app = test_app(backend.clone(), true);
    request_history_page(&mut app, 1);
    pump_one(&mut app).await;
    assert_eq!(app.view.len(), 50);

    backend.fail_history.store(true, Ordering::SeqCst);
    load_more(&mut app);
    pump_one(&mut app).await;

    assert_eq!(app.history.len(), 50);
    assert_eq!(app.view.len(), 50);
    assert!(!app.history.is_loading());
    assert_eq!(app.error_banner(), Some("history page returned 503 Service Unavailable"));

    // Manual retry succeeds once the backend recovers.
    backend.fail_history.store(false, Ordering::SeqCst);
    load_more(&mut app);
    pump_one(&mut app).await;
    assert_eq!(app.history.len(), 100);
    assert!(app.error_banner().is_none());
}
