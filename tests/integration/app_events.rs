// Key handling, filters and auto-scroll driven through the app.

use analysis_feed::app::{AppEvent, InputMode, ROW_HEIGHT, handle_app_event, on_tick};
use analysis_feed::feed::{HistoryPage, MessageType, ScrollMode};
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::helpers::{FakeBackend, message, press, pump_one, test_app};

fn live(range: std::ops::RangeInclusive<u64>) -> AppEvent {
    AppEvent::LiveSnapshot(range.map(|n| message(&format!("m{n}"), n)).collect())
}

#[tokio::test]
async fn pinned_view_follows_and_detached_view_counts_unseen() {
    let mut app = test_app(Arc::new(FakeBackend::default()), false);
    app.viewport_rows = 10;

    handle_app_event(&mut app, live(1..=20));
    assert_eq!(app.scroll.mode(), ScrollMode::Pinned);
    assert_eq!(app.scroll.target(), 20 * ROW_HEIGHT - 10);

    press(&mut app, KeyCode::Char('k'));
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.scroll.mode(), ScrollMode::Detached);
    let parked = app.scroll.target();

    handle_app_event(&mut app, live(1..=22));
    assert_eq!(app.scroll.unseen(), 2);
    assert_eq!(app.scroll.target(), parked);

    press(&mut app, KeyCode::Char('G'));
    assert_eq!(app.scroll.mode(), ScrollMode::Pinned);
    assert_eq!(app.scroll.unseen(), 0);
    assert_eq!(app.scroll.target(), 22 * ROW_HEIGHT - 10);
}

#[tokio::test]
async fn newest_message_gets_typewriter_reveal_while_pinned() {
    let mut app = test_app(Arc::new(FakeBackend::default()), false);
    app.viewport_rows = 10;

    handle_app_event(&mut app, live(1..=3));
    let (id, _) = app.typewriter.as_ref().expect("typewriter started");
    assert_eq!(id, "m3");

    press(&mut app, KeyCode::Char(' '));
    app.tick_animations();
    assert!(app.typewriter.is_none());
}

#[tokio::test]
async fn search_applies_after_debounce() {
    let mut app = test_app(Arc::new(FakeBackend::default()), false);
    let mut snapshot: Vec<_> = (1..=3).map(|n| message(&format!("m{n}"), n)).collect();
    snapshot[1].content = "Fed raises rates".to_owned();
    handle_app_event(&mut app, AppEvent::LiveSnapshot(snapshot));

    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input_mode, InputMode::Search);
    for c in "RATES".chars() {
        press(&mut app, KeyCode::Char(c));
    }

    on_tick(&mut app, Instant::now());
    assert_eq!(app.view.len(), 3);

    on_tick(&mut app, Instant::now() + Duration::from_secs(2));
    assert_eq!(app.filter.search_term.as_deref(), Some("RATES"));
    assert_eq!(app.view.len(), 1);
    assert_eq!(app.view[0].id, "m2");

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.view.len(), 3);
}

#[tokio::test]
async fn type_filter_refetches_history_and_drops_stale_page() {
    let backend = Arc::new(FakeBackend::with_history(10));
    let mut app = test_app(backend.clone(), true);

    // Unfiltered page 1 requested, then superseded by a filter change.
    analysis_feed::app::request_history_page(&mut app, 1);
    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.filter.message_type, Some(MessageType::System));

    pump_one(&mut app).await;
    pump_one(&mut app).await;

    // The fake only holds analysis messages, so the system-filtered page is empty
    // and the unfiltered response must not have leaked into the buffer.
    assert!(app.history.is_empty());
    assert!(app.view.is_empty());

    let calls = backend.history_calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().any(|q| q.message_type.is_none()));
    assert!(calls.iter().any(|q| q.message_type == Some(MessageType::System)));
}

#[tokio::test]
async fn agent_filter_cycles_through_known_agents() {
    let mut app = test_app(Arc::new(FakeBackend::default()), false);
    let mut snapshot: Vec<_> = (1..=3).map(|n| message(&format!("m{n}"), n)).collect();
    snapshot[0].agent_name = Some("news_analyst".to_owned());
    snapshot[2].agent_name = None;
    handle_app_event(&mut app, AppEvent::LiveSnapshot(snapshot));

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.filter.agent_name.as_deref(), Some("market_analyst"));
    assert_eq!(app.view.len(), 1);

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.filter.agent_name.as_deref(), Some("news_analyst"));

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.filter.agent_name, None);
    assert_eq!(app.view.len(), 3);
}

#[tokio::test]
async fn live_failure_shows_banner_until_dismissed() {
    let mut app = test_app(Arc::new(FakeBackend::default()), false);
    handle_app_event(&mut app, AppEvent::LiveFailed("Backend unreachable".to_owned()));
    assert_eq!(app.error_banner(), Some("Backend unreachable"));

    press(&mut app, KeyCode::Char('x'));
    assert!(app.error_banner().is_none());
}

#[tokio::test]
async fn toggling_history_fetches_first_page_once() {
    let backend = Arc::new(FakeBackend::with_history(5));
    let mut app = test_app(backend.clone(), false);

    press(&mut app, KeyCode::Char('h'));
    assert!(app.include_historical);
    pump_one(&mut app).await;
    assert_eq!(app.view.len(), 5);

    press(&mut app, KeyCode::Char('h'));
    press(&mut app, KeyCode::Char('h'));
    assert_eq!(backend.history_calls.lock().unwrap().len(), 1);

    let ticket = app.history.begin_request(1);
    handle_app_event(
        &mut app,
        AppEvent::HistoryLoaded {
            ticket,
            page: HistoryPage { items: vec![], total: 0, has_next: false },
        },
    );
    assert!(app.view.is_empty());
}

#[tokio::test]
async fn history_filtered_while_hidden_is_refetched_when_shown_again() {
    let backend = Arc::new(FakeBackend::with_history(5));
    let mut app = test_app(backend.clone(), true);
    analysis_feed::app::start(&mut app);
    pump_one(&mut app).await;
    assert_eq!(app.view.len(), 5);

    press(&mut app, KeyCode::Char('t'));
    pump_one(&mut app).await;
    assert!(app.view.is_empty());

    // Clear the type filter while history is hidden, then show it again.
    press(&mut app, KeyCode::Char('h'));
    press(&mut app, KeyCode::Esc);
    assert!(app.history.is_empty());
    press(&mut app, KeyCode::Char('h'));
    pump_one(&mut app).await;

    assert_eq!(app.view.len(), 5);
    let calls = backend.history_calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].message_type, None);
}

#[tokio::test]
async fn revealing_filtered_messages_is_not_counted_as_new() {
    let mut app = test_app(Arc::new(FakeBackend::default()), false);
    app.viewport_rows = 4;
    handle_app_event(&mut app, live(1..=10));

    press(&mut app, KeyCode::Char('k'));
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.scroll.mode(), ScrollMode::Detached);

    press(&mut app, KeyCode::Char('/'));
    for c in "zzz-nomatch".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    assert!(app.view.is_empty());

    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.view.len(), 10);
    assert_eq!(app.scroll.unseen(), 0);
}

#[tokio::test]
async fn older_history_pages_are_not_counted_as_new() {
    let backend = Arc::new(FakeBackend::with_history(60));
    let mut app = test_app(backend, true);
    app.viewport_rows = 4;
    analysis_feed::app::start(&mut app);
    pump_one(&mut app).await;
    assert_eq!(app.view.len(), 50);

    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.scroll.mode(), ScrollMode::Detached);

    press(&mut app, KeyCode::Char('m'));
    pump_one(&mut app).await;
    assert_eq!(app.view.len(), 60);
    assert_eq!(app.scroll.unseen(), 0);
}
