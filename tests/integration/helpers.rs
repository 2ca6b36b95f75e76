use analysis_feed::api::FeedBackend;
use analysis_feed::app::App;
use analysis_feed::config::FeedConfig;
use analysis_feed::feed::{HistoryPage, HistoryQuery, Message, MessageType};
use chrono::{Duration, TimeZone as _, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Build a message whose timestamp follows its sequence number.
pub fn message(id: &str, seq: u64) -> Message {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap();
    Message {
        id: id.to_owned(),
        sequence_number: seq,
        created_at: base + Duration::seconds(seq as i64),
        message_type: MessageType::Analysis,
        agent_name: Some("market_analyst".to_owned()),
        content: format!("message {id}"),
        tool_name: None,
        tool_args: None,
    }
}

/// In-memory backend: pages a fixed history (newest first) and serves a
/// mutable live list.
#[derive(Default)]
pub struct FakeBackend {
    pub history: Vec<Message>,
    pub live: Mutex<Vec<Message>>,
    pub fail_history: AtomicBool,
    pub history_calls: Mutex<Vec<HistoryQuery>>,
}

impl FakeBackend {
    pub fn with_history(count: u64) -> Self {
        Self {
            history: (1..=count).map(|n| message(&format!("h{n}"), n)).collect(),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl FeedBackend for FakeBackend {
    async fn fetch_history(&self, query: &HistoryQuery) -> anyhow::Result<HistoryPage> {
        self.history_calls.lock().unwrap().push(query.clone());
        if self.fail_history.load(Ordering::SeqCst) {
            anyhow::bail!("history page returned 503 Service Unavailable");
        }
        let mut matching: Vec<Message> = self
            .history
            .iter()
            .filter(|m| query.message_type.is_none_or(|t| m.message_type == t))
            .filter(|m| query.agent_name.as_deref().is_none_or(|a| m.agent_name.as_deref() == Some(a)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.sequence_number.cmp(&a.sequence_number));

        let per_page = query.per_page as usize;
        let start = (query.page as usize - 1) * per_page;
        let items: Vec<Message> = matching.iter().skip(start).take(per_page).cloned().collect();
        Ok(HistoryPage {
            has_next: start + items.len() < matching.len(),
            total: matching.len() as u64,
            items,
        })
    }

    async fn fetch_live(&self, _session_id: &str) -> anyhow::Result<Vec<Message>> {
        Ok(self.live.lock().unwrap().clone())
    }
}

pub fn test_app(backend: Arc<FakeBackend>, include_historical: bool) -> App {
    let config = FeedConfig {
        session_id: "session-1".to_owned(),
        include_historical,
        ..FeedConfig::default()
    };
    App::new(config, backend)
}

/// Wait for the next background result and feed it to the app.
pub async fn pump_one(app: &mut App) {
    let event = app.event_rx.recv().await.expect("event channel closed");
    analysis_feed::app::handle_app_event(app, event);
}

pub fn press(app: &mut App, code: KeyCode) {
    analysis_feed::app::handle_terminal_event(
        app,
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
    );
}
