// analysis_feed - A terminal viewer for multi-agent analysis streams
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

mod events;
mod keys;
mod requests;
mod state;

pub use events::{handle_app_event, handle_terminal_event, on_tick};
pub use keys::{cycle_agent_filter, cycle_type_filter, toggle_historical};
pub use requests::{load_more, poll_live, refresh, request_history_page};
pub use state::{App, AppEvent, InputMode, ROW_HEIGHT, ROW_TOLERANCE};

use crate::api::{FeedBackend, FeedClient};
use crate::config::FeedConfig;
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub fn create_app(config: FeedConfig) -> anyhow::Result<App> {
    let client = FeedClient::new(&config.base_url, config.request_timeout)?;
    tracing::info!(
        base_url = client.base_url(),
        session_id = %config.session_id,
        include_historical = config.include_historical,
        "created feed client"
    );
    let backend: Arc<dyn FeedBackend> = Arc::new(client);
    Ok(App::new(config, backend))
}

/// Kick off the initial fetches. Live polling then continues on the tick.
pub fn start(app: &mut App) {
    if app.include_historical {
        request_history_page(app, 1);
    }
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Mouse capture for wheel scrolling (ignore error on unsupported terminals)
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    let result = loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                handle_app_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            // Terminal input first keeps scrolling responsive
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                handle_terminal_event(app, event);
                continue;
            }
            match app.event_rx.try_recv() {
                Ok(event) => handle_app_event(app, event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break Ok(());
        }

        // Phase 3: timers, then render once
        on_tick(app, Instant::now());
        if let Err(err) = terminal.draw(|f| crate::ui::render(f, app)) {
            break Err(anyhow::Error::new(err));
        }
        last_render = Instant::now();
    };

    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();

    result
}
