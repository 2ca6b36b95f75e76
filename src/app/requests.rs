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

//! Background fetches. Each spawns a task that reports back through the
//! app's event channel; nothing here blocks the UI loop.

use super::state::{App, AppEvent};
use crate::error::AppError;
use crate::feed::HistoryQuery;

/// Request one history page with the current type/agent filters.
pub fn request_history_page(app: &mut App, page: u32) {
    let ticket = app.history.begin_request(page);
    let mut query = HistoryQuery::new(app.session_id(), ticket.page());
    query.message_type = app.filter.message_type;
    query.agent_name = app.filter.agent_name.clone();

    let backend = app.backend.clone();
    let tx = app.event_tx.clone();
    tracing::debug!(page = ticket.page(), generation = ticket.generation(), "requesting history page");
    tokio::spawn(async move {
        let event = match backend.fetch_history(&query).await {
            Ok(page) => AppEvent::HistoryLoaded { ticket, page },
            Err(err) => AppEvent::HistoryFailed { ticket, error: AppError::banner(&err) },
        };
        let _ = tx.send(event);
    });
}

/// "Load more": fetch the page after the last one applied.
pub fn load_more(app: &mut App) {
    if app.history.is_loading() {
        return;
    }
    match app.history.next_page() {
        Some(page) => request_history_page(app, page),
        None if app.history.current_page() == 0 => request_history_page(app, 1),
        None => tracing::debug!("no more history pages"),
    }
}

/// Re-fetch the first history page and poll live immediately.
pub fn refresh(app: &mut App) {
    app.history.dismiss_error();
    app.live_error = None;
    if app.include_historical {
        request_history_page(app, 1);
    }
    app.live_poll.reset();
}

pub fn poll_live(app: &mut App) {
    app.live_in_flight = true;
    let backend = app.backend.clone();
    let tx = app.event_tx.clone();
    let session_id = app.session_id().to_owned();
    tokio::spawn(async move {
        let event = match backend.fetch_live(&session_id).await {
            Ok(messages) => AppEvent::LiveSnapshot(messages),
            Err(err) => AppEvent::LiveFailed(AppError::banner(&err)),
        };
        let _ = tx.send(event);
    });
}
