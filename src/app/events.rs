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

use super::state::{App, AppEvent, InputMode};
use super::{keys, requests};
use crossterm::event::{Event, KeyEventKind, MouseEvent, MouseEventKind};
use std::time::Instant;

const MOUSE_SCROLL_ROWS: isize = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match app.input_mode {
            InputMode::Normal => keys::handle_normal_key(app, key),
            InputMode::Search => keys::handle_search_key(app, key),
        },
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(..) => app.refresh_view(),
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let max_scroll = app.max_scroll();
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll.scroll_by(-MOUSE_SCROLL_ROWS, max_scroll);
        }
        MouseEventKind::ScrollDown => {
            app.scroll.scroll_by(MOUSE_SCROLL_ROWS, max_scroll);
        }
        _ => {}
    }
}

pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::LiveSnapshot(messages) => {
            app.live_in_flight = false;
            app.live_error = None;
            let count = messages.len();
            if app.replace_live(messages) {
                tracing::debug!(count, "live snapshot changed");
                app.refresh_view();
            }
        }
        AppEvent::LiveFailed(error) => {
            app.live_in_flight = false;
            tracing::warn!("live poll failed: {error}");
            app.live_error = Some(error);
        }
        AppEvent::HistoryLoaded { ticket, page } => {
            let outcome = app.history.apply(ticket, page);
            tracing::debug!(?outcome, page = ticket.page(), "history response");
            app.refresh_view();
        }
        AppEvent::HistoryFailed { ticket, error } => {
            if app.history.fail(ticket, error) {
                tracing::warn!(page = ticket.page(), "history page failed");
            }
        }
    }
}

/// Timer-driven work run once per frame: live polling and the search
/// debounce.
pub fn on_tick(app: &mut App, now: Instant) {
    if !app.live_in_flight && app.live_poll.try_fire(now) {
        requests::poll_live(app);
    }
    if app.search_debounce.fire_if_due(now) {
        keys::apply_search(app);
    }
    app.tick_animations();
}
