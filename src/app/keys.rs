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

use super::requests;
use super::state::{App, InputMode, ROW_HEIGHT};
use crate::feed::MessageType;
use crate::feed::filter::distinct_agents;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

#[allow(clippy::cast_possible_wrap)]
pub(super) fn handle_normal_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'c') {
        app.should_quit = true;
        return;
    }
    let max_scroll = app.max_scroll();
    let page = app.viewport_rows.max(1) as isize;
    let row = ROW_HEIGHT as isize;
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll.scroll_by(row, max_scroll);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll.scroll_by(-row, max_scroll);
        }
        KeyCode::PageDown => {
            app.scroll.scroll_by(page, max_scroll);
        }
        KeyCode::PageUp => {
            app.scroll.scroll_by(-page, max_scroll);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.scroll.scroll_by(isize::MIN, max_scroll);
        }
        KeyCode::Char('G') | KeyCode::End => app.scroll.jump_to_latest(max_scroll),
        KeyCode::Char('h') => toggle_historical(app),
        KeyCode::Char('m') => requests::load_more(app),
        KeyCode::Char('r') => requests::refresh(app),
        KeyCode::Char('t') => cycle_type_filter(app),
        KeyCode::Char('a') => cycle_agent_filter(app),
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input = app.filter.search_term.clone().unwrap_or_default();
        }
        KeyCode::Char('x') => {
            app.history.dismiss_error();
            app.live_error = None;
        }
        KeyCode::Char(' ') => {
            if let Some((_, tw)) = app.typewriter.as_mut() {
                tw.skip();
            }
        }
        KeyCode::Esc => clear_filters(app),
        _ => {}
    }
}

pub(super) fn handle_search_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'c') {
        app.should_quit = true;
        return;
    }
    match key.code {
        KeyCode::Enter => {
            app.search_debounce.cancel();
            apply_search(app);
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.search_debounce.cancel();
            app.search_input.clear();
            apply_search(app);
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.search_debounce.touch(Instant::now());
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.search_debounce.touch(Instant::now());
        }
        _ => {}
    }
}

/// Commit the typed search text as the active search predicate.
pub(super) fn apply_search(app: &mut App) {
    let term = app.search_input.trim();
    let next = (!term.is_empty()).then(|| term.to_owned());
    if next != app.filter.search_term {
        tracing::debug!(term = ?next, "search applied");
        app.filter.search_term = next;
        app.refresh_view();
    }
}

pub fn toggle_historical(app: &mut App) {
    app.include_historical = !app.include_historical;
    tracing::info!(include_historical = app.include_historical, "historical log toggled");
    if app.include_historical && app.history.current_page() == 0 && !app.history.is_loading() {
        requests::request_history_page(app, 1);
    }
    app.refresh_view();
}

/// None, then each filterable type in turn, then back to None.
pub fn cycle_type_filter(app: &mut App) {
    let types = MessageType::FILTERABLE;
    app.filter.message_type = match app.filter.message_type {
        None => types.first().copied(),
        Some(current) => {
            types.iter().position(|t| *t == current).and_then(|i| types.get(i + 1)).copied()
        }
    };
    on_server_filter_changed(app);
}

pub fn cycle_agent_filter(app: &mut App) {
    let mut agents = distinct_agents(&app.live);
    agents.extend(distinct_agents(app.history.messages()));
    agents.sort_unstable();
    agents.dedup();
    app.filter.agent_name = match app.filter.agent_name.as_deref() {
        None => agents.first().cloned(),
        Some(current) => agents
            .iter()
            .position(|a| a == current)
            .and_then(|i| agents.get(i + 1))
            .cloned(),
    };
    on_server_filter_changed(app);
}

fn clear_filters(app: &mut App) {
    let server_side_changed =
        app.filter.message_type.is_some() || app.filter.agent_name.is_some();
    app.filter = Default::default();
    app.search_input.clear();
    if server_side_changed {
        on_server_filter_changed(app);
    } else {
        app.refresh_view();
    }
}

/// Type and agent filters are also sent to the history endpoint, so the
/// buffered pages no longer match. They are dropped now and page 1 is
/// fetched again, immediately or when history is next switched on.
fn on_server_filter_changed(app: &mut App) {
    tracing::debug!(
        message_type = ?app.filter.message_type,
        agent_name = ?app.filter.agent_name,
        "filters changed"
    );
    app.history.reset_filters();
    if app.include_historical {
        requests::request_history_page(app, 1);
    }
    app.refresh_view();
}
