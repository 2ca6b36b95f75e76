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

use crate::api::FeedBackend;
use crate::config::FeedConfig;
use crate::feed::autoscroll::AutoScroll;
use crate::feed::present::Typewriter;
use crate::feed::reconcile::display_order;
use crate::feed::timing::{Debouncer, Throttle};
use crate::feed::{
    HistoryBuffer, HistoryPage, HistoryTicket, MergeCache, Message, MessageFilter, apply_filter,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Terminal rows per message: header line + content line.
pub const ROW_HEIGHT: usize = 2;
/// Rows from the bottom still treated as "following".
pub const ROW_TOLERANCE: usize = 1;

/// Results delivered back to the UI loop by background fetches.
#[derive(Debug)]
pub enum AppEvent {
    LiveSnapshot(Vec<Message>),
    LiveFailed(String),
    HistoryLoaded { ticket: HistoryTicket, page: HistoryPage },
    HistoryFailed { ticket: HistoryTicket, error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    pub config: FeedConfig,
    pub(super) backend: Arc<dyn FeedBackend>,
    /// Latest snapshot from the live channel, in arrival order.
    pub live: Vec<Message>,
    pub(super) live_version: u64,
    pub live_error: Option<String>,
    pub(super) live_in_flight: bool,
    pub(super) live_poll: Throttle,
    pub history: HistoryBuffer,
    pub include_historical: bool,
    pub(super) merge: MergeCache,
    /// Ids that have appeared in the merged sequence at least once.
    known_ids: HashSet<String>,
    /// Filter currently applied to the view.
    pub filter: MessageFilter,
    /// Search text being typed; applied after the debounce delay.
    pub search_input: String,
    pub(super) search_debounce: Debouncer,
    pub input_mode: InputMode,
    /// Reconciled and filtered messages, in display order.
    pub view: Vec<Message>,
    pub scroll: AutoScroll,
    /// Body height from the last rendered frame.
    pub viewport_rows: usize,
    /// Reveal effect for the newest message while following.
    pub typewriter: Option<(String, Typewriter)>,
    pub should_quit: bool,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    pub event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    #[must_use]
    pub fn new(config: FeedConfig, backend: Arc<dyn FeedBackend>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            include_historical: config.include_historical,
            live_poll: Throttle::new(config.poll_interval),
            search_debounce: Debouncer::new(config.search_debounce),
            config,
            backend,
            live: Vec::new(),
            live_version: 0,
            live_error: None,
            live_in_flight: false,
            history: HistoryBuffer::new(),
            merge: MergeCache::new(),
            known_ids: HashSet::new(),
            filter: MessageFilter::default(),
            search_input: String::new(),
            input_mode: InputMode::Normal,
            view: Vec::new(),
            scroll: AutoScroll::with_tolerance(ROW_TOLERANCE),
            viewport_rows: 0,
            typewriter: None,
            should_quit: false,
            event_tx,
            event_rx,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    /// Scroll extent of the current view, in rows.
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        crate::feed::viewport::max_scroll(self.view.len() * ROW_HEIGHT, self.viewport_rows)
    }

    /// Error to show in the banner: history problems take precedence.
    #[must_use]
    pub fn error_banner(&self) -> Option<&str> {
        self.history.error().or(self.live_error.as_deref())
    }

    pub(super) fn replace_live(&mut self, messages: Vec<Message>) -> bool {
        if self.live == messages {
            return false;
        }
        self.live = messages;
        self.live_version += 1;
        true
    }

    /// Re-derive `view` from the live list, history and filter, and let the
    /// auto-scroll controller react to messages that actually arrived.
    ///
    /// A message counts as an arrival the first time its id enters the
    /// merged sequence and only when it lands after the previous newest row.
    /// Filter changes that reveal known messages, and older history pages,
    /// never count.
    pub fn refresh_view(&mut self) {
        let merged = self.merge.get(
            &self.live,
            self.live_version,
            self.history.messages(),
            self.history.version(),
            self.include_historical,
        );
        let next = apply_filter(merged, &self.filter);

        let arrived = next
            .iter()
            .filter(|m| !self.known_ids.contains(&m.id))
            .filter(|m| self.view.last().is_none_or(|last| display_order(m, last).is_gt()))
            .count();
        for msg in merged {
            if !self.known_ids.contains(&msg.id) {
                self.known_ids.insert(msg.id.clone());
            }
        }
        self.view = next;

        let max_scroll = self.max_scroll();
        if arrived > 0 {
            self.scroll.on_new_messages(arrived, max_scroll);
            if self.scroll.is_pinned()
                && let Some(last) = self.view.last()
            {
                self.typewriter = Some((
                    last.id.clone(),
                    Typewriter::new(last.content.clone(), Typewriter::DEFAULT_CHARS_PER_TICK),
                ));
            }
        }
        self.scroll.clamp(max_scroll);
    }

    /// Per-frame housekeeping that does not depend on input.
    pub fn tick_animations(&mut self) {
        self.scroll.tick();
        if let Some((_, tw)) = self.typewriter.as_mut() {
            tw.tick();
            if tw.is_done() {
                self.typewriter = None;
            }
        }
    }
}
