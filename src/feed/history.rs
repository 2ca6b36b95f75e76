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

//! Client-side buffer for the paged historical message log.
//!
//! Every fetch is stamped with a generation when it starts. Only the response
//! to the newest request may touch the buffer, so a slow response for an old
//! filter or page cannot overwrite fresher data.

use super::model::{Message, MessageType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const PER_PAGE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Parameters for one history page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub session_id: String,
    /// 1-based.
    pub page: u32,
    pub per_page: u32,
    pub message_type: Option<MessageType>,
    pub agent_name: Option<String>,
    pub order: SortOrder,
}

impl HistoryQuery {
    #[must_use]
    pub fn new(session_id: impl Into<String>, page: u32) -> Self {
        Self {
            session_id: session_id.into(),
            page: page.max(1),
            per_page: PER_PAGE,
            message_type: None,
            agent_name: None,
            order: SortOrder::Desc,
        }
    }

    /// Query string pairs, omitting unset filters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("order", self.order.as_str().to_owned()),
        ];
        if let Some(kind) = self.message_type {
            pairs.push(("message_type", kind.as_str().to_owned()));
        }
        if let Some(agent) = self.agent_name.as_deref().filter(|a| !a.trim().is_empty()) {
            pairs.push(("agent_name", agent.to_owned()));
        }
        pairs
    }
}

/// One page as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub items: Vec<Message>,
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "hasNext")]
    pub has_next: bool,
}

/// Handle for an in-flight request. Must be handed back to `apply` or `fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryTicket {
    generation: u64,
    page: u32,
}

impl HistoryTicket {
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Page applied; `added` new messages entered the buffer.
    Applied { added: usize },
    /// A newer request was issued after this one; response dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct HistoryBuffer {
    messages: Vec<Message>,
    seen: HashSet<String>,
    total: u64,
    has_next: bool,
    current_page: u32,
    generation: u64,
    in_flight: Option<HistoryTicket>,
    error: Option<String>,
    version: u64,
}

impl HistoryBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Last fetch error, kept until the next successful page.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped on every change to `messages()`.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Page to request for "load more", if the backend reported one.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        (self.current_page > 0 && self.has_next).then_some(self.current_page + 1)
    }

    /// Start a request for `page`. Supersedes any request still in flight.
    pub fn begin_request(&mut self, page: u32) -> HistoryTicket {
        self.generation += 1;
        let ticket = HistoryTicket { generation: self.generation, page: page.max(1) };
        if let Some(previous) = self.in_flight.replace(ticket) {
            tracing::debug!(
                superseded_page = previous.page,
                page = ticket.page,
                "history request superseded"
            );
        }
        ticket
    }

    /// Server-side filters changed: outstanding requests are dropped and the
    /// buffered pages, fetched under the old filters, are discarded so the
    /// next request starts again from page 1.
    pub fn reset_filters(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.error = None;
        self.total = 0;
        self.has_next = false;
        self.current_page = 0;
        if !self.messages.is_empty() {
            self.messages.clear();
            self.seen.clear();
            self.version += 1;
        }
    }

    fn is_current(&self, ticket: HistoryTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a successful response. Page 1 replaces the buffer; later pages
    /// append, skipping ids already buffered.
    pub fn apply(&mut self, ticket: HistoryTicket, page: HistoryPage) -> ApplyOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(
                page = ticket.page,
                generation = ticket.generation,
                latest = self.generation,
                "dropping stale history page"
            );
            return ApplyOutcome::Stale;
        }
        self.in_flight = None;
        self.error = None;

        if ticket.page == 1 {
            self.messages.clear();
            self.seen.clear();
        }
        let before = self.messages.len();
        for msg in page.items {
            if self.seen.insert(msg.id.clone()) {
                self.messages.push(msg);
            }
        }
        let added = self.messages.len() - before;

        self.total = page.total;
        self.has_next = page.has_next;
        self.current_page = ticket.page;
        self.version += 1;
        tracing::debug!(
            page = ticket.page,
            added,
            buffered = self.messages.len(),
            total = self.total,
            has_next = self.has_next,
            "history page applied"
        );
        ApplyOutcome::Applied { added }
    }

    /// Record a failed request. The buffer is left intact. Returns `false`
    /// when the failure belongs to a superseded request.
    pub fn fail(&mut self, ticket: HistoryTicket, error: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        let error = error.into();
        tracing::warn!(page = ticket.page, "history fetch failed: {error}");
        self.error = Some(error);
        true
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
