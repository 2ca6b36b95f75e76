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

//! Merges the live message list with the paged historical log.
//!
//! Live messages are authoritative: when both sources carry the same id the
//! live copy replaces the historical one. The merged sequence is ordered by
//! `sequence_number`, with `created_at` and then `id` as tie-breakers so the
//! result is deterministic even if the origin repeats a sequence number.

use super::model::Message;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Merge `live` and `historical` into one duplicate-free, ordered sequence.
///
/// With `include_historical == false` the live list is returned as-is, in
/// arrival order.
#[must_use]
pub fn merge_messages(
    live: &[Message],
    historical: &[Message],
    include_historical: bool,
) -> Vec<Message> {
    if !include_historical {
        return live.to_vec();
    }

    let mut by_id: HashMap<&str, &Message> = HashMap::with_capacity(live.len() + historical.len());
    for msg in historical {
        by_id.insert(msg.id.as_str(), msg);
    }
    for msg in live {
        by_id.insert(msg.id.as_str(), msg);
    }

    let mut merged: Vec<Message> = by_id.into_values().cloned().collect();
    merged.sort_by(display_order);
    merged
}

/// Display order: sequence number, then timestamp, then id.
pub(crate) fn display_order(a: &Message, b: &Message) -> Ordering {
    a.sequence_number
        .cmp(&b.sequence_number)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Count adjacent pairs whose timestamps run backwards relative to their
/// sequence numbers. Order is never corrected; callers only log this.
#[must_use]
pub fn sequence_anomalies(messages: &[Message]) -> usize {
    messages.windows(2).filter(|pair| pair[1].created_at < pair[0].created_at).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MergeKey {
    live_version: u64,
    history_version: u64,
    include_historical: bool,
}

/// Memoized merge. Recomputes only when one of the input versions or the
/// include flag changes.
///
/// Owners of the live and historical lists bump their version counter on
/// every mutation; the cache never inspects contents to detect change.
#[derive(Debug, Default)]
pub struct MergeCache {
    key: Option<MergeKey>,
    merged: Vec<Message>,
    recomputations: u64,
}

impl MergeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        live: &[Message],
        live_version: u64,
        historical: &[Message],
        history_version: u64,
        include_historical: bool,
    ) -> &[Message] {
        let key = MergeKey { live_version, history_version, include_historical };
        if self.key != Some(key) {
            self.merged = merge_messages(live, historical, include_historical);
            self.key = Some(key);
            self.recomputations += 1;
            let anomalies = sequence_anomalies(&self.merged);
            if anomalies > 0 {
                tracing::warn!(
                    anomalies,
                    "message sequence numbers disagree with creation timestamps"
                );
            }
        }
        &self.merged
    }

    /// Number of times the merge has actually run.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
