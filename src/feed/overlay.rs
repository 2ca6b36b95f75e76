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

//! Annotates an index time series with external economic events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Events farther than this from every series point get no marker.
pub const MAX_MATCH_DAYS: i64 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub impact: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMarker {
    pub event_index: usize,
    pub point_index: usize,
    pub days_apart: i64,
}

/// For each event, the series point with the closest date. The earlier point
/// wins an exact tie. Series order does not matter.
#[must_use]
pub fn overlay_events(events: &[EconomicEvent], series: &[IndexPoint]) -> Vec<EventMarker> {
    events
        .iter()
        .enumerate()
        .filter_map(|(event_index, event)| {
            let (point_index, days_apart) = nearest_point(event.date, series)?;
            (days_apart <= MAX_MATCH_DAYS).then_some(EventMarker {
                event_index,
                point_index,
                days_apart,
            })
        })
        .collect()
}

fn nearest_point(date: NaiveDate, series: &[IndexPoint]) -> Option<(usize, i64)> {
    series
        .iter()
        .enumerate()
        .map(|(i, point)| (i, (point.date - date).num_days().abs(), point.date))
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.2.cmp(&b.2)))
        .map(|(i, days, _)| (i, days))
}
