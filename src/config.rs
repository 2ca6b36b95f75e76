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

use crate::Cli;
use crate::error::AppError;
use crate::feed::timing::{MAX_DEBOUNCE, MIN_DEBOUNCE};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_OVERSCAN: usize = 5;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub base_url: String,
    pub session_id: String,
    pub include_historical: bool,
    pub poll_interval: Duration,
    pub search_debounce: Duration,
    pub request_timeout: Duration,
    pub overscan: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            session_id: String::new(),
            include_historical: false,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl FeedConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let session_id = cli.session.trim();
        if session_id.is_empty() {
            return Err(AppError::InvalidConfig("--session must not be empty".to_owned()));
        }
        if !(cli.base_url.starts_with("http://") || cli.base_url.starts_with("https://")) {
            return Err(AppError::InvalidConfig(format!(
                "--base-url must start with http:// or https:// (got `{}`)",
                cli.base_url
            )));
        }
        let search_debounce = Duration::from_millis(cli.search_debounce_ms);
        if !(MIN_DEBOUNCE..=MAX_DEBOUNCE).contains(&search_debounce) {
            return Err(AppError::InvalidConfig(format!(
                "--search-debounce-ms must be between {} and {}",
                MIN_DEBOUNCE.as_millis(),
                MAX_DEBOUNCE.as_millis()
            )));
        }
        let poll_interval = Duration::from_millis(cli.poll_interval_ms);
        if poll_interval < MIN_POLL_INTERVAL {
            return Err(AppError::InvalidConfig(format!(
                "--poll-interval-ms must be at least {}",
                MIN_POLL_INTERVAL.as_millis()
            )));
        }
        if cli.request_timeout_secs == 0 {
            return Err(AppError::InvalidConfig("--request-timeout-secs must be positive".to_owned()));
        }

        Ok(Self {
            base_url: cli.base_url.clone(),
            session_id: session_id.to_owned(),
            include_historical: cli.history,
            poll_interval,
            search_debounce,
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            overscan: cli.overscan,
        })
    }
}
