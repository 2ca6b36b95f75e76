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

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod feed;
pub mod ui;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "analysis-feed",
    version,
    about = "Terminal viewer for live and historical multi-agent analysis streams"
)]
pub struct Cli {
    /// Analysis session to follow
    #[arg(long, short)]
    pub session: String,

    /// Base URL of the analysis backend
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Include the paged historical log from the start
    #[arg(long)]
    pub history: bool,

    /// Live message poll interval in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    /// Search-as-you-type delay in milliseconds (300-1500)
    #[arg(long, default_value_t = config::DEFAULT_SEARCH_DEBOUNCE_MS)]
    pub search_debounce_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Extra rows rendered above and below the viewport
    #[arg(long, default_value_t = config::DEFAULT_OVERSCAN)]
    pub overscan: usize,

    /// Write tracing diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (falls back to RUST_LOG, then `info`)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}
