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

use crate::error::AppError;
use crate::feed::{HistoryPage, HistoryQuery, Message};
use anyhow::Context as _;
use serde::Deserialize;
use std::time::Duration;

/// Read-only view of the analysis backend used by the app.
#[async_trait::async_trait]
pub trait FeedBackend: Send + Sync {
    async fn fetch_history(&self, query: &HistoryQuery) -> anyhow::Result<HistoryPage>;

    async fn fetch_live(&self, session_id: &str) -> anyhow::Result<Vec<Message>>;
}

/// Live endpoint returns either a bare array or an `items` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LivePayload {
    Bare(Vec<Message>),
    Wrapped { items: Vec<Message> },
}

impl LivePayload {
    fn into_messages(self) -> Vec<Message> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base: reqwest::Url,
}

impl FeedClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("analysis-feed/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        let base = reqwest::Url::parse(base_url)
            .with_context(|| format!("invalid base url `{base_url}`"))?;
        Ok(Self { http, base })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn history_url(&self, session_id: &str) -> anyhow::Result<reqwest::Url> {
        self.session_url(session_id, &["messages"])
    }

    pub fn live_url(&self, session_id: &str) -> anyhow::Result<reqwest::Url> {
        self.session_url(session_id, &["messages", "live"])
    }

    /// `{base}/api/sessions/{session_id}/{tail..}`, with the session id
    /// percent-encoded as a single path segment.
    fn session_url(&self, session_id: &str, tail: &[&str]) -> anyhow::Result<reqwest::Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("base url `{}` cannot carry a path", self.base))?
            .pop_if_empty()
            .extend(["api", "sessions", session_id])
            .extend(tail);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> anyhow::Result<T> {
        let response = request.send().await.map_err(|err| {
            tracing::debug!("{what} request failed: {err}");
            anyhow::Error::new(AppError::ConnectionFailed).context(format!("{what} request failed: {err}"))
        })?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow::Error::new(AppError::SessionNotFound)
                .context(format!("{what} returned {status}")));
        }
        if !status.is_success() {
            anyhow::bail!("{what} returned {status}");
        }
        let body = response.text().await.with_context(|| format!("failed to read {what} body"))?;
        serde_json::from_str(&body).with_context(|| format!("failed to decode {what} json"))
    }
}

#[async_trait::async_trait]
impl FeedBackend for FeedClient {
    async fn fetch_history(&self, query: &HistoryQuery) -> anyhow::Result<HistoryPage> {
        let mut url = self.history_url(&query.session_id)?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        let request = self.http.get(url);
        let page: HistoryPage = self.get_json(request, "history page").await?;
        tracing::debug!(
            session_id = %query.session_id,
            page = query.page,
            items = page.items.len(),
            total = page.total,
            "fetched history page"
        );
        Ok(page)
    }

    async fn fetch_live(&self, session_id: &str) -> anyhow::Result<Vec<Message>> {
        let request = self.http.get(self.live_url(session_id)?);
        let payload: LivePayload = self.get_json(request, "live messages").await?;
        Ok(payload.into_messages())
    }
}
