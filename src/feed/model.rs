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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a pipeline message. Drives icon, colour and label.
///
/// Unrecognised tags decode to `Unknown`, which presents like `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    System,
    Reasoning,
    #[serde(alias = "tool-call", alias = "toolCall")]
    ToolCall,
    Error,
    Analysis,
    #[serde(other)]
    Unknown,
}

impl MessageType {
    /// Types a user can filter on, in cycle order.
    pub const FILTERABLE: [Self; 5] =
        [Self::System, Self::Reasoning, Self::ToolCall, Self::Error, Self::Analysis];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Reasoning => "reasoning",
            Self::ToolCall => "tool_call",
            Self::Error => "error",
            Self::Analysis => "analysis",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message emitted by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(alias = "sequenceNumber")]
    pub sequence_number: u64,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type", alias = "message_type", alias = "messageType")]
    pub message_type: MessageType,
    #[serde(default, alias = "agentName")]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "toolName")]
    pub tool_name: Option<String>,
    #[serde(default, alias = "toolArgs")]
    pub tool_args: Option<serde_json::Value>,
}

impl Message {
    /// Agent label for display. System-level messages have no agent.
    #[must_use]
    pub fn agent_label(&self) -> &str {
        self.agent_name.as_deref().filter(|name| !name.trim().is_empty()).unwrap_or("system")
    }
}
