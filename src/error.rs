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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Analysis backend unreachable")]
    ConnectionFailed,
    #[error("Session not found")]
    SessionNotFound,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppError {
    pub const CONNECTION_FAILED_EXIT_CODE: i32 = 22;
    pub const SESSION_NOT_FOUND_EXIT_CODE: i32 = 23;
    pub const INVALID_CONFIG_EXIT_CODE: i32 = 2;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed => Self::CONNECTION_FAILED_EXIT_CODE,
            Self::SessionNotFound => Self::SESSION_NOT_FOUND_EXIT_CODE,
            Self::InvalidConfig(_) => Self::INVALID_CONFIG_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ConnectionFailed => {
                "Could not reach the analysis backend. Check --base-url and that the service is running."
                    .to_owned()
            }
            Self::SessionNotFound => "The requested analysis session was not found.".to_owned(),
            Self::InvalidConfig(detail) => format!("Invalid configuration: {detail}"),
        }
    }

    /// Short text for an in-panel error banner.
    #[must_use]
    pub fn banner(err: &anyhow::Error) -> String {
        match err.chain().find_map(|cause| cause.downcast_ref::<Self>()) {
            Some(Self::ConnectionFailed) => "Backend unreachable".to_owned(),
            Some(Self::SessionNotFound) => "Session not found".to_owned(),
            Some(other) => other.to_string(),
            None => err.to_string(),
        }
    }
}
