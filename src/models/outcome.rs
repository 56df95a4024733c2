#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::config::constants::SUCCESS_MARKER;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCode {
    ExecuteFailed,
    PrepareFailed,
    ConnectionFailed,
    MethodNotAllowed,
}

/// Result of one contact form submission as seen at the transport boundary.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<OutcomeCode>,
}

impl SubmissionOutcome {
    pub fn saved(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            code: None,
        }
    }

    pub fn failed(code: OutcomeCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code: Some(code),
        }
    }

    /// Interprets a plain text body. Only the success marker counts as
    /// success, whatever else the body says.
    pub fn from_text(body: impl Into<String>) -> Self {
        let message = body.into();
        Self {
            success: message.contains(SUCCESS_MARKER),
            message,
            code: None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(
            self.code,
            Some(OutcomeCode::ConnectionFailed | OutcomeCode::PrepareFailed)
        )
    }
}

impl Display for OutcomeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            OutcomeCode::ExecuteFailed => "execute_failed",
            OutcomeCode::PrepareFailed => "prepare_failed",
            OutcomeCode::ConnectionFailed => "connection_failed",
            OutcomeCode::MethodNotAllowed => "method_not_allowed",
        };
        write!(f, "{}", code)
    }
}
