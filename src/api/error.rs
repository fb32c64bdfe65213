//! API error taxonomy.
//!
//! Every failed remote call collapses into an [`ApiError`]; call sites turn it
//! into a user-facing notice with [`ApiError::user_message`].

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure or request construction error.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("Request failed with status code {}", .status.as_u16())]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Reading an upload or writing a downloaded file failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Build a status error from a response body, extracting `detail`.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            detail: extract_detail(body),
        }
    }

    /// Server-provided detail, if the error carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message to show the user: server detail first, then the transport
    /// message, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(detail) = self.detail() {
            return detail.to_string();
        }
        let own = self.to_string();
        if own.trim().is_empty() {
            fallback.to_string()
        } else {
            own
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Pull a human-readable `detail` out of an error body.
///
/// FastAPI-style servers send either `{"detail": "text"}` or, for validation
/// errors, `{"detail": [{"msg": "..."}, ...]}`. List entries are joined with
/// `"; "`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(entries) => {
            let msgs: Vec<String> = entries
                .iter()
                .filter_map(|e| match e {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
