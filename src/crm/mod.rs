pub mod auth;
pub mod demo;
pub mod rest;
pub mod types;

use types::ErrorBody;

/// Shown when an error carries no structured message.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("CRM responded {status}")]
    Api { status: u16, body: Option<ErrorBody> },
    #[error("CRM request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode CRM response: {0}")]
    Decode(String),
    #[error("CRM rejected the request")]
    Rejected { body: ErrorBody },
    #[error("invalid CRM url: {0}")]
    InvalidUrl(String),
}

impl CrmError {
    pub fn rejected(message: &str) -> Self {
        CrmError::Rejected {
            body: ErrorBody::with_message(message),
        }
    }

    /// Structured error body, if the CRM sent one.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            CrmError::Api { body, .. } => body.as_ref(),
            CrmError::Rejected { body } => Some(body),
            CrmError::Transport(_) | CrmError::Decode(_) | CrmError::InvalidUrl(_) => None,
        }
    }
}

/// Human-readable message for a toast: `body.message`, or the generic fallback.
pub fn error_message(error: &CrmError) -> String {
    error
        .body()
        .and_then(|b| b.message.as_deref())
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}
