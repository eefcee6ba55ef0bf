use serde::{Deserialize, Serialize};

/// Error payload returned by the CRM on a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<String>,
}

/// The CRM sends either a single error object or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBodyWire {
    Many(Vec<ErrorBody>),
    One(ErrorBody),
}

impl ErrorBody {
    pub fn with_message(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            error_code: None,
        }
    }

    /// Parse a raw response body. Returns None for empty or non-JSON bodies.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<ErrorBodyWire>(raw).ok()? {
            ErrorBodyWire::Many(list) => list.into_iter().next(),
            ErrorBodyWire::One(body) => Some(body),
        }
    }
}

/// Request body for the assign action.
#[derive(Debug, Clone, Serialize)]
pub struct AssignRequest<'a> {
    #[serde(rename = "leadId")]
    pub lead_id: &'a str,
}
