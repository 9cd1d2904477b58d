use serde::Deserialize;
use thiserror::Error;

pub const SERVER_ERROR_MESSAGE: &str = "Failed to communicate with the server";
pub const NO_RESPONSE_MESSAGE: &str = "Server did not respond. Check your connection.";
pub const PROCESSING_ERROR_MESSAGE: &str = "Failed to process request";

/// Failure surfaced to the user. `Display` yields exactly one of three messages;
/// the `cause` fields are diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{}", .detail.as_deref().unwrap_or(SERVER_ERROR_MESSAGE))]
    Server { status: u16, detail: Option<String> },

    #[error("{}", NO_RESPONSE_MESSAGE)]
    NoResponse { cause: String },

    #[error("{}", PROCESSING_ERROR_MESSAGE)]
    Processing { cause: String },
}

impl ApiError {
    /// Build the server variant from a non-2xx response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Server {
            status,
            detail: extract_detail(body),
        }
    }
}

/// Errors raised below the API client by the HTTP mechanism itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("no response: {0}")]
    NoResponse(String),

    #[error("request could not be built: {0}")]
    Request(String),
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::NoResponse(cause) => ApiError::NoResponse { cause },
            TransportError::Request(cause) => ApiError::Processing { cause },
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Processing {
            cause: value.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

// FastAPI validation failures carry `detail` as an array; only strings are shown.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}
