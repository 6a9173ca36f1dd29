use petrescue_core::ValidationError;
use thiserror::Error;

/// Failures of a backend or geocoder call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response reached the client (connection refused, DNS, CORS, ...).
    #[error("could not reach the server: {0}")]
    Network(String),

    /// The server answered with an error status. `payload` is the body as
    /// sent, parsed as JSON when possible and kept as a string otherwise.
    #[error("server rejected the request ({status}): {}", payload_message(.payload))]
    Rejected {
        status: u16,
        payload: serde_json::Value,
    },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response from server: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    Request(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ApiError {
    pub(crate) fn network(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }

    pub(crate) fn rejected(status: u16, body: &[u8]) -> Self {
        let payload = serde_json::from_slice(body).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(body).into_owned())
        });
        ApiError::Rejected { status, payload }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Short text suitable for a notification.
    ///
    /// For rejected requests this is the server's own message: FastAPI's
    /// `detail` when it is a string, otherwise the raw payload.
    pub fn message(&self) -> String {
        match self {
            ApiError::Rejected { payload, .. } => payload_message(payload),
            ApiError::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            other => other.to_string(),
        }
    }
}

fn payload_message(payload: &serde_json::Value) -> String {
    match payload {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Object(map) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(detail) => detail.to_string(),
            None => payload.to_string(),
        },
        other => other.to_string(),
    }
}
