//! Error type for driver port operations.

/// Failure reported by an [`ArangoDriver`](super::ArangoDriver) implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    /// Endpoint list is empty or an endpoint is not a usable http(s) URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The underlying client could not be constructed.
    #[error("Client error: {0}")]
    Client(String),

    /// No endpoint could be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Credentials were rejected (HTTP 401/403).
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The server answered with an error body.
    #[error("Server error {status} (errorNum {}): {message}", error_num_label(.error_num))]
    Server {
        status: u16,
        error_num: Option<i64>,
        message: String,
    },

    /// The server answered with something that could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl DriverError {
    /// Create a Server error without an ArangoDB error number.
    pub fn server(status: u16, message: impl ToString) -> Self {
        Self::Server {
            status,
            error_num: None,
            message: message.to_string(),
        }
    }

    /// Check whether the failure happened before any server answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check whether the server refused a create because the name is taken.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Server { status: 409, .. })
    }
}

fn error_num_label(error_num: &Option<i64>) -> String {
    error_num.map_or_else(|| "-".to_string(), |n| n.to_string())
}
