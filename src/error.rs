//! Error handling types and utilities.

use crate::backend::Endpoint;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// A specialized Result type for deal-discovery plumbing.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` in the binary, config loading and server setup. Search
/// branches never return it; they report through [`BackendError`].
pub type Result<T> = anyhow::Result<T>;

/// Network-layer messages that mean the backend could not be reached at all.
static CONNECTIVITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)failed to connect|connection refused|fetch failed|dns error|network is unreachable")
        .expect("connectivity pattern is valid")
});

/// Returns true when an error message looks like a connectivity failure.
pub fn is_connectivity_message(message: &str) -> bool {
    CONNECTIVITY_PATTERN.is_match(message)
}

/// Failure of a single downstream request.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend could not be reached.
    #[error("cannot reach {endpoint}: {message}")]
    Connectivity { endpoint: Endpoint, message: String },

    /// The backend answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Http {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    /// No response arrived within the branch deadline.
    #[error("{endpoint} timed out after {}s", .after.as_secs())]
    Timeout { endpoint: Endpoint, after: Duration },

    /// The response body did not match the expected schema.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    /// Any other transport failure.
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: Endpoint, message: String },
}

/// Coarse failure category, as surfaced in a search outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Connectivity,
    Http(u16),
    Timeout,
    Decode,
    Transport,
}

impl BackendError {
    /// Classify a transport error message, promoting connectivity failures.
    pub fn from_transport(endpoint: Endpoint, message: impl Into<String>) -> Self {
        let message = message.into();
        if is_connectivity_message(&message) {
            Self::Connectivity { endpoint, message }
        } else {
            Self::Transport { endpoint, message }
        }
    }

    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Connectivity { .. } => FailureKind::Connectivity,
            Self::Http { status, .. } => FailureKind::Http(*status),
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Decode { .. } => FailureKind::Decode,
            Self::Transport { .. } => FailureKind::Transport,
        }
    }

    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Connectivity { endpoint, .. }
            | Self::Http { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::Transport { endpoint, .. } => *endpoint,
        }
    }
}

/// Error returned when configuration cannot be assembled.
#[derive(Debug, thiserror::Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[from] Box<figment::Error>);
