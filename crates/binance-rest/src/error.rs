//! Error types for REST API operations

use crate::transport::TransportError;
use binance_auth::AuthError;
use binance_types::{BinanceApiError, RecoveryStrategy};
use std::time::Duration;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The transport failed before a response arrived
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Credentials could not be loaded
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Missing API credentials for an API-key or signed endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// The exchange answered with a `{"code", "msg"}` error body
    #[error("API error (HTTP {status}): {error}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Parsed error
        error: BinanceApiError,
    },

    /// Non-success HTTP status without a recognizable error body
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body (lossy UTF-8)
        body: String,
    },

    /// Request weight or order rate limit hit (HTTP 429), or IP banned (HTTP 418)
    #[error("Rate limited (HTTP {status})")]
    RateLimited {
        /// HTTP status code
        status: u16,
        /// Milliseconds to wait, from the `Retry-After` header
        retry_after_ms: Option<u64>,
    },

    /// Response body did not match the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Per-call deadline elapsed
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// Get the recovery strategy for this error
    ///
    /// The client itself never retries; this only tells callers what would
    /// be reasonable.
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Api { error, .. } => error.recovery_strategy(),
            Self::RateLimited {
                retry_after_ms: Some(ms),
                ..
            } => RecoveryStrategy::Backoff {
                initial_ms: *ms,
                max_ms: ms.saturating_mul(2),
                multiplier: 1,
            },
            Self::RateLimited { .. } => RecoveryStrategy::rate_limit_backoff(),
            Self::Status { status, .. } if *status >= 500 => RecoveryStrategy::service_retry(),
            Self::Status { .. } => RecoveryStrategy::Fatal,
            Self::Timeout(_) | Self::Transport(_) => RecoveryStrategy::Retry {
                max_attempts: 3,
                delay_ms: 1000,
            },
            Self::Auth(_) | Self::AuthRequired => RecoveryStrategy::Fatal,
            Self::Decode(_) | Self::InvalidParameter(_) => RecoveryStrategy::Fatal,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
            || matches!(self, Self::Api { error, .. } if error.is_rate_limit())
    }

    /// The exchange error, if the response carried one
    pub fn api_error(&self) -> Option<&BinanceApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
