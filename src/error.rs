//! Error types for script loading and input sanitization
//!
//! Script load errors are `Clone` because one outcome is handed to every
//! caller that requested the same URL.

use crate::payments::PaymentError;
use thiserror::Error;

pub type ScriptLoadResult<T> = std::result::Result<T, ScriptLoadError>;
pub type SanitizeResult<T> = std::result::Result<T, SanitizeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptLoadError {
    #[error("Invalid script URL: {reason}")]
    InvalidInput { reason: String },

    #[error("Script must be loaded over HTTPS: {url}")]
    InsecureTransport { url: String },

    #[error("Failed to load script after {attempts} attempts: {url} ({last_failure})")]
    LoadFailedAfterRetries {
        url: String,
        attempts: u32,
        last_failure: AttemptFailure,
    },

    #[error("Script load task aborted: {url}")]
    Aborted { url: String },
}

impl ScriptLoadError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn insecure_transport(url: impl Into<String>) -> Self {
        Self::InsecureTransport { url: url.into() }
    }

    pub fn load_failed(url: impl Into<String>, attempts: u32, last_failure: AttemptFailure) -> Self {
        Self::LoadFailedAfterRetries {
            url: url.into(),
            attempts,
            last_failure,
        }
    }

    pub fn aborted(url: impl Into<String>) -> Self {
        Self::Aborted { url: url.into() }
    }

    /// Validation failures are raised before anything is injected; retrying
    /// them with the same URL can never succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::LoadFailedAfterRetries { .. } | Self::Aborted { .. }
        )
    }
}

/// Why a single attempt failed. Folded into
/// [`ScriptLoadError::LoadFailedAfterRetries`] once the retry budget is spent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    #[error("script loading timeout after {timeout_ms}ms")]
    TimeoutExceeded { timeout_ms: u64 },

    #[error("script load error: {message}")]
    Host { message: String },
}

impl AttemptFailure {
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::TimeoutExceeded { timeout_ms }
    }

    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    #[error("Invalid {field} format")]
    InvalidFormat { field: &'static str },

    #[error("{field} is required")]
    RequiredFieldMissing { field: &'static str },

    #[error("{field} must contain at least one valid character")]
    EmptyAfterSanitization { field: &'static str },
}

impl SanitizeError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidFormat { field }
            | Self::RequiredFieldMissing { field }
            | Self::EmptyAfterSanitization { field } => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ScriptLoad(#[from] ScriptLoadError),

    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

pub type Result<T> = std::result::Result<T, Error>;
