use crate::error::{SanitizeError, ScriptLoadError};
use crate::payments::types::PaymentProvider;
use crate::sanitize::redact_sensitive_data;
use std::fmt;

/// What went wrong during a checkout
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentErrorKind {
    /// Config is missing something the provider requires
    Validation { message: String, hint: String },
    /// A field could not be sanitized
    Sanitize(SanitizeError),
    /// The provider script never loaded
    ScriptLoad(ScriptLoadError),
    /// The provider reported a failed payment
    PaymentFailed { message: String },
    /// The SDK binding itself failed
    Sdk { message: String },
    Unknown { message: String },
}

/// Result type for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentError {
    pub kind: PaymentErrorKind,
    pub provider: Option<PaymentProvider>,
    pub context: Option<String>,
}

impl PaymentError {
    pub fn new(kind: PaymentErrorKind) -> Self {
        Self {
            kind,
            provider: None,
            context: None,
        }
    }

    pub fn validation(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::Validation {
            message: message.into(),
            hint: hint.into(),
        })
    }

    pub fn payment_failed(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::PaymentFailed {
            message: message.into(),
        })
    }

    pub fn sdk(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::Sdk {
            message: message.into(),
        })
    }

    pub fn with_provider(mut self, provider: PaymentProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Stable code surfaced to client applications
    pub fn code(&self) -> &'static str {
        match self.kind {
            PaymentErrorKind::Validation { .. } => "VALIDATION_ERROR",
            PaymentErrorKind::Sanitize(_) => "SANITIZATION_FAILED",
            PaymentErrorKind::ScriptLoad(_) => "SCRIPT_LOAD_FAILED",
            PaymentErrorKind::PaymentFailed { .. } => "PAYMENT_FAILED",
            PaymentErrorKind::Sdk { .. } => "SDK_ERROR",
            PaymentErrorKind::Unknown { .. } => "UNKNOWN_ERROR",
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match &self.kind {
            PaymentErrorKind::Validation { hint, .. } => Some(hint),
            _ => None,
        }
    }

    /// Whether the customer can usefully try again without changing input.
    /// Script load failures need the loader entry forgotten first.
    pub fn is_retryable(&self) -> bool {
        match &self.kind {
            PaymentErrorKind::ScriptLoad(e) => e.is_retryable(),
            PaymentErrorKind::Sdk { .. } | PaymentErrorKind::PaymentFailed { .. } => true,
            _ => false,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind,
            PaymentErrorKind::Validation { .. } | PaymentErrorKind::Sanitize(_)
        )
    }
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match &self.kind {
            PaymentErrorKind::Validation { message, .. } => message.clone(),
            PaymentErrorKind::Sanitize(e) => e.to_string(),
            PaymentErrorKind::ScriptLoad(e) => e.to_string(),
            PaymentErrorKind::PaymentFailed { message } => message.clone(),
            PaymentErrorKind::Sdk { message } => format!("Checkout SDK error: {}", message),
            PaymentErrorKind::Unknown { message } => {
                if message.is_empty() {
                    "Payment initialization failed".to_string()
                } else {
                    message.clone()
                }
            }
        };

        let message = match &self.context {
            Some(context) => format!("{} ({})", message, context),
            None => message,
        };

        write!(f, "{}", redact_sensitive_data(&message))
    }
}

impl std::error::Error for PaymentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            PaymentErrorKind::Sanitize(e) => Some(e),
            PaymentErrorKind::ScriptLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SanitizeError> for PaymentError {
    fn from(err: SanitizeError) -> Self {
        Self::new(PaymentErrorKind::Sanitize(err))
    }
}

impl From<ScriptLoadError> for PaymentError {
    fn from(err: ScriptLoadError) -> Self {
        Self::new(PaymentErrorKind::ScriptLoad(err))
    }
}
