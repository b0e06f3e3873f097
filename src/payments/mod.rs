//! Payment checkout orchestration
//!
//! This module provides a unified request/response contract over the
//! Paystack, Flutterwave, Monnify and Remita checkout SDKs used in African
//! markets: config validation, field sanitization, script loading and
//! normalization of each vendor's callback payload.

pub mod error;
pub mod providers;
pub mod session;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::{PaymentError, PaymentErrorKind};
pub use session::{PaymentSession, SessionState};
pub use traits::CheckoutSdk;
pub use types::{
    CheckoutEvent, CheckoutRequest, Customer, PaymentConfig, PaymentOutcome, PaymentProvider,
    PaymentResponse,
};
pub use validation::{prepare_checkout, validate_config};
