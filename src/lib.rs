//! Africa Pay core
//!
//! Shared plumbing behind one checkout contract for African payment providers
//! (Paystack, Flutterwave, Monnify, Remita):
//!
//! - [`scripts`]: loads vendor checkout scripts with a per-attempt timeout,
//!   exponential backoff and per-URL dedup, over a pluggable [`ScriptHost`]
//! - [`sanitize`]: cleans and validates user-supplied fields and redacts
//!   sensitive data from messages
//! - [`payments`]: validates a payment config, prepares the sanitized request,
//!   drives a [`CheckoutSdk`] and normalizes vendor callbacks
//!
//! ```rust,no_run
//! use africa_pay_core::config::LoaderConfig;
//! use africa_pay_core::scripts::{HttpScriptHost, LoadOptions, ScriptLoader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = Arc::new(ScriptLoader::new(
//!         HttpScriptHost::new()?,
//!         LoaderConfig::from_env()?,
//!     ));
//!
//!     loader
//!         .load("https://js.paystack.co/v1/inline.js", LoadOptions::new())
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod payments;
pub mod sanitize;
pub mod scripts;
pub mod telemetry;

pub use config::LoaderConfig;
pub use error::{Error, Result, SanitizeError, ScriptLoadError};
pub use payments::{CheckoutSdk, PaymentError, PaymentSession};
pub use sanitize::{
    redact_sensitive_data, sanitize_email, sanitize_metadata, sanitize_name, sanitize_phone,
    sanitize_reference,
};
pub use scripts::{LoadOptions, LoadState, ScriptHost, ScriptLoader};
