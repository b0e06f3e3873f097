//! Checkout SDK trait definitions
//!
//! Defines the seam between the orchestration layer and a vendor's checkout
//! widget. Implementations are thin bindings; everything else (validation,
//! sanitization, script loading, normalization) happens before and after.

use crate::payments::error::PaymentResult;
use crate::payments::types::{CheckoutEvent, CheckoutRequest, PaymentProvider};
use async_trait::async_trait;

/// Trait for vendor checkout bindings
///
/// All providers (Paystack, Flutterwave, Monnify, Remita) are driven through
/// this trait so the session can treat them uniformly.
#[async_trait]
pub trait CheckoutSdk: Send + Sync {
    fn provider(&self) -> PaymentProvider;

    /// Script that must be loaded before `open` is called
    fn script_url(&self) -> &str {
        self.provider().script_url()
    }

    /// Open the vendor widget and wait until it completes or is dismissed
    ///
    /// # Arguments
    /// * `request` - Sanitized request; fields are safe to forward verbatim
    ///
    /// # Returns
    /// * `CheckoutEvent` - The vendor's raw completion payload, or `Closed`
    async fn open(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutEvent>;
}
