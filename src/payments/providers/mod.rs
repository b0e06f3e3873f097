//! Provider callback normalization
//!
//! Each vendor reports completion with its own payload shape; these modules
//! map them onto one [`PaymentOutcome`].

pub mod flutterwave;
pub mod monnify;
pub mod paystack;
pub mod remita;

use crate::payments::types::{
    CheckoutEvent, CheckoutRequest, PaymentOutcome, PaymentProvider, PaymentResponse,
};
use chrono::Utc;
use serde_json::Value;

pub(crate) const SUCCESS_MESSAGE: &str = "Payment completed successfully";

/// Map an SDK event onto the common outcome shape.
pub fn normalize(request: &CheckoutRequest, event: CheckoutEvent) -> PaymentOutcome {
    let raw = match event {
        CheckoutEvent::Closed => return PaymentOutcome::Closed,
        CheckoutEvent::Completed(raw) => raw,
    };

    match request.provider {
        PaymentProvider::Paystack => paystack::normalize(request, raw),
        PaymentProvider::Flutterwave => flutterwave::normalize(request, raw),
        PaymentProvider::Monnify => monnify::normalize(request, raw),
        PaymentProvider::Remita => remita::normalize(request, raw),
    }
}

/// First of `keys` present as a non-empty string or a number.
pub(crate) fn field(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn success(
    request: &CheckoutRequest,
    reference: Option<String>,
    transaction_id: Option<String>,
    raw: Value,
) -> PaymentOutcome {
    PaymentOutcome::Succeeded(PaymentResponse {
        message: SUCCESS_MESSAGE.to_string(),
        reference: reference.unwrap_or_else(|| request.reference.clone()),
        transaction_id,
        amount: request.amount,
        currency: request.currency.clone(),
        paid_at: Utc::now(),
        customer: request.customer.clone(),
        provider: request.provider,
        metadata: request.metadata.clone(),
        raw,
    })
}
