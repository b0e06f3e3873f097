//! Flutterwave v3 checkout
//!
//! The redirect payload carries `status`, `tx_ref` and `transaction_id`.

use super::{field, success};
use crate::payments::error::PaymentError;
use crate::payments::types::{CheckoutRequest, PaymentOutcome, PaymentProvider};
use serde_json::Value;

pub fn normalize(request: &CheckoutRequest, raw: Value) -> PaymentOutcome {
    let status = field(&raw, &["status"])
        .unwrap_or_default()
        .to_ascii_lowercase();

    match status.as_str() {
        "successful" | "completed" => {
            let reference = field(&raw, &["tx_ref"]);
            let transaction_id = field(&raw, &["transaction_id"]);
            success(request, reference, transaction_id, raw)
        }
        "cancelled" => PaymentOutcome::Closed,
        _ => PaymentOutcome::Failed(
            PaymentError::payment_failed("Payment failed")
                .with_provider(PaymentProvider::Flutterwave),
        ),
    }
}
