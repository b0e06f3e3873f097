//! Monnify web SDK
//!
//! `onComplete` carries `paymentStatus` (or `status`), `paymentReference` and
//! `transactionReference`.

use super::{field, success};
use crate::payments::error::PaymentError;
use crate::payments::types::{CheckoutRequest, PaymentOutcome, PaymentProvider};
use serde_json::Value;

pub fn normalize(request: &CheckoutRequest, raw: Value) -> PaymentOutcome {
    let status = field(&raw, &["paymentStatus", "status"])
        .unwrap_or_default()
        .to_ascii_uppercase();

    match status.as_str() {
        "PAID" | "SUCCESS" | "OVERPAID" => {
            let reference = field(&raw, &["paymentReference"]);
            let transaction_id = field(&raw, &["transactionReference"]);
            success(request, reference, transaction_id, raw)
        }
        "USER_CANCELLED" | "CANCELLED" => PaymentOutcome::Closed,
        _ => {
            let message = field(&raw, &["paymentDescription", "message"])
                .unwrap_or_else(|| "Payment failed".to_string());
            PaymentOutcome::Failed(
                PaymentError::payment_failed(message).with_provider(PaymentProvider::Monnify),
            )
        }
    }
}
