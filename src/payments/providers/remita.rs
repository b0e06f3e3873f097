//! Remita inline payment
//!
//! `onSuccess` carries `paymentReference` and `transactionId`; `onError`
//! payloads have neither.

use super::{field, success};
use crate::payments::error::PaymentError;
use crate::payments::types::{CheckoutRequest, PaymentOutcome, PaymentProvider};
use serde_json::Value;

pub fn normalize(request: &CheckoutRequest, raw: Value) -> PaymentOutcome {
    match field(&raw, &["paymentReference"]) {
        Some(payment_reference) => {
            let transaction_id = field(&raw, &["transactionId"]).or(Some(payment_reference));
            success(request, None, transaction_id, raw)
        }
        None => {
            let message = field(&raw, &["message", "statusMessage"])
                .unwrap_or_else(|| "Payment failed".to_string());
            PaymentOutcome::Failed(
                PaymentError::payment_failed(message).with_provider(PaymentProvider::Remita),
            )
        }
    }
}
