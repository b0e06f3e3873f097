//! Paystack inline checkout
//!
//! Paystack only calls back on success; dismissal goes through `onClose`.
//! The callback carries `reference` and the transaction id as `trans` (inline
//! v1) or `transaction` (popup).

use super::{field, success};
use crate::payments::types::{CheckoutRequest, PaymentOutcome};
use serde_json::Value;

pub fn normalize(request: &CheckoutRequest, raw: Value) -> PaymentOutcome {
    let reference = field(&raw, &["reference"]);
    let transaction_id = field(&raw, &["trans", "transaction"]);
    success(request, reference, transaction_id, raw)
}
