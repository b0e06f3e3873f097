//! Payment provider types and data structures
//!
//! Common types shared by every provider for requests, SDK events and the
//! normalized response.

use crate::payments::error::PaymentError;
use crate::sanitize::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported checkout providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Paystack,
    Flutterwave,
    Monnify,
    Remita,
}

impl PaymentProvider {
    pub const ALL: [PaymentProvider; 4] = [
        PaymentProvider::Paystack,
        PaymentProvider::Flutterwave,
        PaymentProvider::Monnify,
        PaymentProvider::Remita,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Paystack => "paystack",
            PaymentProvider::Flutterwave => "flutterwave",
            PaymentProvider::Monnify => "monnify",
            PaymentProvider::Remita => "remita",
        }
    }

    /// Inline checkout script published by the vendor
    pub fn script_url(&self) -> &'static str {
        match self {
            PaymentProvider::Paystack => "https://js.paystack.co/v1/inline.js",
            PaymentProvider::Flutterwave => "https://checkout.flutterwave.com/v3.js",
            PaymentProvider::Monnify => "https://sdk.monnify.com/plugin/monnify.js",
            PaymentProvider::Remita => {
                "https://login.remita.net/payment/v1/remita-pay-inline.bundle.js"
            }
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentProvider {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        PaymentProvider::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                PaymentError::validation(
                    format!("Invalid provider: {}", s),
                    "Use one of paystack, flutterwave, monnify or remita",
                )
            })
    }
}

/// Customer details supplied by the merchant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl Customer {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Payment request as supplied by the calling application (untrusted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfig {
    pub provider: PaymentProvider,
    /// Provider public key
    pub public_key: String,
    /// Amount in smallest currency unit (e.g., kobo for NGN, pesewas for GHS)
    pub amount: u64,
    /// Currency code (NGN, GHS, KES, ZAR, etc.)
    pub currency: String,
    /// Unique reference for this transaction
    pub reference: String,
    pub customer: Customer,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    /// Monnify only
    #[serde(default)]
    pub contract_code: Option<String>,
    /// Remita only
    #[serde(default)]
    pub merchant_id: Option<String>,
    /// Remita only
    #[serde(default)]
    pub service_type_id: Option<String>,
    /// CSP nonce for the provider script tag
    #[serde(default)]
    pub nonce: Option<String>,
}

impl PaymentConfig {
    pub fn new(
        provider: PaymentProvider,
        public_key: impl Into<String>,
        amount: u64,
        currency: impl Into<String>,
        reference: impl Into<String>,
        customer: Customer,
    ) -> Self {
        Self {
            provider,
            public_key: public_key.into(),
            amount,
            currency: currency.into(),
            reference: reference.into(),
            customer,
            metadata: None,
            contract_code: None,
            merchant_id: None,
            service_type_id: None,
            nonce: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_contract_code(mut self, contract_code: impl Into<String>) -> Self {
        self.contract_code = Some(contract_code.into());
        self
    }

    pub fn with_remita_ids(
        mut self,
        merchant_id: impl Into<String>,
        service_type_id: impl Into<String>,
    ) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self.service_type_id = Some(service_type_id.into());
        self
    }

    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }
}

/// Validated and sanitized request handed to a checkout SDK
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub provider: PaymentProvider,
    pub public_key: String,
    pub amount: u64,
    pub currency: String,
    pub reference: String,
    pub customer: Customer,
    pub metadata: Metadata,
    pub contract_code: Option<String>,
    pub merchant_id: Option<String>,
    pub service_type_id: Option<String>,
}

/// What the vendor widget reported when it finished
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutEvent {
    /// Completion callback with the vendor's raw payload
    Completed(serde_json::Value),
    /// The customer dismissed the widget
    Closed,
}

/// Normalized successful payment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub message: String,
    pub reference: String,
    pub transaction_id: Option<String>,
    pub amount: u64,
    pub currency: String,
    pub paid_at: DateTime<Utc>,
    pub customer: Customer,
    pub provider: PaymentProvider,
    pub metadata: Metadata,
    /// Vendor payload as received
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Succeeded(PaymentResponse),
    Closed,
    Failed(PaymentError),
}
