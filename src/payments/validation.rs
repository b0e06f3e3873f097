//! Config validation and request preparation
//!
//! Nothing reaches a vendor SDK unless it passes the provider's required-field
//! rules and every user-supplied field has been sanitized.

use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::types::{CheckoutRequest, Customer, PaymentConfig, PaymentProvider};
use crate::sanitize::{
    sanitize_email, sanitize_metadata, sanitize_name, sanitize_phone, sanitize_reference, Metadata,
};
use tracing::debug;

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Check the provider-independent and provider-specific required fields.
pub fn validate_config(config: &PaymentConfig) -> PaymentResult<()> {
    let provider = config.provider;
    let fail = |message: &str, hint: &str| -> PaymentResult<()> {
        Err(PaymentError::validation(message, hint).with_provider(provider))
    };

    if config.public_key.trim().is_empty() {
        return fail(
            "Public key is required",
            "Please provide your payment provider public key",
        );
    }

    if config.customer.email.trim().is_empty() {
        return fail(
            "Customer email is required",
            "Please provide a valid customer email address",
        );
    }

    if config.amount == 0 {
        return fail(
            "Amount must be greater than 0",
            "Please provide a valid payment amount",
        );
    }

    if config.currency.trim().is_empty() {
        return fail("Currency is required", "Please provide an ISO 4217 currency code");
    }

    match provider {
        PaymentProvider::Monnify => {
            if is_blank(config.contract_code.as_deref()) {
                return fail(
                    "Contract Code is required for Monnify",
                    "Please provide your Monnify contract code",
                );
            }
            if is_blank(config.customer.name.as_deref()) {
                return fail(
                    "Customer name is required for Monnify",
                    "Please provide the customer name",
                );
            }
        }
        PaymentProvider::Flutterwave => {
            if is_blank(config.customer.phone.as_deref()) {
                return fail(
                    "Phone number is required for Flutterwave",
                    "Please provide the customer phone number",
                );
            }
        }
        PaymentProvider::Remita => {
            if is_blank(config.merchant_id.as_deref()) {
                return fail(
                    "Merchant ID is required for Remita",
                    "Please provide your Remita merchant ID",
                );
            }
            if is_blank(config.service_type_id.as_deref()) {
                return fail(
                    "Service Type ID is required for Remita",
                    "Please provide your Remita service type ID",
                );
            }
            if is_blank(config.customer.name.as_deref()) {
                return fail(
                    "Customer name is required for Remita",
                    "Please provide the customer name",
                );
            }
        }
        PaymentProvider::Paystack => {}
    }

    Ok(())
}

/// Validate `config` and build the sanitized request handed to the SDK.
pub fn prepare_checkout(config: &PaymentConfig) -> PaymentResult<CheckoutRequest> {
    validate_config(config)?;

    let provider = config.provider;
    let with_provider = |e: PaymentError| e.with_provider(provider);

    let email = sanitize_email(&config.customer.email)
        .map_err(PaymentError::from)
        .map_err(with_provider)?;
    let reference = sanitize_reference(config.reference.trim())
        .map_err(PaymentError::from)
        .map_err(with_provider)?;

    let name = config
        .customer
        .name
        .as_deref()
        .map(sanitize_name)
        .filter(|n| !n.is_empty());
    let phone = config
        .customer
        .phone
        .as_deref()
        .map(sanitize_phone)
        .filter(|p| !p.is_empty());

    // Required fields must survive cleaning, not just be present
    let name_required = matches!(provider, PaymentProvider::Monnify | PaymentProvider::Remita);
    if name_required && name.is_none() {
        return Err(with_provider(PaymentError::validation(
            format!("Customer name is required for {}", provider),
            "The customer name contains no valid characters",
        )));
    }
    if provider == PaymentProvider::Flutterwave && phone.is_none() {
        return Err(with_provider(PaymentError::validation(
            "Phone number is required for Flutterwave",
            "The customer phone number contains no valid characters",
        )));
    }

    let metadata = config
        .metadata
        .as_ref()
        .map(sanitize_metadata)
        .unwrap_or_else(Metadata::new);

    let request = CheckoutRequest {
        provider,
        public_key: config.public_key.trim().to_string(),
        amount: config.amount,
        currency: config.currency.trim().to_ascii_uppercase(),
        reference,
        customer: Customer { email, name, phone },
        metadata,
        contract_code: trimmed(config.contract_code.as_deref()),
        merchant_id: trimmed(config.merchant_id.as_deref()),
        service_type_id: trimmed(config.service_type_id.as_deref()),
    };

    debug!(
        "Checkout request prepared: provider={}, reference={}",
        request.provider, request.reference
    );
    Ok(request)
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
