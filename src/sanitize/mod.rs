//! Input sanitization for fields forwarded to vendor checkout SDKs
//!
//! Email and reference fail closed (they raise on bad input); name and phone
//! fail open and are cleaned best-effort. Metadata and free-text redaction
//! live in their own submodules.

pub mod metadata;
pub mod redact;

pub use metadata::{sanitize_metadata, Metadata};
pub use redact::redact_sensitive_data;

use crate::error::{SanitizeError, SanitizeResult};
use regex::Regex;
use std::sync::LazyLock;

pub(crate) static MARKUP_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag pattern"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

// Letters and digits of any script, whitespace, hyphen, apostrophe, dot
static NAME_DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s\-'.]").expect("valid name pattern"));

static PHONE_DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9+\-() ]").expect("valid phone pattern"));

static REFERENCE_DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\-_]").expect("valid reference pattern"));

pub(crate) fn strip_tags(input: &str) -> String {
    MARKUP_TAG_RE.replace_all(input, "").into_owned()
}

/// Strip markup, trim and lowercase an email, then check its shape.
///
/// Empty input means "absent" and comes back as an empty string; whether the
/// field is required is the caller's decision.
pub fn sanitize_email(email: &str) -> SanitizeResult<String> {
    if email.is_empty() {
        return Ok(String::new());
    }

    let cleaned = strip_tags(email).trim().to_lowercase();

    if !EMAIL_RE.is_match(&cleaned) {
        return Err(SanitizeError::InvalidFormat { field: "email" });
    }

    Ok(cleaned)
}

pub fn sanitize_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let cleaned = strip_tags(name);
    NAME_DISALLOWED_RE
        .replace_all(&cleaned, "")
        .trim()
        .to_string()
}

/// Keep digits, `+`, `-`, parentheses and spaces.
pub fn sanitize_phone(phone: &str) -> String {
    PHONE_DISALLOWED_RE
        .replace_all(phone, "")
        .trim()
        .to_string()
}

/// Keep ASCII letters, digits, hyphen and underscore.
pub fn sanitize_reference(reference: &str) -> SanitizeResult<String> {
    if reference.is_empty() {
        return Err(SanitizeError::RequiredFieldMissing { field: "reference" });
    }

    let cleaned = REFERENCE_DISALLOWED_RE.replace_all(reference, "");

    if cleaned.is_empty() {
        return Err(SanitizeError::EmptyAfterSanitization { field: "reference" });
    }

    Ok(cleaned.into_owned())
}
