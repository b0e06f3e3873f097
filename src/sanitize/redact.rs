//! Best-effort redaction of free text before it is logged or displayed.

use regex::{Captures, Regex};
use std::sync::LazyLock;

const EMAIL_MASK: &str = "***@***.***";
const PHONE_MASK: &str = "***";

// Long alphanumeric runs are treated as API keys or tokens
static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9]{20,}").expect("valid api key pattern"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_.\-]+@[A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+").expect("valid email pattern")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?[0-9]{10,}").expect("valid phone pattern"));

/// Mask key-shaped tokens (keeping their last 4 characters), emails and phone
/// numbers. Not a guarantee against leaks.
pub fn redact_sensitive_data(message: &str) -> String {
    if message.is_empty() {
        return String::new();
    }

    let redacted = API_KEY_RE.replace_all(message, |caps: &Captures| {
        let token = &caps[0];
        format!("***{}", &token[token.len() - 4..])
    });
    let redacted = EMAIL_RE.replace_all(&redacted, EMAIL_MASK);
    let redacted = PHONE_RE.replace_all(&redacted, PHONE_MASK);

    redacted.into_owned()
}
