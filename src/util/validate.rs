//! Input validation helpers for form fields.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Loose shape check: something, `@`, something, `.`, something.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether `input` parses as an absolute URL.
#[must_use]
pub fn validate_url(input: &str) -> bool {
    url::Url::parse(input).is_ok()
}
