use super::*;

#[test]
fn accepts_ordinary_addresses() {
    assert!(validate_email("ada@example.com"));
    assert!(validate_email("first.last+tag@sub.example.co.uk"));
}

#[test]
fn rejects_addresses_missing_parts() {
    assert!(!validate_email(""));
    assert!(!validate_email("ada"));
    assert!(!validate_email("ada@example"));
    assert!(!validate_email("@example.com"));
    assert!(!validate_email("ada@@example.com"));
    assert!(!validate_email("ada lovelace@example.com"));
}

#[test]
fn accepts_absolute_urls() {
    assert!(validate_url("https://example.com/path?q=1"));
    assert!(validate_url("mailto:ada@example.com"));
}

#[test]
fn rejects_relative_or_garbage_urls() {
    assert!(!validate_url("/relative/path"));
    assert!(!validate_url("example.com"));
    assert!(!validate_url("http://"));
    assert!(!validate_url(""));
}
