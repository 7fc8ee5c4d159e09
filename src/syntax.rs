//! Host name syntax checks run before any rule matching.
//!
//! Lengths are counted in Unicode scalar values. No IDNA or punycode
//! conversion happens here, so `秋田` is a two-character label.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum host length in characters
pub const MAX_HOST_LENGTH: usize = 253;

/// Maximum label length in characters
pub const MAX_LABEL_LENGTH: usize = 63;

/// Characters never allowed in a host: whitespace, control characters and
/// punctuation including the rule markers `*` and `!`.
static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\s\p{Cc},~:!@#$%^&'"(){}_*]"#)
        .expect("DISALLOWED_CHARS: hardcoded regex is invalid")
});

/// Check the host as a whole: length, leading/trailing dot, disallowed characters.
pub fn validate_host(host: &str) -> bool {
    let len = host.chars().count();
    if len == 0 || len > MAX_HOST_LENGTH {
        return false;
    }
    if host.starts_with('.') || host.ends_with('.') {
        return false;
    }
    !DISALLOWED_CHARS.is_match(host)
}

/// Check a single label: 1..=63 characters, no leading or trailing hyphen.
pub fn validate_label(label: &str) -> bool {
    let len = label.chars().count();
    if len == 0 || len > MAX_LABEL_LENGTH {
        return false;
    }
    !label.starts_with('-') && !label.ends_with('-')
}

/// A host is valid when it passes [`validate_host`] and every label passes
/// [`validate_label`].
pub fn is_valid_host(host: &str) -> bool {
    validate_host(host) && host.split('.').all(validate_label)
}
