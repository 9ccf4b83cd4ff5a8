//! Email address validation.
//!
//! A lightweight structural check: one `@`, non-empty local part,
//! dotted domain. Deliverability is the mail system's problem.

use std::sync::OnceLock;

use regex::Regex;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex must compile"))
}

/// Check whether a string is structurally a valid email address.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}
