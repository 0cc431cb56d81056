//! Outcome mapping tables, kept as plain data so they can be tested without
//! running a flow.

use crate::auth::{FailureCategory, FlowKind};

/// Fallback shown for any login failure without a mapped message.
pub const LOGIN_FAILED: &str = "Login Failed!";

/// Fallback shown for any registration failure without a mapped message.
pub const REGISTER_FAILED: &str = "Register Failed!";

/// Confirmation text after a successful sign-in.
pub const SIGNED_IN: &str = "Logged in!";

/// Local validation: the registration form had no display name.
pub const MISSING_USERNAME: &str = "Missing Username";

/// Local validation: password and confirmation differ. Wording is kept
/// exactly as shipped for compatibility with existing clients.
pub const PASSWORD_MISMATCH: &str = "Passwords does not match!";

/// Provider error identifiers, as returned by the Identity Toolkit API.
/// The controller owns this table; providers hand over the raw code.
const CODE_CATEGORIES: &[(&str, FailureCategory)] = &[
    ("MISSING_EMAIL", FailureCategory::MissingEmail),
    ("MISSING_PASSWORD", FailureCategory::MissingPassword),
    ("INVALID_PASSWORD", FailureCategory::WrongPassword),
    ("INVALID_EMAIL", FailureCategory::InvalidEmail),
    ("EMAIL_NOT_FOUND", FailureCategory::UserNotFound),
    ("WEAK_PASSWORD", FailureCategory::WeakPassword),
    ("EMAIL_EXISTS", FailureCategory::EmailAlreadyInUse),
];

const LOGIN_MESSAGES: &[(FailureCategory, &str)] = &[
    (FailureCategory::MissingEmail, "Missing Email"),
    (FailureCategory::MissingPassword, "Missing Password"),
    (FailureCategory::WrongPassword, "Wrong Password"),
    (FailureCategory::InvalidEmail, "Invalid Email"),
    (FailureCategory::UserNotFound, "User Not Found"),
];

// "Weak Paswword" is a historic typo; clients match on the exact string.
const REGISTER_MESSAGES: &[(FailureCategory, &str)] = &[
    (FailureCategory::MissingEmail, "Missing Email"),
    (FailureCategory::MissingPassword, "Missing Password"),
    (FailureCategory::WeakPassword, "Weak Paswword"),
    (FailureCategory::EmailAlreadyInUse, "Email Already In Use"),
    (FailureCategory::UsernameUpdateFailed, "Username Set Failed!"),
];

/// Classify a provider-native error code. Codes outside the table are
/// `Unknown` and pick up the flow default message.
#[must_use]
pub fn category_for_code(code: &str) -> FailureCategory {
    CODE_CATEGORIES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(FailureCategory::Unknown, |(_, category)| *category)
}

/// Message for a failure category within a flow. Categories a flow does not
/// map (for example `WeakPassword` during login) fall back to the flow
/// default, matching the original switch fallthrough.
#[must_use]
pub fn message_for(flow: FlowKind, category: FailureCategory) -> &'static str {
    let (table, fallback) = match flow {
        FlowKind::Login => (LOGIN_MESSAGES, LOGIN_FAILED),
        FlowKind::Register => (REGISTER_MESSAGES, REGISTER_FAILED),
    };

    table
        .iter()
        .find(|(known, _)| *known == category)
        .map_or(fallback, |(_, message)| *message)
}
