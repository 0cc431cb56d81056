//! # Sesamo
//!
//! `sesamo` performs email/password sign-in and account registration against a
//! hosted identity provider and maps every provider outcome to a single
//! user-facing message.
//!
//! The reusable piece is [`auth::CredentialFlow`], which validates local form
//! invariants, delegates credential verification to an [`auth::provider::AuthProvider`]
//! and reports results through an [`auth::presenter::Presenter`]. Password
//! hashing, token issuance and session storage all belong to the provider;
//! the controller owns nothing but the mapping tables and the current session.
//!
//! [`firebase::FirebaseAuth`] implements the provider seam over the Firebase
//! Identity Toolkit REST API, which also serves the local emulator.

pub mod auth;
pub mod cli;
pub mod firebase;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
