//! Credential flows: local form validation, provider delegation and the
//! deterministic mapping from provider outcomes to user-facing messages.

pub mod flow;
pub mod messages;
pub mod presenter;
pub mod provider;

pub use self::flow::{CredentialFlow, FlowError};

use secrecy::SecretString;
use std::fmt;

/// One complete login or registration attempt, from submission to terminal
/// outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
    Login,
    Register,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Register => write!(f, "register"),
        }
    }
}

/// Raw form data for one submit action. Created transiently per attempt and
/// discarded once the flow resolves; never persisted.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
    pub display_name: Option<String>,
    pub password_confirmation: Option<SecretString>,
}

impl Credentials {
    #[must_use]
    pub fn login(email: String, password: SecretString) -> Self {
        Self {
            email,
            password,
            display_name: None,
            password_confirmation: None,
        }
    }

    #[must_use]
    pub fn register(
        email: String,
        password: SecretString,
        password_confirmation: SecretString,
        display_name: String,
    ) -> Self {
        Self {
            email,
            password,
            display_name: Some(display_name),
            password_confirmation: Some(password_confirmation),
        }
    }
}

/// Failure classification shared by both flows. Categories map to messages
/// through the tables in [`messages`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureCategory {
    MissingEmail,
    MissingPassword,
    WrongPassword,
    InvalidEmail,
    UserNotFound,
    WeakPassword,
    EmailAlreadyInUse,
    UsernameUpdateFailed,
    LocalValidationFailed,
    Unknown,
}

/// Identity of the currently authenticated user, held by the controller and
/// overwritten on each successful flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
}

/// Terminal result of a flow. A `Failure` never carries a session; a
/// `Success` always carries a non-empty `user_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Success(Session),
    Failure {
        category: FailureCategory,
        message: &'static str,
    },
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn login_credentials_carry_no_register_fields() {
        let credentials =
            Credentials::login("a@example.com".to_string(), SecretString::from("secret"));
        assert_eq!(credentials.email, "a@example.com");
        assert_eq!(credentials.password.expose_secret(), "secret");
        assert!(credentials.display_name.is_none());
        assert!(credentials.password_confirmation.is_none());
    }

    #[test]
    fn register_credentials_keep_submitted_fields() {
        let credentials = Credentials::register(
            "a@example.com".to_string(),
            SecretString::from("secret"),
            SecretString::from("secret"),
            "Ana".to_string(),
        );
        assert_eq!(credentials.display_name.as_deref(), Some("Ana"));
        assert_eq!(
            credentials
                .password_confirmation
                .as_ref()
                .map(ExposeSecret::expose_secret),
            Some("secret")
        );
    }

    #[test]
    fn flow_kind_display() {
        assert_eq!(FlowKind::Login.to_string(), "login");
        assert_eq!(FlowKind::Register.to_string(), "register");
    }
}
