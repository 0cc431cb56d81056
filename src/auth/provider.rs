//! Provider seam: the external authentication backend that owns credential
//! verification and identity storage.

use secrecy::SecretString;
use std::future::Future;
use thiserror::Error;

/// Identity returned by a successful sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: String,
}

/// Handle to an account created by [`AuthProvider::create_account`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAccount {
    pub user_id: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider answered and refused. `code` is its native error
    /// identifier; classification happens in the controller.
    #[error("provider rejected the request: {code}")]
    Rejected { code: String },
    /// The provider holds no credential for this user.
    #[error("no credential held for user {0}")]
    UnknownUser(String),
    /// The provider could not be reached or answered garbage.
    #[error("provider transport failed: {0}")]
    Transport(String),
}

/// External authentication backend. Implementations verify credentials and
/// store identities; the controller never sees passwords beyond handing them
/// over.
pub trait AuthProvider: Send + Sync {
    fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<AuthUser, ProviderError>> + Send;

    fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<NewAccount, ProviderError>> + Send;

    fn set_display_name(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send;
}
