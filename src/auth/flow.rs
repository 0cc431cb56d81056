//! The credential-flow controller: orchestrates login and registration,
//! enforces local pre-conditions and translates every provider result into
//! exactly one outcome and one presentation action.

use crate::auth::{
    messages,
    presenter::Presenter,
    provider::{AuthProvider, ProviderError},
    AuthOutcome, Credentials, FailureCategory, FlowKind, Session,
};
use secrecy::ExposeSecret;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// A submission of the same kind is still outstanding. The new attempt
    /// is rejected up front: no provider call, no presenter call.
    #[error("a {0} flow is already in flight")]
    InFlight(FlowKind),
}

#[derive(Debug, Default)]
struct FlowState {
    login_in_flight: bool,
    register_in_flight: bool,
    session: Option<Session>,
}

/// Orchestrates login and registration against an injected provider and
/// presenter. Owns the current [`Session`] and the per-flow in-flight flags;
/// the state mutex is only locked at flow entry and exit, never across an
/// await.
pub struct CredentialFlow<P, R> {
    provider: P,
    presenter: R,
    state: Mutex<FlowState>,
}

impl<P, R> CredentialFlow<P, R>
where
    P: AuthProvider,
    R: Presenter,
{
    #[must_use]
    pub fn new(provider: P, presenter: R) -> Self {
        Self {
            provider,
            presenter,
            state: Mutex::new(FlowState::default()),
        }
    }

    /// Sign in with email and password.
    ///
    /// No local validation happens here; missing or malformed fields come
    /// back from the provider as categorized failures. On success the
    /// session is replaced and the confirmation text is shown.
    ///
    /// # Errors
    /// Returns [`FlowError::InFlight`] when a login is already outstanding.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthOutcome, FlowError> {
        let _guard = self.begin(FlowKind::Login)?;

        let outcome = match self
            .provider
            .sign_in(&credentials.email, &credentials.password)
            .await
        {
            Ok(user) if user.user_id.is_empty() => {
                // A success without an identity is a provider bug; surface
                // it instead of storing an unusable session.
                warn!("sign-in settled without a user id");
                failure(FlowKind::Login, FailureCategory::Unknown)
            }
            Ok(user) => {
                debug!(email = %user.email, "sign-in succeeded");
                AuthOutcome::Success(Session {
                    user_id: user.user_id,
                    display_name: user.display_name.unwrap_or_default(),
                    email: user.email,
                })
            }
            Err(err) => self.provider_failure(FlowKind::Login, &err),
        };

        match &outcome {
            AuthOutcome::Success(session) => {
                self.store_session(session.clone());
                self.presenter.show_message(messages::SIGNED_IN);
            }
            AuthOutcome::Failure { message, .. } => self.presenter.show_message(message),
        }

        Ok(outcome)
    }

    /// Create an account, then set its display name as a second suspending
    /// step.
    ///
    /// Local validation short-circuits before any provider call: an empty
    /// display name, then a password/confirmation mismatch. A display-name
    /// failure after a successful creation is surfaced as
    /// [`FailureCategory::UsernameUpdateFailed`]; the created account is not
    /// rolled back. On full success the presenter navigates back to the
    /// login screen exactly once and the warning text is cleared.
    ///
    /// # Errors
    /// Returns [`FlowError::InFlight`] when a registration is already
    /// outstanding.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthOutcome, FlowError> {
        let _guard = self.begin(FlowKind::Register)?;

        let display_name = credentials.display_name.as_deref().unwrap_or("");
        let confirmation = credentials
            .password_confirmation
            .as_ref()
            .map_or("", ExposeSecret::expose_secret);

        let outcome = if display_name.is_empty() {
            local_failure(messages::MISSING_USERNAME)
        } else if credentials.password.expose_secret() != confirmation {
            local_failure(messages::PASSWORD_MISMATCH)
        } else {
            match self
                .provider
                .create_account(&credentials.email, &credentials.password)
                .await
            {
                Err(err) => self.provider_failure(FlowKind::Register, &err),
                Ok(account) if account.user_id.is_empty() => {
                    warn!("account creation settled without a user id");
                    failure(FlowKind::Register, FailureCategory::Unknown)
                }
                Ok(account) => match self
                    .provider
                    .set_display_name(&account.user_id, display_name)
                    .await
                {
                    Err(err) => {
                        // The account exists with its name unset; keep that
                        // state visible rather than pretending it succeeded.
                        warn!(user_id = %account.user_id, "display name update failed: {err}");
                        failure(FlowKind::Register, FailureCategory::UsernameUpdateFailed)
                    }
                    Ok(()) => {
                        debug!(email = %credentials.email, "registration succeeded");
                        AuthOutcome::Success(Session {
                            user_id: account.user_id,
                            display_name: display_name.to_string(),
                            email: credentials.email.clone(),
                        })
                    }
                },
            }
        };

        match &outcome {
            AuthOutcome::Success(session) => {
                self.store_session(session.clone());
                self.presenter.navigate_to_login();
                self.presenter.show_message("");
            }
            AuthOutcome::Failure { message, .. } => self.presenter.show_message(message),
        }

        Ok(outcome)
    }

    /// Current session, if any flow has succeeded since the last logout.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        lock(&self.state).session.clone()
    }

    /// Drop the held session. Provider-side token invalidation is the
    /// provider's business.
    pub fn logout(&self) {
        lock(&self.state).session = None;
    }

    fn begin(&self, kind: FlowKind) -> Result<InFlightGuard<'_>, FlowError> {
        let mut state = lock(&self.state);
        let in_flight = match kind {
            FlowKind::Login => &mut state.login_in_flight,
            FlowKind::Register => &mut state.register_in_flight,
        };

        if *in_flight {
            return Err(FlowError::InFlight(kind));
        }
        *in_flight = true;

        Ok(InFlightGuard {
            state: &self.state,
            kind,
        })
    }

    fn provider_failure(&self, flow: FlowKind, err: &ProviderError) -> AuthOutcome {
        warn!("{flow} failed: {err}");

        let category = match err {
            ProviderError::Rejected { code } => messages::category_for_code(code),
            ProviderError::UnknownUser(_) | ProviderError::Transport(_) => {
                FailureCategory::Unknown
            }
        };

        failure(flow, category)
    }

    fn store_session(&self, session: Session) {
        lock(&self.state).session = Some(session);
    }
}

fn failure(flow: FlowKind, category: FailureCategory) -> AuthOutcome {
    AuthOutcome::Failure {
        category,
        message: messages::message_for(flow, category),
    }
}

fn local_failure(message: &'static str) -> AuthOutcome {
    AuthOutcome::Failure {
        category: FailureCategory::LocalValidationFailed,
        message,
    }
}

fn lock(state: &Mutex<FlowState>) -> MutexGuard<'_, FlowState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the flow's in-flight flag when the flow settles, on every exit
/// path.
struct InFlightGuard<'a> {
    state: &'a Mutex<FlowState>,
    kind: FlowKind,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        match self.kind {
            FlowKind::Login => state.login_in_flight = false,
            FlowKind::Register => state.register_in_flight = false,
        }
    }
}
