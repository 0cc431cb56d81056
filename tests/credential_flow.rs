//! End-to-end exercises of the credential flows through the public API,
//! with a scripted provider standing in for the identity backend.

use secrecy::SecretString;
use sesamo::auth::presenter::Presenter;
use sesamo::auth::provider::{AuthProvider, AuthUser, NewAccount, ProviderError};
use sesamo::auth::{AuthOutcome, CredentialFlow, Credentials, FailureCategory, FlowError, FlowKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Clone, Default)]
struct RecordingPresenter {
    messages: Arc<Mutex<Vec<String>>>,
    navigations: Arc<AtomicUsize>,
}

impl Presenter for RecordingPresenter {
    fn show_message(&self, text: &str) {
        self.messages.lock().unwrap().push(text.to_string());
    }

    fn navigate_to_login(&self) {
        self.navigations.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scripted backend: answers from fixed results and counts calls.
#[derive(Clone, Default)]
struct ScriptedProvider {
    sign_in: Option<Result<AuthUser, ProviderError>>,
    create_account: Option<Result<NewAccount, ProviderError>>,
    set_display_name: Option<Result<(), ProviderError>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl AuthProvider for ScriptedProvider {
    async fn sign_in(
        &self,
        _email: &str,
        _password: &SecretString,
    ) -> Result<AuthUser, ProviderError> {
        self.calls.lock().unwrap().push("sign_in");
        self.sign_in.clone().expect("unexpected sign_in call")
    }

    async fn create_account(
        &self,
        _email: &str,
        _password: &SecretString,
    ) -> Result<NewAccount, ProviderError> {
        self.calls.lock().unwrap().push("create_account");
        self.create_account
            .clone()
            .expect("unexpected create_account call")
    }

    async fn set_display_name(
        &self,
        _user_id: &str,
        _display_name: &str,
    ) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push("set_display_name");
        self.set_display_name
            .clone()
            .expect("unexpected set_display_name call")
    }
}

/// Backend whose sign-in blocks until the test releases it, to hold a flow
/// in its suspended state.
struct GatedProvider {
    gate: Arc<Notify>,
}

impl AuthProvider for GatedProvider {
    async fn sign_in(
        &self,
        email: &str,
        _password: &SecretString,
    ) -> Result<AuthUser, ProviderError> {
        self.gate.notified().await;
        Ok(AuthUser {
            user_id: "uid-gated".to_string(),
            display_name: None,
            email: email.to_string(),
        })
    }

    async fn create_account(
        &self,
        _email: &str,
        _password: &SecretString,
    ) -> Result<NewAccount, ProviderError> {
        unreachable!("gated provider only signs in")
    }

    async fn set_display_name(
        &self,
        _user_id: &str,
        _display_name: &str,
    ) -> Result<(), ProviderError> {
        unreachable!("gated provider only signs in")
    }
}

fn login_credentials() -> Credentials {
    Credentials::login("ana@example.com".to_string(), SecretString::from("hunter2"))
}

fn register_credentials() -> Credentials {
    Credentials::register(
        "ana@example.com".to_string(),
        SecretString::from("hunter2"),
        SecretString::from("hunter2"),
        "Ana".to_string(),
    )
}

#[tokio::test]
async fn registration_then_login_round_trip() {
    let presenter = RecordingPresenter::default();
    let provider = ScriptedProvider {
        sign_in: Some(Ok(AuthUser {
            user_id: "uid-1".to_string(),
            display_name: Some("Ana".to_string()),
            email: "ana@example.com".to_string(),
        })),
        create_account: Some(Ok(NewAccount {
            user_id: "uid-1".to_string(),
        })),
        set_display_name: Some(Ok(())),
        ..ScriptedProvider::default()
    };
    let flow = CredentialFlow::new(provider, presenter.clone());

    let registered = flow.register(&register_credentials()).await.unwrap();
    assert!(registered.is_success());
    assert_eq!(presenter.navigations.load(Ordering::SeqCst), 1);

    let logged_in = flow.login(&login_credentials()).await.unwrap();
    assert!(logged_in.is_success());

    let session = flow.session().expect("session should be set");
    assert_eq!(session.display_name, "Ana");

    assert_eq!(
        *presenter.messages.lock().unwrap(),
        vec![String::new(), "Logged in!".to_string()]
    );
}

#[tokio::test]
async fn partial_registration_reports_username_failure_without_rollback() {
    let presenter = RecordingPresenter::default();
    let provider = ScriptedProvider {
        create_account: Some(Ok(NewAccount {
            user_id: "uid-1".to_string(),
        })),
        set_display_name: Some(Err(ProviderError::Rejected {
            code: "INVALID_ID_TOKEN".to_string(),
        })),
        ..ScriptedProvider::default()
    };
    let calls = Arc::clone(&provider.calls);
    let flow = CredentialFlow::new(provider, presenter.clone());

    let outcome = flow.register(&register_credentials()).await.unwrap();

    assert_eq!(
        outcome,
        AuthOutcome::Failure {
            category: FailureCategory::UsernameUpdateFailed,
            message: "Username Set Failed!",
        }
    );
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["create_account", "set_display_name"]
    );
    assert_eq!(
        *presenter.messages.lock().unwrap(),
        vec!["Username Set Failed!".to_string()]
    );
}

#[tokio::test]
async fn second_login_is_rejected_while_first_is_outstanding() {
    let gate = Arc::new(Notify::new());
    let presenter = RecordingPresenter::default();
    let flow = CredentialFlow::new(
        GatedProvider {
            gate: Arc::clone(&gate),
        },
        presenter.clone(),
    );

    let first_credentials = login_credentials();
    let second_credentials = login_credentials();
    let (first, second) = tokio::join!(flow.login(&first_credentials), async {
        let outcome = flow.login(&second_credentials).await;
        gate.notify_one();
        outcome
    });

    assert_eq!(second, Err(FlowError::InFlight(FlowKind::Login)));
    assert!(first.expect("first login settles").is_success());

    // The rejected submission produced no presentation.
    assert_eq!(
        *presenter.messages.lock().unwrap(),
        vec!["Logged in!".to_string()]
    );
}

#[tokio::test]
async fn a_settled_flow_frees_the_slot_for_the_next_submission() {
    let provider = ScriptedProvider {
        sign_in: Some(Err(ProviderError::Rejected {
            code: "INVALID_PASSWORD".to_string(),
        })),
        ..ScriptedProvider::default()
    };
    let flow = CredentialFlow::new(provider, RecordingPresenter::default());

    let first = flow.login(&login_credentials()).await.unwrap();
    assert!(!first.is_success());

    // Not rejected as in-flight: the guard cleared when the first settled.
    let second = flow.login(&login_credentials()).await;
    assert!(second.is_ok());
}
