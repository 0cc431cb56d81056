use crate::auth::{AuthOutcome, CredentialFlow, Credentials};
use crate::cli::{
    actions::{read_password, Action, ConsolePresenter},
    globals::GlobalArgs,
};
use crate::firebase::FirebaseAuth;
use anyhow::{anyhow, bail, Result};
use tracing::info;

/// Handle the register action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Register {
        email,
        username,
        password,
        password_confirmation,
    } = action
    else {
        bail!("unexpected action");
    };

    let password = read_password(password, "Password: ")?;
    let confirmation = read_password(password_confirmation, "Confirm password: ")?;

    let provider = FirebaseAuth::new(&globals.api_url, globals.api_key.clone())?;
    let flow = CredentialFlow::new(provider, ConsolePresenter);

    let credentials = Credentials::register(email, password, confirmation, username);

    match flow.register(&credentials).await? {
        AuthOutcome::Success(session) => {
            info!(
                "registered {} ({})",
                session.display_name, session.email
            );
            Ok(())
        }
        AuthOutcome::Failure { .. } => Err(anyhow!("registration failed")),
    }
}
