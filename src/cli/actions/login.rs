use crate::auth::{AuthOutcome, CredentialFlow, Credentials};
use crate::cli::{
    actions::{read_password, Action, ConsolePresenter},
    globals::GlobalArgs,
};
use crate::firebase::FirebaseAuth;
use anyhow::{anyhow, bail, Result};
use tracing::info;

/// Handle the login action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Login { email, password } = action else {
        bail!("unexpected action");
    };

    let password = read_password(password, "Password: ")?;

    let provider = FirebaseAuth::new(&globals.api_url, globals.api_key.clone())?;
    let flow = CredentialFlow::new(provider, ConsolePresenter);

    match flow.login(&Credentials::login(email, password)).await? {
        AuthOutcome::Success(session) => {
            info!(
                "signed in as {} ({})",
                session.display_name, session.email
            );
            Ok(())
        }
        AuthOutcome::Failure { .. } => Err(anyhow!("login failed")),
    }
}
