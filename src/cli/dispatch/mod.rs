use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

fn secret(matches: &clap::ArgMatches, id: &str) -> Option<SecretString> {
    matches
        .get_one::<String>(id)
        .map(|value| SecretString::from(value.as_str()))
}

fn text(matches: &clap::ArgMatches, id: &str) -> String {
    matches
        .get_one::<String>(id)
        .map(String::to_string)
        .unwrap_or_default()
}

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let globals = GlobalArgs::new(
        matches
            .get_one::<String>("api-url")
            .map(String::to_string)
            .ok_or_else(|| anyhow!("missing required argument: --api-url"))?,
        secret(matches, "api-key")
            .ok_or_else(|| anyhow!("missing required argument: --api-key"))?,
    );

    // Email and username may be empty; the flow and the provider own those
    // checks and answer with the mapped warning messages.
    let action = match matches.subcommand() {
        Some(("login", sub)) => Action::Login {
            email: text(sub, "email"),
            password: secret(sub, "password"),
        },
        Some(("register", sub)) => Action::Register {
            email: text(sub, "email"),
            username: text(sub, "username"),
            password: secret(sub, "password"),
            password_confirmation: secret(sub, "password-confirm"),
        },
        _ => return Err(anyhow!("missing subcommand")),
    };

    Ok((action, globals))
}
