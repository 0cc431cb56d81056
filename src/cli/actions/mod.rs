pub mod login;
pub mod register;

use crate::auth::presenter::Presenter;
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Login {
        email: String,
        password: Option<SecretString>,
    },
    Register {
        email: String,
        username: String,
        password: Option<SecretString>,
        password_confirmation: Option<SecretString>,
    },
}

/// Terminal stand-in for the warning label of a graphical client.
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn show_message(&self, text: &str) {
        if !text.is_empty() {
            eprintln!("{text}");
        }
    }

    fn navigate_to_login(&self) {
        eprintln!("Account created. Sign in with `sesamo login`.");
    }
}

pub(crate) fn read_password(given: Option<SecretString>, prompt: &str) -> Result<SecretString> {
    match given {
        Some(password) => Ok(password),
        None => Ok(SecretString::from(rpassword::prompt_password(prompt)?)),
    }
}
