//! Firebase Identity Toolkit provider: implements the provider seam over the
//! public REST surface (`accounts:signInWithPassword`, `accounts:signUp`,
//! `accounts:update`). The local Auth emulator serves the same API.

use crate::auth::provider::{AuthProvider, AuthUser, NewAccount, ProviderError};
use crate::APP_USER_AGENT;
use anyhow::{anyhow, Result};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Hosted endpoint; point at `http://localhost:9099` for the emulator.
pub const DEFAULT_API_URL: &str = "https://identitytoolkit.googleapis.com";

pub struct FirebaseAuth {
    client: Client,
    api_url: String,
    api_key: SecretString,
    // `accounts:update` authenticates with the id token minted by signUp,
    // not with the local id, so tokens are retained per created account.
    id_tokens: Mutex<HashMap<String, SecretString>>,
}

impl FirebaseAuth {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_url: &str, api_key: SecretString) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key,
            id_tokens: Mutex::new(HashMap::new()),
        })
    }

    fn endpoint(&self, operation: &str) -> Result<String> {
        let url = url::Url::parse(&self.api_url)?;

        let scheme = url.scheme();

        let host = url
            .host()
            .ok_or_else(|| anyhow!("Error parsing URL: no host specified"))?
            .to_owned();

        let port = match url.port() {
            Some(p) => p,
            None => match scheme {
                "http" => 80,
                "https" => 443,
                _ => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
            },
        };

        Ok(format!(
            "{scheme}://{host}:{port}/v1/accounts:{operation}?key={}",
            self.api_key.expose_secret()
        ))
    }

    async fn call(&self, operation: &str, payload: Value) -> Result<Value, ProviderError> {
        let endpoint = self
            .endpoint(operation)
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        // The key rides in the query string; log the operation, not the URL.
        debug!("POST accounts:{operation}");

        let response = self
            .client
            .post(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|err| ProviderError::Transport(err.without_url().to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        match error_code(&body) {
            Some(code) => {
                warn!("accounts:{operation} rejected: {code}");
                Err(ProviderError::Rejected { code })
            }
            None => Err(ProviderError::Transport(format!(
                "accounts:{operation} returned {status}"
            ))),
        }
    }

    fn remember_token(&self, user_id: &str, token: SecretString) {
        lock(&self.id_tokens).insert(user_id.to_string(), token);
    }

    fn token_for(&self, user_id: &str) -> Option<SecretString> {
        lock(&self.id_tokens).get(user_id).cloned()
    }
}

impl AuthProvider for FirebaseAuth {
    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthUser, ProviderError> {
        let body = self
            .call(
                "signInWithPassword",
                json!({
                    "email": email,
                    "password": password.expose_secret(),
                    "returnSecureToken": true
                }),
            )
            .await?;

        let response: SignInResponse = serde_json::from_value(body)
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let email = if response.email.is_empty() {
            email.to_string()
        } else {
            response.email
        };

        Ok(AuthUser {
            user_id: response.local_id,
            display_name: response.display_name,
            email,
        })
    }

    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<NewAccount, ProviderError> {
        let body = self
            .call(
                "signUp",
                json!({
                    "email": email,
                    "password": password.expose_secret(),
                    "returnSecureToken": true
                }),
            )
            .await?;

        let response: SignUpResponse = serde_json::from_value(body)
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        self.remember_token(&response.local_id, SecretString::from(response.id_token));

        Ok(NewAccount {
            user_id: response.local_id,
        })
    }

    async fn set_display_name(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> Result<(), ProviderError> {
        let token = self
            .token_for(user_id)
            .ok_or_else(|| ProviderError::UnknownUser(user_id.to_string()))?;

        self.call(
            "update",
            json!({
                "idToken": token.expose_secret(),
                "displayName": display_name,
                "returnSecureToken": false
            }),
        )
        .await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
    id_token: String,
}

/// Extract the error identifier from an Identity Toolkit error body,
/// `{"error": {"message": "CODE"}}`. Some codes carry trailing prose
/// (`WEAK_PASSWORD : Password should be at least 6 characters`); only the
/// leading token is the identifier.
fn error_code(body: &Value) -> Option<String> {
    let message = body
        .get("error")
        .and_then(|err| err.get("message"))
        .and_then(Value::as_str)?;

    let code = primary_code(message);
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

fn primary_code(message: &str) -> String {
    message
        .split([' ', ':'])
        .next()
        .unwrap_or_default()
        .to_string()
}

fn lock(tokens: &Mutex<HashMap<String, SecretString>>) -> MutexGuard<'_, HashMap<String, SecretString>> {
    tokens.lock().unwrap_or_else(PoisonError::into_inner)
}
