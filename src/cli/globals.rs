use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub api_key: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, api_key: SecretString) -> Self {
        Self { api_url, api_key }
    }
}
