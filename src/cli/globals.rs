use crate::{
    api::{ApiClient, ApiConfig, ApiError},
    session::TokenStore,
};
use secrecy::SecretString;
use std::path::PathBuf;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api: ApiConfig,
    pub token_file: PathBuf,
    pub json: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api: ApiConfig, token_file: PathBuf) -> Self {
        Self {
            api,
            token_file,
            json: false,
        }
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(self.api.clone())
    }

    #[must_use]
    pub fn store(&self) -> TokenStore {
        TokenStore::new(&self.token_file)
    }

    /// Stored token, required by every authenticated subcommand.
    ///
    /// # Errors
    /// Returns `ApiError::Unauthenticated` when no token is stored.
    pub fn token(&self) -> anyhow::Result<SecretString> {
        Ok(self.store().get()?.ok_or(ApiError::Unauthenticated)?)
    }
}
