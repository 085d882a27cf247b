//! Authentication endpoints and the session bookkeeping around them.
//!
//! Login and registration persist the issued token through [`TokenStore`];
//! logout always forgets it, even when the server call fails.

use super::{rejected, users::User};
use crate::{
    api::{endpoints, ApiClient, ApiError},
    session::TokenStore,
    validation::{self, FieldErrors, NAME_MAX_LENGTH},
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Clone, Debug, Default)]
pub struct LoginInput {
    pub email: String,
    pub password: SecretString,
}

#[derive(Clone, Debug, Default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirmation: SecretString,
}

#[derive(Clone, Debug, Default)]
pub struct ResetPasswordInput {
    /// Reset token from the password reset email.
    pub token: SecretString,
    pub email: String,
    pub password: SecretString,
    pub password_confirmation: SecretString,
}

#[derive(Serialize)]
struct Credentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_confirmation: Option<&'a str>,
}

impl<'a> Credentials<'a> {
    fn email(email: &str) -> Self {
        Self {
            name: None,
            email: email.trim().to_string(),
            token: None,
            password: None,
            password_confirmation: None,
        }
    }
}

/// `data` of a successful login or registration.
#[derive(Deserialize)]
struct AuthData {
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// # Errors
/// Returns the failing fields.
pub fn validate_login(input: &LoginInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    validation::email(&mut errors, "email", &input.email);
    if input.password.expose_secret().is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result()
}

/// # Errors
/// Returns the failing fields.
pub fn validate_register(input: &RegisterInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = input.name.trim();
    if validation::required(&mut errors, "name", name) {
        let count = name.chars().count();
        if count < 2 {
            errors.add("name", "Name must be at least 2 characters long");
        } else if count > NAME_MAX_LENGTH {
            errors.add(
                "name",
                format!("Name must be less than {NAME_MAX_LENGTH} characters"),
            );
        }
    }
    validation::email(&mut errors, "email", &input.email);
    check_new_password(&mut errors, &input.password, &input.password_confirmation);

    errors.into_result()
}

/// # Errors
/// Returns the failing fields.
pub fn validate_forgot_password(email: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    validation::email(&mut errors, "email", email);
    errors.into_result()
}

/// # Errors
/// Returns the failing fields.
pub fn validate_reset_password(input: &ResetPasswordInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if input.token.expose_secret().trim().is_empty() {
        errors.add("token", "Reset token is required");
    }
    validation::email(&mut errors, "email", &input.email);
    check_new_password(&mut errors, &input.password, &input.password_confirmation);
    errors.into_result()
}

fn check_new_password(errors: &mut FieldErrors, password: &SecretString, confirm: &SecretString) {
    let password = password.expose_secret();
    validation::strong_password(errors, "password", password, "Password is required");
    validation::confirmation(
        errors,
        "password_confirmation",
        password,
        confirm.expose_secret(),
        "Please confirm your password",
    );
}

/// Sign in and persist the issued token. Returns the user when the server sends it.
///
/// # Errors
/// Returns an error if validation fails, the server rejects the credentials,
/// the answer carries no token, or the token cannot be stored.
pub async fn login(
    client: &ApiClient,
    store: &TokenStore,
    input: &LoginInput,
) -> Result<Option<User>> {
    validate_login(input).map_err(rejected)?;

    let credentials = Credentials {
        password: Some(input.password.expose_secret()),
        ..Credentials::email(&input.email)
    };
    let data = client
        .post::<_, AuthData>(endpoints::auth::LOGIN, Some(&credentials), None)
        .await?
        .into_data("Login failed")?;

    persist(store, data)
}

/// Create an account and persist the issued token.
///
/// # Errors
/// Returns an error if validation fails, the server rejects the registration,
/// the answer carries no token, or the token cannot be stored.
pub async fn register(
    client: &ApiClient,
    store: &TokenStore,
    input: &RegisterInput,
) -> Result<Option<User>> {
    validate_register(input).map_err(rejected)?;

    let credentials = Credentials {
        name: Some(input.name.trim()),
        password: Some(input.password.expose_secret()),
        password_confirmation: Some(input.password_confirmation.expose_secret()),
        ..Credentials::email(&input.email)
    };
    let data = client
        .post::<_, AuthData>(endpoints::auth::REGISTER, Some(&credentials), None)
        .await?
        .into_data("Registration failed")?;

    persist(store, data)
}

fn persist(store: &TokenStore, data: AuthData) -> Result<Option<User>> {
    let token = data
        .token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| ApiError::Parse("Login response has no token".to_string()))?;

    store
        .set(&SecretString::from(token))
        .context("failed to store API token")?;
    Ok(data.user)
}

/// Sign out. The stored token is removed whatever the server answers; the
/// server's error, if any, is still returned.
///
/// # Errors
/// Returns an error if no token is stored, the server call fails, or the token
/// file cannot be removed.
pub async fn logout(client: &ApiClient, store: &TokenStore) -> Result<Option<String>> {
    let token = store.get()?.ok_or(ApiError::Unauthenticated)?;

    let result = match client
        .post::<(), Value>(endpoints::auth::LOGOUT, None, Some(&token))
        .await
    {
        Ok(envelope) => envelope.into_message("Logout failed"),
        Err(err) => Err(err),
    };

    store.remove()?;

    match result {
        Ok(message) => Ok(message),
        Err(err) => {
            warn!("logout request failed: {err}");
            Err(err.into())
        }
    }
}

/// Fetch the user the token belongs to.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn current_user(client: &ApiClient, token: &SecretString) -> Result<User, ApiError> {
    client
        .get::<User>(endpoints::auth::CURRENT_USER, Some(token))
        .await?
        .into_data("Failed to get current user")
}

/// Startup check: resolves the stored token to a user. A token the server no
/// longer accepts is removed; network failures leave it in place.
///
/// # Errors
/// Returns an error if the token file cannot be read or removed, or the
/// server cannot be reached.
pub async fn check_session(client: &ApiClient, store: &TokenStore) -> Result<Option<User>> {
    let Some(token) = store.get()? else {
        return Ok(None);
    };

    match current_user(client, &token).await {
        Ok(user) => Ok(Some(user)),
        Err(err) if is_stale_token(&err) => {
            debug!("stored token rejected: {err}");
            store.remove()?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn is_stale_token(err: &ApiError) -> bool {
    matches!(err, ApiError::Rejected { .. }) || err.status() == Some(401)
}

/// Ask for a password reset email.
///
/// # Errors
/// Returns an `ApiError` if validation fails or the server rejects the request.
pub async fn forgot_password(client: &ApiClient, email: &str) -> Result<Option<String>, ApiError> {
    validate_forgot_password(email).map_err(rejected)?;
    client
        .post::<_, Value>(
            endpoints::auth::FORGOT_PASSWORD,
            Some(&Credentials::email(email)),
            None,
        )
        .await?
        .into_message("Forgot password request failed")
}

/// Set a new password with a reset token.
///
/// # Errors
/// Returns an `ApiError` if validation fails or the server rejects the request.
pub async fn reset_password(
    client: &ApiClient,
    input: &ResetPasswordInput,
) -> Result<Option<String>, ApiError> {
    validate_reset_password(input).map_err(rejected)?;
    let payload = Credentials {
        token: Some(input.token.expose_secret().trim()),
        password: Some(input.password.expose_secret()),
        password_confirmation: Some(input.password_confirmation.expose_secret()),
        ..Credentials::email(&input.email)
    };
    client
        .post::<_, Value>(endpoints::auth::RESET_PASSWORD, Some(&payload), None)
        .await?
        .into_message("Password reset failed")
}

/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn send_verification_email(
    client: &ApiClient,
    token: &SecretString,
) -> Result<Option<String>, ApiError> {
    client
        .post::<(), Value>(endpoints::auth::SEND_VERIFICATION_EMAIL, None, Some(token))
        .await?
        .into_message("Failed to send verification email")
}

/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn verify_email(
    client: &ApiClient,
    token: &SecretString,
) -> Result<Option<String>, ApiError> {
    client
        .post::<(), Value>(endpoints::auth::VERIFY_EMAIL, None, Some(token))
        .await?
        .into_message("Email verification failed")
}

/// Follow the link from a verification email. Public endpoint.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn verify_email_link(
    client: &ApiClient,
    id: &str,
    hash: &str,
) -> Result<Option<String>, ApiError> {
    client
        .get::<Value>(&endpoints::auth::email_verification_link(id, hash), None)
        .await?
        .into_message("Email verification link failed")
}

/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn resend_email_verification(
    client: &ApiClient,
    token: &SecretString,
) -> Result<Option<String>, ApiError> {
    client
        .post::<(), Value>(endpoints::auth::RESEND_EMAIL_VERIFICATION, None, Some(token))
        .await?
        .into_message("Failed to resend verification email")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn login_requires_email_and_password() {
        let errors = validate_login(&LoginInput::default()).unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let input = LoginInput {
            email: "admin@sekolah.id".to_string(),
            password: secret("anything"),
        };
        assert!(validate_login(&input).is_ok());
    }

    #[test]
    fn register_checks_password_strength() {
        let input = RegisterInput {
            name: "Guru".to_string(),
            email: "guru@sekolah.id".to_string(),
            password: secret("lemah"),
            password_confirmation: secret("lemah"),
        };
        let errors = validate_register(&input).unwrap_err();
        assert_eq!(errors.get("password"), Some(validation::WEAK_PASSWORD));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn reset_requires_token() {
        let input = ResetPasswordInput {
            token: secret(" "),
            email: "guru@sekolah.id".to_string(),
            password: secret("Rahasia123"),
            password_confirmation: secret("Rahasia123"),
        };
        let errors = validate_reset_password(&input).unwrap_err();
        assert_eq!(errors.get("token"), Some("Reset token is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn credentials_trim_email_and_skip_unset_fields() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(Credentials::email(" Guru@Sekolah.ID "))?;
        assert_eq!(value, serde_json::json!({"email": "Guru@Sekolah.ID"}));
        Ok(())
    }

    #[test]
    fn stale_token_detection() {
        assert!(is_stale_token(&ApiError::Rejected {
            message: "Unauthenticated.".to_string(),
            errors: Default::default(),
        }));
        assert!(is_stale_token(&ApiError::Http {
            status: 401,
            message: "Unauthorized access. Please login again.".to_string(),
            errors: Default::default(),
        }));
        assert!(!is_stale_token(&ApiError::Network("down".to_string())));
    }

    #[test]
    fn persist_requires_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));

        let missing = AuthData {
            token: None,
            user: None,
        };
        assert!(persist(&store, missing).is_err());
        assert!(!store.is_authenticated());

        let issued = AuthData {
            token: Some("1|abc".to_string()),
            user: None,
        };
        assert!(persist(&store, issued).unwrap().is_none());
        assert!(store.is_authenticated());
    }
}
