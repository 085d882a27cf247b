//! User management endpoints. Listings are paginated by the server.

use super::rejected;
use crate::{
    api::{endpoints, ApiClient, ApiError, Page, Paginated},
    format::format_date,
    validation::{self, FieldErrors, NAME_MAX_LENGTH},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub email_verified_at: Option<String>,
}

impl User {
    #[must_use]
    pub fn joined(&self) -> String {
        format_date(self.created_at.as_deref())
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// Create/edit form. Passwords are optional on update and only sent when set.
#[derive(Clone, Debug, Default)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: Option<SecretString>,
    pub password_confirmation: Option<SecretString>,
}

#[derive(Serialize)]
struct UserPayload<'a> {
    name: &'a str,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_confirmation: Option<&'a str>,
}

impl UserInput {
    /// Edit form prefill; password fields start empty.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            ..Self::default()
        }
    }

    fn password(&self) -> &str {
        self.password
            .as_ref()
            .map_or("", |secret| secret.expose_secret())
    }

    fn password_confirmation(&self) -> &str {
        self.password_confirmation
            .as_ref()
            .map_or("", |secret| secret.expose_secret())
    }

    fn has_password(&self) -> bool {
        !self.password().is_empty() || !self.password_confirmation().is_empty()
    }

    fn payload(&self) -> UserPayload<'_> {
        let send_password = self.has_password();
        UserPayload {
            name: self.name.trim(),
            email: self.email.trim().to_lowercase(),
            password: send_password.then(|| self.password()),
            password_confirmation: send_password.then(|| self.password_confirmation()),
        }
    }
}

/// Name 2..=255 characters, valid email, and a strong confirmed password for
/// new users or whenever a password field is filled on update.
///
/// # Errors
/// Returns the failing fields.
pub fn validate(input: &UserInput, is_update: bool) -> Result<(), FieldErrors> {
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

    if !is_update || input.has_password() {
        let password = input.password();
        validation::strong_password(&mut errors, "password", password, "Password is required");
        validation::confirmation(
            &mut errors,
            "password_confirmation",
            password,
            input.password_confirmation(),
            "Please confirm your password",
        );
    }

    errors.into_result()
}

#[derive(Serialize)]
struct PageQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    page: u32,
}

/// Fetch one page of users (pages start at 1).
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn list(
    client: &ApiClient,
    token: &SecretString,
    page: u32,
) -> Result<Page<User>, ApiError> {
    let query = PageQuery {
        query: None,
        page: page.max(1),
    };
    client
        .get_with_query::<_, Paginated<User>>(endpoints::users::COLLECTION, &query, Some(token))
        .await?
        .into_data("Failed to get users")
        .map(Page::from)
}

/// Search users by name or email.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn search(
    client: &ApiClient,
    token: &SecretString,
    query: &str,
    page: u32,
) -> Result<Page<User>, ApiError> {
    let query = PageQuery {
        query: Some(query.trim()),
        page: page.max(1),
    };
    client
        .get_with_query::<_, Paginated<User>>(endpoints::users::SEARCH, &query, Some(token))
        .await?
        .into_data("Failed to search users")
        .map(Page::from)
}

/// Fetch one user.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn get(client: &ApiClient, token: &SecretString, id: u64) -> Result<User, ApiError> {
    client
        .get::<User>(&endpoints::users::item(id), Some(token))
        .await?
        .into_data("Failed to get user")
}

/// Create a user after local validation.
///
/// # Errors
/// Returns `ApiError::Rejected` with field errors if validation fails, or an
/// `ApiError` from the server.
pub async fn create(
    client: &ApiClient,
    token: &SecretString,
    input: &UserInput,
) -> Result<User, ApiError> {
    validate(input, false).map_err(rejected)?;
    client
        .post::<_, User>(
            endpoints::users::COLLECTION,
            Some(&input.payload()),
            Some(token),
        )
        .await?
        .into_data("Failed to create user")
}

/// Update a user after local validation. The password is left unchanged when
/// both password fields are empty.
///
/// # Errors
/// Returns `ApiError::Rejected` with field errors if validation fails, or an
/// `ApiError` from the server.
pub async fn update(
    client: &ApiClient,
    token: &SecretString,
    id: u64,
    input: &UserInput,
) -> Result<User, ApiError> {
    validate(input, true).map_err(rejected)?;
    client
        .put::<_, User>(&endpoints::users::item(id), &input.payload(), Some(token))
        .await?
        .into_data("Failed to update user")
}

/// Delete a user, returning the server message.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn delete(
    client: &ApiClient,
    token: &SecretString,
    id: u64,
) -> Result<Option<String>, ApiError> {
    client
        .delete::<(), Value>(&endpoints::users::item(id), None, Some(token))
        .await?
        .into_message("Failed to delete user")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> Option<SecretString> {
        Some(SecretString::from(value.to_string()))
    }

    fn new_user() -> UserInput {
        UserInput {
            name: "Admin Sekolah".to_string(),
            email: " Admin@Sekolah.ID ".to_string(),
            password: secret("Rahasia123"),
            password_confirmation: secret("Rahasia123"),
        }
    }

    #[test]
    fn new_user_requires_password() {
        let input = UserInput {
            password: None,
            password_confirmation: None,
            ..new_user()
        };
        let errors = validate(&input, false).unwrap_err();
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(
            errors.get("password_confirmation"),
            Some("Please confirm your password")
        );
        assert!(validate(&new_user(), false).is_ok());
    }

    #[test]
    fn update_without_password_is_valid() {
        let input = UserInput {
            password: None,
            password_confirmation: None,
            ..new_user()
        };
        assert!(validate(&input, true).is_ok());
    }

    #[test]
    fn update_with_partial_password_is_checked() {
        let input = UserInput {
            password: None,
            password_confirmation: secret("Rahasia123"),
            ..new_user()
        };
        let errors = validate(&input, true).unwrap_err();
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(
            errors.get("password_confirmation"),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn name_and_email_rules() {
        let input = UserInput {
            name: "A".to_string(),
            email: "admin@".to_string(),
            ..new_user()
        };
        let errors = validate(&input, false).unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some("Name must be at least 2 characters long")
        );
        assert_eq!(
            errors.get("email"),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn payload_normalizes_and_skips_empty_passwords() -> Result<(), serde_json::Error> {
        let with_password = serde_json::to_value(new_user().payload())?;
        assert_eq!(with_password["email"], "admin@sekolah.id");
        assert_eq!(with_password["password"], "Rahasia123");

        let without = UserInput {
            name: " Guru ".to_string(),
            password: secret(""),
            password_confirmation: None,
            ..new_user()
        };
        let value = serde_json::to_value(without.payload())?;
        assert_eq!(value["name"], "Guru");
        assert!(value.get("password").is_none());
        assert!(value.get("password_confirmation").is_none());
        Ok(())
    }

    #[test]
    fn debug_redacts_passwords() {
        let rendered = format!("{:?}", new_user());
        assert!(!rendered.contains("Rahasia123"));
    }

    #[test]
    fn user_helpers() -> Result<(), serde_json::Error> {
        let user: User = serde_json::from_str(
            r#"{"id":1,"name":"Admin","email":"a@b.co","created_at":"2024-01-02T03:04:05Z","email_verified_at":null}"#,
        )?;
        assert_eq!(user.joined(), "2024-01-02");
        assert!(!user.is_verified());
        let prefill = UserInput::from_user(&user);
        assert_eq!(prefill.email, "a@b.co");
        assert!(prefill.password.is_none());
        Ok(())
    }
}
