//! The signed-in user's own profile, password and account.

use super::rejected;
use crate::{
    api::{endpoints, ApiClient, ApiError},
    validation::{self, FieldErrors, ADDRESS_MAX_LENGTH, CITY_MAX_LENGTH, NAME_MAX_LENGTH},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile as the server returns it: address and city are nested.
#[derive(Clone, Debug, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile: Option<ProfileDetails>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProfileDetails {
    #[serde(default)]
    pub alamat: Option<String>,
    #[serde(default)]
    pub kota: Option<String>,
}

/// Flattened profile used for display and as the edit form prefill.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Profile {
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    pub alamat: String,
    pub kota: String,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        let details = record.profile.unwrap_or_default();
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            alamat: details.alamat.unwrap_or_default(),
            kota: details.kota.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileInput {
    pub name: String,
    pub email: String,
    pub alamat: Option<String>,
    pub kota: Option<String>,
}

impl ProfileInput {
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            alamat: Some(profile.alamat.clone()),
            kota: Some(profile.kota.clone()),
        }
    }

    /// Payload as the API expects it: email lowercased, blank address or city as `null`.
    #[must_use]
    pub fn formatted(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            alamat: non_blank(self.alamat.as_deref()),
            kota: non_blank(self.kota.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// # Errors
/// Returns the failing fields.
pub fn validate(input: &ProfileInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = input.name.trim();
    if validation::required(&mut errors, "name", name) && name.chars().count() > NAME_MAX_LENGTH {
        errors.add(
            "name",
            format!("Name must be less than {NAME_MAX_LENGTH} characters"),
        );
    }

    validation::email(&mut errors, "email", &input.email);

    if input
        .alamat
        .as_deref()
        .is_some_and(|alamat| alamat.trim().chars().count() > ADDRESS_MAX_LENGTH)
    {
        errors.add(
            "alamat",
            format!("Address must be less than {ADDRESS_MAX_LENGTH} characters"),
        );
    }
    if input
        .kota
        .as_deref()
        .is_some_and(|kota| kota.trim().chars().count() > CITY_MAX_LENGTH)
    {
        errors.add(
            "kota",
            format!("City must be less than {CITY_MAX_LENGTH} characters"),
        );
    }

    errors.into_result()
}

#[derive(Clone, Debug, Default)]
pub struct PasswordChange {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub new_password_confirmation: SecretString,
}

#[derive(Serialize)]
struct PasswordChangePayload<'a> {
    current_password: &'a str,
    new_password: &'a str,
    new_password_confirmation: &'a str,
}

impl PasswordChange {
    fn payload(&self) -> PasswordChangePayload<'_> {
        PasswordChangePayload {
            current_password: self.current_password.expose_secret(),
            new_password: self.new_password.expose_secret(),
            new_password_confirmation: self.new_password_confirmation.expose_secret(),
        }
    }
}

/// # Errors
/// Returns the failing fields.
pub fn validate_password_change(input: &PasswordChange) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if input.current_password.expose_secret().is_empty() {
        errors.add("current_password", "Current password is required");
    }

    let new_password = input.new_password.expose_secret();
    validation::strong_password(
        &mut errors,
        "new_password",
        new_password,
        "New password is required",
    );
    validation::confirmation(
        &mut errors,
        "new_password_confirmation",
        new_password,
        input.new_password_confirmation.expose_secret(),
        "Please confirm your new password",
    );

    errors.into_result()
}

#[derive(Serialize)]
struct DeleteAccountPayload<'a> {
    password: &'a str,
}

/// Fetch the signed-in user's profile.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn get(client: &ApiClient, token: &SecretString) -> Result<Profile, ApiError> {
    client
        .get::<ProfileRecord>(endpoints::profile::CURRENT, Some(token))
        .await?
        .into_data("Failed to get profile")
        .map(Profile::from)
}

/// Update name, email, address and city.
///
/// # Errors
/// Returns `ApiError::Rejected` with field errors if validation fails, or an
/// `ApiError` from the server.
pub async fn update(
    client: &ApiClient,
    token: &SecretString,
    input: &ProfileInput,
) -> Result<Profile, ApiError> {
    validate(input).map_err(rejected)?;
    client
        .put::<_, ProfileRecord>(endpoints::profile::CURRENT, &input.formatted(), Some(token))
        .await?
        .into_data("Failed to update profile")
        .map(Profile::from)
}

/// Change the signed-in user's password, returning the server message.
///
/// # Errors
/// Returns `ApiError::Rejected` with field errors if validation fails, or an
/// `ApiError` from the server.
pub async fn change_password(
    client: &ApiClient,
    token: &SecretString,
    input: &PasswordChange,
) -> Result<Option<String>, ApiError> {
    validate_password_change(input).map_err(rejected)?;
    client
        .post::<_, Value>(
            endpoints::profile::CHANGE_PASSWORD,
            Some(&input.payload()),
            Some(token),
        )
        .await?
        .into_message("Failed to change password")
}

/// Delete the signed-in account. The server asks for the current password in
/// the request body.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn delete_account(
    client: &ApiClient,
    token: &SecretString,
    password: &SecretString,
) -> Result<Option<String>, ApiError> {
    if password.expose_secret().is_empty() {
        let mut errors = FieldErrors::new();
        errors.add("password", "Password is required");
        return Err(rejected(errors));
    }

    let payload = DeleteAccountPayload {
        password: password.expose_secret(),
    };
    client
        .delete::<_, Value>(endpoints::profile::CURRENT, Some(&payload), Some(token))
        .await?
        .into_message("Failed to delete account")
}

/// Per-user statistics; the shape is defined by the server and passed through.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn statistics(client: &ApiClient, token: &SecretString) -> Result<Value, ApiError> {
    client
        .get::<Value>(endpoints::profile::STATISTICS, Some(token))
        .await?
        .into_data("Failed to get user statistics")
}
