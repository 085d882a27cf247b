//! Hobby endpoints.

use super::{null_as_default, rejected};
use crate::{
    api::{endpoints, ApiClient, ApiError},
    format::format_date,
    validation::{FieldErrors, NAME_MAX_LENGTH},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Hobby {
    pub id: u64,
    pub name: String,
    /// Students that picked this hobby; only present on the hobby listing.
    #[serde(default, deserialize_with = "null_as_default")]
    pub siswas: Vec<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Hobby {
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.siswas.len()
    }

    #[must_use]
    pub fn created_date(&self) -> String {
        format_date(self.created_at.as_deref())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HobbyInput {
    pub name: String,
}

impl HobbyInput {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Payload as the API expects it.
    #[must_use]
    pub fn formatted(&self) -> Self {
        Self::new(self.name.trim())
    }
}

/// Name is required, at least 2 and at most 255 characters.
///
/// # Errors
/// Returns the failing fields.
pub fn validate(input: &HobbyInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = input.name.trim();

    if name.is_empty() {
        errors.add("name", "Hobby name is required");
    } else if name.chars().count() < 2 {
        errors.add("name", "Hobby name must be at least 2 characters long");
    } else if name.chars().count() > NAME_MAX_LENGTH {
        errors.add(
            "name",
            format!("Hobby name must be less than {NAME_MAX_LENGTH} characters"),
        );
    }

    errors.into_result()
}

/// Fetch every hobby.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn list(client: &ApiClient, token: &SecretString) -> Result<Vec<Hobby>, ApiError> {
    client
        .get::<Vec<Hobby>>(endpoints::hobby::COLLECTION, Some(token))
        .await?
        .into_data("Failed to get hobbies")
}

/// Create a hobby after local validation.
///
/// # Errors
/// Returns `ApiError::Rejected` with field errors if validation fails, or an
/// `ApiError` from the server.
pub async fn create(
    client: &ApiClient,
    token: &SecretString,
    input: &HobbyInput,
) -> Result<Hobby, ApiError> {
    validate(input).map_err(rejected)?;
    client
        .post::<_, Hobby>(
            endpoints::hobby::COLLECTION,
            Some(&input.formatted()),
            Some(token),
        )
        .await?
        .into_data("Failed to create hobby")
}

/// Rename a hobby.
///
/// # Errors
/// Returns `ApiError::Rejected` with field errors if validation fails, or an
/// `ApiError` from the server.
pub async fn update(
    client: &ApiClient,
    token: &SecretString,
    id: u64,
    input: &HobbyInput,
) -> Result<Hobby, ApiError> {
    validate(input).map_err(rejected)?;
    client
        .put::<_, Hobby>(&endpoints::hobby::item(id), &input.formatted(), Some(token))
        .await?
        .into_data("Failed to update hobby")
}

/// Delete a hobby, returning the server message.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn delete(
    client: &ApiClient,
    token: &SecretString,
    id: u64,
) -> Result<Option<String>, ApiError> {
    client
        .delete::<(), Value>(&endpoints::hobby::item(id), None, Some(token))
        .await?
        .into_message("Failed to delete hobby")
}
