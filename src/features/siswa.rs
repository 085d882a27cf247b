//! Student ("siswa") endpoints.
//!
//! A student carries lists of phone numbers, NISNs and hobbies, but the form
//! edits a single phone number and a single NISN; the first entry of each list
//! is used when prefilling an edit.

use super::{hobby::Hobby, null_as_default, rejected, string_or_number};
use crate::{
    api::{endpoints, ApiClient, ApiError, FieldMessages},
    format::NOT_AVAILABLE,
    validation::{self, FieldErrors},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAME_MIN_LENGTH: usize = 2;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const NISN_MIN_LENGTH: usize = 5;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PhoneNumber {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(deserialize_with = "string_or_number")]
    pub number_phone: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Nisn {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(deserialize_with = "string_or_number")]
    pub nisns: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: Vec<PhoneNumber>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nisns: Vec<Nisn>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hobbies: Vec<Hobby>,
}

impl Student {
    #[must_use]
    pub fn first_phone(&self) -> Option<&str> {
        self.phone.first().map(|phone| phone.number_phone.as_str())
    }

    #[must_use]
    pub fn first_nisn(&self) -> Option<&str> {
        self.nisns.first().map(|nisn| nisn.nisns.as_str())
    }

    /// Hobby names joined with ", ", or `N/A`.
    #[must_use]
    pub fn hobby_names(&self) -> String {
        if self.hobbies.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.hobbies
                .iter()
                .map(|hobby| hobby.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    #[must_use]
    pub fn has_hobby(&self, hobby_id: u64) -> bool {
        self.hobbies.iter().any(|hobby| hobby.id == hobby_id)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    pub phone: String,
    pub nisns: String,
    pub hobbies: Vec<u64>,
}

impl StudentInput {
    /// Edit form prefill: first phone, first NISN and every hobby id.
    #[must_use]
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            phone: student.first_phone().unwrap_or_default().to_string(),
            nisns: student.first_nisn().unwrap_or_default().to_string(),
            hobbies: student.hobbies.iter().map(|hobby| hobby.id).collect(),
        }
    }

    /// Selects a hobby, or deselects it when already selected.
    pub fn toggle_hobby(&mut self, hobby_id: u64) {
        if let Some(index) = self.hobbies.iter().position(|id| *id == hobby_id) {
            self.hobbies.remove(index);
        } else {
            self.hobbies.push(hobby_id);
        }
    }

    /// Payload as the API expects it: trimmed strings, duplicate hobbies dropped.
    #[must_use]
    pub fn formatted(&self) -> Self {
        let mut hobbies = Vec::with_capacity(self.hobbies.len());
        for id in &self.hobbies {
            if !hobbies.contains(id) {
                hobbies.push(*id);
            }
        }
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            nisns: self.nisns.trim().to_string(),
            hobbies,
        }
    }
}

/// Name (≥ 2 chars), phone (≥ 10 digits), NISN (≥ 5 chars) and at least one hobby.
///
/// # Errors
/// Returns the failing fields.
pub fn validate(input: &StudentInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = input.name.trim();
    if validation::required(&mut errors, "name", name) && name.chars().count() < NAME_MIN_LENGTH {
        errors.add(
            "name",
            format!("Name must be at least {NAME_MIN_LENGTH} characters long"),
        );
    }

    let phone = input.phone.trim();
    if phone.is_empty() {
        errors.add("phone", "Phone number is required");
    } else if validation::digit_count(phone) < PHONE_MIN_DIGITS {
        errors.add(
            "phone",
            format!("Please enter a valid phone number (minimum {PHONE_MIN_DIGITS} digits)"),
        );
    }

    let nisns = input.nisns.trim();
    if nisns.is_empty() {
        errors.add("nisns", "NISN is required");
    } else if nisns.chars().count() < NISN_MIN_LENGTH {
        errors.add(
            "nisns",
            format!("NISN must be at least {NISN_MIN_LENGTH} characters long"),
        );
    }

    if input.hobbies.is_empty() {
        errors.add("hobbies", "Please select at least one hobby");
    }

    errors.into_result()
}

/// Fetch every student with phones, NISNs and hobbies.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn list(client: &ApiClient, token: &SecretString) -> Result<Vec<Student>, ApiError> {
    client
        .get::<Vec<Student>>(endpoints::siswa::COLLECTION, Some(token))
        .await?
        .into_data("Failed to get students")
}

/// Fetch one student.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn get(client: &ApiClient, token: &SecretString, id: u64) -> Result<Student, ApiError> {
    client
        .get::<Student>(&endpoints::siswa::item(id), Some(token))
        .await?
        .into_data("Failed to get student")
}

/// Create a student after local validation.
///
/// # Errors
/// Returns `ApiError::Rejected` for validation failures and uniqueness conflicts,
/// or another `ApiError` from the transport.
pub async fn create(
    client: &ApiClient,
    token: &SecretString,
    input: &StudentInput,
) -> Result<Student, ApiError> {
    validate(input).map_err(rejected)?;
    let payload = input.formatted();

    let result = match client
        .post::<_, Student>(endpoints::siswa::COLLECTION, Some(&payload), Some(token))
        .await
    {
        Ok(envelope) => envelope.into_data("Failed to create student"),
        Err(err) => Err(err),
    };

    result.map_err(|err| explain_rejection(err, &payload, "create"))
}

/// Update a student after local validation.
///
/// # Errors
/// Returns `ApiError::Rejected` for validation failures and uniqueness conflicts,
/// or another `ApiError` from the transport.
pub async fn update(
    client: &ApiClient,
    token: &SecretString,
    id: u64,
    input: &StudentInput,
) -> Result<Student, ApiError> {
    validate(input).map_err(rejected)?;
    let payload = input.formatted();

    let result = match client
        .put::<_, Student>(&endpoints::siswa::item(id), &payload, Some(token))
        .await
    {
        Ok(envelope) => envelope.into_data("Failed to update student"),
        Err(err) => Err(err),
    };

    result.map_err(|err| explain_rejection(err, &payload, "update"))
}

/// Delete a student, returning the server message.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn delete(
    client: &ApiClient,
    token: &SecretString,
    id: u64,
) -> Result<Option<String>, ApiError> {
    client
        .delete::<(), Value>(&endpoints::siswa::item(id), None, Some(token))
        .await?
        .into_message("Failed to delete student")
}

/// Turns server field errors on create/update into one readable message, naming
/// the phone number or NISN that collided with another student.
fn explain_rejection(err: ApiError, payload: &StudentInput, verb: &str) -> ApiError {
    let Some(fields) = err.field_errors() else {
        return err;
    };

    let parts = conflict_messages(fields, payload);
    if parts.is_empty() {
        return err;
    }

    ApiError::Rejected {
        message: format!("Failed to {verb} student: {}", parts.join(". ")),
        errors: fields.clone(),
    }
}

fn conflict_messages(fields: &FieldMessages, payload: &StudentInput) -> Vec<String> {
    let messages_for = |name: &str| -> Vec<&String> {
        fields
            .iter()
            .filter(|(field, _)| *field == name || field.starts_with(&format!("{name}.")))
            .flat_map(|(_, messages)| messages)
            .collect()
    };

    let mut parts = Vec::new();

    if !messages_for("phone").is_empty() {
        parts.push(format!(
            "Phone number \"{}\" is already taken by another student",
            payload.phone
        ));
    }
    if !messages_for("nisns").is_empty() {
        parts.push(format!(
            "NISN \"{}\" is already taken by another student",
            payload.nisns
        ));
    }
    for field in ["name", "hobbies"] {
        let messages = messages_for(field);
        if !messages.is_empty() {
            parts.push(
                messages
                    .iter()
                    .map(|message| message.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
    }

    parts
}
