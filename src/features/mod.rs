//! Resource wrappers, one module per remote resource. Each keeps its endpoint
//! calls, request/response types, payload formatting and form validation
//! together; authorization is enforced by the server.

pub mod auth;
pub mod hobby;
pub mod phone;
pub mod profile;
pub mod siswa;
pub mod users;

use crate::{
    api::{ApiError, FieldMessages},
    validation::FieldErrors,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treats `null` like a missing field for collections the server sometimes omits.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts identifiers stored as either JSON strings or numbers (phone numbers,
/// NISNs) and keeps them as text.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Wraps local validation failures in the same error type as server rejections.
pub(crate) fn rejected(errors: FieldErrors) -> ApiError {
    let mut fields = FieldMessages::new();
    for (field, message) in errors.iter() {
        fields.insert(field.to_string(), vec![message.to_string()]);
    }
    ApiError::Rejected {
        message: validation_summary(&errors),
        errors: fields,
    }
}

fn validation_summary(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join(". ")
}
