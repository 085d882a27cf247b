//! Response envelopes emitted by the service.
//!
//! Two shapes coexist on the server: resource controllers for students, hobbies,
//! phones and auth answer `{ "success": bool, "message", "data", "errors" }`, while
//! the users and profile controllers answer `{ "status": "success", "message",
//! "data" }`. Both deserialize into [`Envelope`], which reports success when
//! either marker says so.

use super::error::{ApiError, FieldMessages};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of error body characters surfaced to the operator.
pub const MAX_ERROR_CHARS: usize = 200;

const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl<T> Envelope<T> {
    /// Envelope used for bodiless 2xx answers (e.g. 204 No Content).
    #[must_use]
    pub fn empty_success() -> Self {
        Self {
            success: Some(true),
            status: None,
            message: None,
            data: None,
            errors: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success == Some(true) || self.status.as_deref() == Some(STATUS_SUCCESS)
    }

    #[must_use]
    pub fn field_messages(&self) -> FieldMessages {
        self.errors.as_ref().map(field_messages).unwrap_or_default()
    }

    /// Converts an unsuccessful envelope into an error, using `fallback` when the
    /// server did not send a message.
    #[must_use]
    pub fn into_rejection(self, fallback: &str) -> ApiError {
        let errors = self.field_messages();
        let message = self
            .message
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Rejected { message, errors }
    }

    /// Returns `data` of a successful envelope.
    ///
    /// # Errors
    /// Returns `ApiError::Rejected` when the envelope reports failure and
    /// `ApiError::Parse` when a successful envelope carries no data.
    pub fn into_data(self, fallback: &str) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.into_rejection(fallback));
        }
        self.data
            .ok_or_else(|| ApiError::Parse(format!("{fallback}: response has no data")))
    }

    /// Returns the server message of a successful envelope, ignoring `data`.
    ///
    /// # Errors
    /// Returns `ApiError::Rejected` when the envelope reports failure.
    pub fn into_message(self, fallback: &str) -> Result<Option<String>, ApiError> {
        if self.is_success() {
            Ok(self.message)
        } else {
            Err(self.into_rejection(fallback))
        }
    }
}

/// Server-side pagination payload nested under `data`.
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub current_page: u32,
    pub data: Vec<T>,
    pub per_page: u32,
    pub total: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl Pagination {
    /// Last page number, at least 1.
    #[must_use]
    pub fn last_page(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.per_page)).max(1)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) < self.last_page()
    }
}

/// A page of records with its pagination metadata.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> From<Paginated<T>> for Page<T> {
    fn from(paginated: Paginated<T>) -> Self {
        Self {
            pagination: Pagination {
                current_page: paginated.current_page,
                per_page: paginated.per_page,
                total: paginated.total,
            },
            items: paginated.data,
        }
    }
}

/// Decodes a response body into an envelope. Empty bodies count as success.
///
/// # Errors
/// Returns `ApiError::Parse` if the body is not a JSON envelope.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(Envelope::empty_success());
    }
    serde_json::from_str(body)
        .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
}

/// Builds the error for a non-2xx answer.
///
/// A body carrying a `success` or `status` marker is a usable envelope and its
/// `message` wins. Otherwise well-known statuses get a fixed operator message
/// and anything else falls back to the body's `message` or the raw body. Field
/// errors are always preserved so callers can compose more specific messages.
#[must_use]
pub fn http_error(status: u16, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<Envelope<Value>>(body).ok();
    let errors = parsed
        .as_ref()
        .map(Envelope::field_messages)
        .unwrap_or_default();
    let is_envelope = parsed
        .as_ref()
        .is_some_and(|envelope| envelope.success.is_some() || envelope.status.is_some());
    let server_message = parsed
        .and_then(|envelope| envelope.message)
        .map(|message| sanitize_body(&message))
        .filter(|message| !message.is_empty());

    let message = match (server_message, status_message(status)) {
        (Some(message), _) if is_envelope => message,
        (_, Some(fixed)) => fixed.to_string(),
        (Some(message), None) => message,
        (None, None) => {
            let sanitized = sanitize_body(body);
            if sanitized.is_empty() || sanitized.starts_with('<') {
                "An error occurred".to_string()
            } else {
                sanitized
            }
        }
    };

    ApiError::Http {
        status,
        message,
        errors,
    }
}

const fn status_message(status: u16) -> Option<&'static str> {
    match status {
        401 => Some("Unauthorized access. Please login again."),
        404 => Some("Resource not found."),
        422 => Some("Validation failed. Please check your input."),
        500 => Some("Server error. Please try again later."),
        _ => None,
    }
}

/// Trims and truncates bodies before they reach the terminal.
#[must_use]
pub fn sanitize_body(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_CHARS).collect()
}

/// Flattens `errors` into field messages. Accepts `{field: [msg, ..]}`,
/// `{field: msg}` and a bare list or string (stored under `general`).
fn field_messages(errors: &Value) -> FieldMessages {
    let mut messages = FieldMessages::new();
    match errors {
        Value::Object(map) => {
            for (field, value) in map {
                let list = string_list(value);
                if !list.is_empty() {
                    messages.insert(field.clone(), list);
                }
            }
        }
        Value::Array(_) | Value::String(_) => {
            let list = string_list(errors);
            if !list.is_empty() {
                messages.insert("general".to_string(), list);
            }
        }
        _ => {}
    }
    messages
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(message) => Some(message.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}
