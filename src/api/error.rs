use std::collections::BTreeMap;
use thiserror::Error;

/// Field name to server-side validation messages, as returned under `errors`.
pub type FieldMessages = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        errors: FieldMessages,
    },
    /// The server answered 2xx but the envelope reports failure.
    #[error("{message}")]
    Rejected {
        message: String,
        errors: FieldMessages,
    },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Not authenticated. Run `siswa login` first.")]
    Unauthenticated,
}

impl ApiError {
    /// Field-level messages carried by the server response, if any.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldMessages> {
        match self {
            Self::Http { errors, .. } | Self::Rejected { errors, .. } if !errors.is_empty() => {
                Some(errors)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message without the variant prefix, suitable for composing user-facing text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Config(message)
            | Self::Network(message)
            | Self::Timeout(message)
            | Self::Parse(message)
            | Self::Serialization(message)
            | Self::Http { message, .. }
            | Self::Rejected { message, .. } => message.clone(),
            Self::Unauthenticated => self.to_string(),
        }
    }
}
