//! Form validation helpers shared by the resource wrappers.
//!
//! Errors are collected per field so every form can report all problems at once,
//! in the order the fields are declared.

use regex::Regex;
use std::sync::LazyLock;

pub const NAME_MAX_LENGTH: usize = 255;
pub const EMAIL_MAX_LENGTH: usize = 255;
pub const ADDRESS_MAX_LENGTH: usize = 500;
pub const CITY_MAX_LENGTH: usize = 100;

pub const WEAK_PASSWORD: &str =
    "Password must be at least 8 characters with uppercase, lowercase and a number";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
// No look-around in `regex`: the allowed alphabet and the character classes are
// checked separately.
const PASSWORD_ALPHABET_PATTERN: &str = r"^[a-zA-Z\d@$!%*?&]{8,}$";
const PHONE_CHARACTERS_PATTERN: &str = r"^[\d\s\-+()]+$";

#[allow(clippy::expect_used)]
fn compile(pattern: &'static str) -> Regex {
    Regex::new(pattern).expect("validation patterns are literals")
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(EMAIL_PATTERN));
static PASSWORD_ALPHABET: LazyLock<Regex> =
    LazyLock::new(|| compile(PASSWORD_ALPHABET_PATTERN));
static PHONE_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| compile(PHONE_CHARACTERS_PATTERN));

/// Per-field validation messages, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field` unless one is already present.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push((field, message.into()));
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Converts into `Ok(())` when no field failed.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed validation.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Basic email format check.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// At least 8 characters from `[a-zA-Z0-9@$!%*?&]` with one lowercase letter,
/// one uppercase letter and one digit.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    PASSWORD_ALPHABET.is_match(password)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Digits, spaces, `-`, `+` and parentheses only.
#[must_use]
pub fn has_valid_phone_characters(phone: &str) -> bool {
    PHONE_CHARACTERS.is_match(phone)
}

#[must_use]
pub fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

/// Capitalizes the first character of a field name for messages.
#[must_use]
pub fn label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Adds "`Field` is required" when `value` is blank. Returns whether the value was present.
pub fn required(errors: &mut FieldErrors, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label(field)));
        false
    } else {
        true
    }
}

/// Email field: required, well formed, at most 255 characters.
pub fn email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if !required(errors, field, value) {
        return;
    }
    if !is_valid_email(value) {
        errors.add(field, "Please enter a valid email address");
    } else if value.chars().count() > EMAIL_MAX_LENGTH {
        errors.add(
            field,
            format!("{} must be less than {EMAIL_MAX_LENGTH} characters", label(field)),
        );
    }
}

/// New password field: `missing` when blank, otherwise it must be strong.
pub fn strong_password(errors: &mut FieldErrors, field: &'static str, value: &str, missing: &str) {
    if value.is_empty() {
        errors.add(field, missing);
    } else if !is_strong_password(value) {
        errors.add(field, WEAK_PASSWORD);
    }
}

/// Confirmation field: `missing` when blank, otherwise it must equal `password`.
pub fn confirmation(
    errors: &mut FieldErrors,
    field: &'static str,
    password: &str,
    value: &str,
    missing: &str,
) {
    if value.is_empty() {
        errors.add(field, missing);
    } else if value != password {
        errors.add(field, "Passwords do not match");
    }
}
