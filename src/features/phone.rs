//! Phone number endpoints. Phones are created through the student form; the
//! collection endpoint is read-only here.

use super::string_or_number;
use crate::{
    api::{endpoints, ApiClient, ApiError},
    validation::{self, FieldErrors},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Phone {
    pub id: u64,
    #[serde(deserialize_with = "string_or_number")]
    pub number_phone: String,
    #[serde(default)]
    pub siswa_id: Option<u64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneInput {
    pub number_phone: String,
}

impl PhoneInput {
    #[must_use]
    pub fn new(number_phone: impl Into<String>) -> Self {
        Self {
            number_phone: number_phone.into(),
        }
    }

    #[must_use]
    pub fn formatted(&self) -> Self {
        Self::new(self.number_phone.trim())
    }
}

/// Required, digits, spaces, `-`, `+` and parentheses only.
///
/// # Errors
/// Returns the failing fields.
pub fn validate(input: &PhoneInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let number = input.number_phone.trim();

    if number.is_empty() {
        errors.add("number_phone", "Phone number is required");
    } else if !validation::has_valid_phone_characters(number) {
        errors.add("number_phone", "Phone number contains invalid characters");
    }

    errors.into_result()
}

/// Fetch every phone number.
///
/// # Errors
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn list(client: &ApiClient, token: &SecretString) -> Result<Vec<Phone>, ApiError> {
    client
        .get::<Vec<Phone>>(endpoints::phone::COLLECTION, Some(token))
        .await?
        .into_data("Failed to get phones")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_phone() {
        assert!(validate(&PhoneInput::new("+62 (812) 3456-7890")).is_ok());

        let errors = validate(&PhoneInput::new(" ")).unwrap_err();
        assert_eq!(errors.get("number_phone"), Some("Phone number is required"));

        let errors = validate(&PhoneInput::new("0812 abc")).unwrap_err();
        assert_eq!(
            errors.get("number_phone"),
            Some("Phone number contains invalid characters")
        );
    }

    #[test]
    fn decodes_numeric_numbers() -> Result<(), serde_json::Error> {
        let phones: Vec<Phone> = serde_json::from_str(
            r#"[{"id":1,"number_phone":81234567890,"siswa_id":3},{"id":2,"number_phone":"0812"}]"#,
        )?;
        assert_eq!(phones[0].number_phone, "81234567890");
        assert_eq!(phones[0].siswa_id, Some(3));
        assert_eq!(phones[1].siswa_id, None);
        Ok(())
    }

    #[test]
    fn formatted_trims() {
        assert_eq!(PhoneInput::new(" 0812 ").formatted().number_phone, "0812");
    }
}
