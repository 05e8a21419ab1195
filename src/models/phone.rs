use std::fmt;

use crate::error::FieldError;

/// A phone number: 10 or 12 digits, or `+` followed by 12 digits.
///
/// The number is kept exactly as entered; there is no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(FieldError::Phone { value })
        }
    }

    pub fn is_valid(value: &str) -> bool {
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        match value.strip_prefix('+') {
            Some(rest) => rest.len() == 12 && all_digits(rest),
            None => matches!(value.len(), 10 | 12) && all_digits(value),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Phone {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}
