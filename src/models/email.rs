use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::FieldError;

/// Anchored at the start only: trailing text after a valid-looking address
/// is accepted.
static EMAIL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9._]+@[A-Za-z]+\.[A-Za-z]{2,}")
        .expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(FieldError::Email { value })
        }
    }

    pub fn is_valid(value: &str) -> bool {
        EMAIL_PREFIX.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
