use std::fmt;

use crate::error::FieldError;

/// Free-form postal address; only emptiness is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        if value.is_empty() {
            return Err(FieldError::Empty);
        }
        Ok(Self(value))
    }

    /// Join whitespace-split words back into a single address line.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self, FieldError> {
        let joined = words.iter().map(|w| w.as_ref()).collect::<Vec<_>>().join(" ");
        Self::new(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
