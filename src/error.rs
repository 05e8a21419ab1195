//! Error types for the contact and note books.
//!
//! Every variant maps to one fixed, user-facing message. The command layer
//! renders them through `Display`, so the `#[error]` strings below are what
//! the user sees.

/// A field value failed its format check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Invalid phone format. Please use one of format examples: +380951112233, 380951112233 or 0951112233")]
    Phone { value: String },

    #[error("Invalid birthday format. Please enter the birthday in the format YYYY-MM-DD")]
    Birthday { value: String },

    #[error("Invalid email format.")]
    Email { value: String },

    #[error("The value cannot be empty.")]
    Empty,
}

/// Lookup and bounds errors raised by the stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    #[error("The name is not in contacts. Enter a user name please.")]
    ContactNotFound { name: String },

    #[error("The phone is not in this contact.")]
    PhoneNotFound { phone: String },

    #[error("Page size must be greater than zero.")]
    InvalidPageSize,

    /// Positional access past the end of the note book
    #[error("There is no note #{index}.")]
    NoteIndex { index: usize, len: usize },
}

/// A note query could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteQueryError {
    #[error("Incorrect command format. Enter the correct parameters")]
    Empty,

    #[error("Incorrect command format. Put the text before the tags: '{word}' follows a tag.")]
    TextAfterTag { word: String },
}

/// Malformed command arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("You have entered invalid number of arguments for this command.")]
    Arity { command: &'static str },

    #[error("Please enter a valid number.")]
    InvalidNumber { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = BookError::ContactNotFound { name: "Bob".into() };
        assert_eq!(
            err.to_string(),
            "The name is not in contacts. Enter a user name please."
        );
        assert_eq!(
            NoteQueryError::Empty.to_string(),
            "Incorrect command format. Enter the correct parameters"
        );
        assert!(FieldError::Phone { value: "1".into() }
            .to_string()
            .starts_with("Invalid phone format"));
    }
}
