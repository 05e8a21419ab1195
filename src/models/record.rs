use chrono::NaiveDate;

use super::{Address, Birthday, Email, Name, Phone};
use crate::error::BookError;

/// One contact: a fixed name plus phones and optional details.
///
/// Every field is already validated, so a `Record` can only hold valid data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
    email: Option<Email>,
    address: Option<Address>,
}

impl Record {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
            email: None,
            address: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Append a phone. Duplicates are allowed.
    pub fn add_phone(&mut self, phone: Phone) {
        self.phones.push(phone);
    }

    /// Remove every phone equal to `phone`. Returns whether any was removed.
    pub fn remove_phone(&mut self, phone: &Phone) -> bool {
        let before = self.phones.len();
        self.phones.retain(|p| p != phone);
        self.phones.len() != before
    }

    /// Replace every occurrence of `old` with `new`, keeping its position.
    pub fn change_phone(&mut self, old: &Phone, new: Phone) -> Result<(), BookError> {
        let mut found = false;
        for phone in self.phones.iter_mut() {
            if phone == old {
                *phone = new.clone();
                found = true;
            }
        }
        if found {
            Ok(())
        } else {
            Err(BookError::PhoneNotFound {
                phone: old.as_str().to_string(),
            })
        }
    }

    pub fn set_birthday(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = Some(email);
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    pub fn days_to_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.birthday.as_ref().map(|b| b.days_until_next(today))
    }

    /// Name match ignores case, phone match does not.
    pub fn matches(&self, pattern: &str) -> bool {
        self.name
            .as_str()
            .to_lowercase()
            .contains(&pattern.to_lowercase())
            || self.phones.iter().any(|p| p.as_str().contains(pattern))
    }
}
