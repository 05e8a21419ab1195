//! Contact commands: add, delete, field setters and getters.

use anyhow::Result;
use chrono::NaiveDate;

use super::display::days_label;
use super::parse::{expect_args, Command};
use crate::book::AddressBook;
use crate::models::{Address, Birthday, Email, Name, Phone, Record};

/// `add <name> [phone] [birthday]`
///
/// Every supplied value is validated before the book is touched, so a bad
/// birthday never leaves a half-added phone behind.
pub fn add_contact(book: &mut AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::AddContact, args, 1, 3)?;

    let name = Name::new(args[0].as_str())?;
    let phone = args.get(1).map(|p| Phone::new(p.as_str())).transpose()?;
    let birthday = args.get(2).map(|b| Birthday::new(b.as_str())).transpose()?;

    if let Some(record) = book.get_mut(name.as_str()) {
        let Some(phone) = phone else {
            return Ok(format!("A contact named {} already exists.", name));
        };
        let reply = match &birthday {
            Some(b) => format!(
                "Phone number {} and birthday {} have been assigned to contact named {}.",
                phone, b, name
            ),
            None => format!("Phone number {} has been assigned to contact named {}.", phone, name),
        };
        record.add_phone(phone);
        if let Some(b) = birthday {
            record.set_birthday(b);
        }
        return Ok(reply);
    }

    let reply = match (&phone, &birthday) {
        (None, _) => format!("Contact named {} has been added.", name),
        (Some(p), None) => format!("Contact named {} with a phone number {} has been added.", name, p),
        (Some(p), Some(b)) => format!(
            "Contact named {} with a phone number {} and {} birthday has been added.",
            name, p, b
        ),
    };

    let mut record = Record::new(name);
    if let Some(p) = phone {
        record.add_phone(p);
    }
    if let Some(b) = birthday {
        record.set_birthday(b);
    }
    book.add(record);
    Ok(reply)
}

/// `delete <name>`
pub fn delete_contact(book: &mut AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::DeleteContact, args, 1, 1)?;
    let removed = book.remove(&args[0])?;
    Ok(format!("Contact {} has been deleted.", removed.name()))
}

/// `add birthday <name> <YYYY-MM-DD>`
pub fn add_birthday(book: &mut AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::AddBirthday, args, 2, 2)?;
    let record = book.record_mut(&args[0])?;
    let birthday = Birthday::new(args[1].as_str())?;
    let reply = format!("{}'s birthday {} has been added.", record.name(), birthday);
    record.set_birthday(birthday);
    Ok(reply)
}

/// `add email <name> <email>`
pub fn add_email(book: &mut AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::AddEmail, args, 2, 2)?;
    let record = book.record_mut(&args[0])?;
    let email = Email::new(args[1].as_str())?;
    let reply = format!("Email {} for {} has been added.", email, record.name());
    record.set_email(email);
    Ok(reply)
}

/// `add address <name> <words...>`
pub fn add_address(book: &mut AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::AddAddress, args, 2, usize::MAX)?;
    let record = book.record_mut(&args[0])?;
    let address = Address::from_words(&args[1..])?;
    let reply = format!("The address {} for {} has been added.", address, record.name());
    record.set_address(address);
    Ok(reply)
}

/// `change phone <name> <old> <new>`
pub fn change_phone(book: &mut AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::ChangePhone, args, 3, 3)?;
    let record = book.record_mut(&args[0])?;
    let old = Phone::new(args[1].as_str())?;
    let new = Phone::new(args[2].as_str())?;
    let reply = format!("{}'s phone number is now {}.", record.name(), new);
    record.change_phone(&old, new)?;
    Ok(reply)
}

/// `delete phone <name> <phone>`
pub fn delete_phone(book: &mut AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::DeletePhone, args, 2, 2)?;
    let record = book.record_mut(&args[0])?;
    let phone = Phone::new(args[1].as_str())?;
    if !record.remove_phone(&phone) {
        return Err(crate::error::BookError::PhoneNotFound {
            phone: phone.to_string(),
        }
        .into());
    }
    Ok(format!("{}'s phone number {} has been removed.", record.name(), phone))
}

/// `get phone <name>`
pub fn get_phone(book: &AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::GetPhone, args, 1, 1)?;
    let record = book.record(&args[0])?;
    if record.phones().is_empty() {
        return Ok(format!("There are no phone numbers for a contact named {}.", record.name()));
    }
    let phones: Vec<String> = record.phones().iter().map(|p| format!("  {}", p)).collect();
    Ok(format!("{}\n{}", record.name(), phones.join("\n")))
}

/// `get birthday <name>`
pub fn get_birthday(book: &AddressBook, args: &[String], today: NaiveDate) -> Result<String> {
    expect_args(Command::GetBirthday, args, 1, 1)?;
    let record = book.record(&args[0])?;
    match record.birthday() {
        None => Ok(format!("There is no birthdate for a contact named {}.", record.name())),
        Some(b) => Ok(format!(
            "{}\n  birthday {} ({})",
            record.name(),
            b,
            days_label(b.days_until_next(today))
        )),
    }
}

/// `get email <name>`
pub fn get_email(book: &AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::GetEmail, args, 1, 1)?;
    let record = book.record(&args[0])?;
    match record.email() {
        None => Ok(format!("There is no email for a contact named {}.", record.name())),
        Some(e) => Ok(format!("{}\n  {}", record.name(), e)),
    }
}

/// `get address <name>`
pub fn get_address(book: &AddressBook, args: &[String]) -> Result<String> {
    expect_args(Command::GetAddress, args, 1, 1)?;
    let record = book.record(&args[0])?;
    match record.address() {
        None => Ok(format!("There is no address for a contact named {}.", record.name())),
        Some(a) => Ok(format!("{}\n  {}", record.name(), a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BookError, CommandError, FieldError};

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    #[test]
    fn test_add_then_add_phone_keeps_one_entry() {
        let mut book = AddressBook::new();
        assert_eq!(
            add_contact(&mut book, &args("Alice")).unwrap(),
            "Contact named Alice has been added."
        );
        assert_eq!(
            add_contact(&mut book, &args("Alice 0991234567")).unwrap(),
            "Phone number 0991234567 has been assigned to contact named Alice."
        );

        assert_eq!(book.len(), 1);
        assert_eq!(book.get("Alice").unwrap().phones().len(), 1);
    }

    #[test]
    fn test_add_existing_without_phone() {
        let mut book = AddressBook::new();
        add_contact(&mut book, &args("Alice")).unwrap();
        assert_eq!(
            add_contact(&mut book, &args("Alice")).unwrap(),
            "A contact named Alice already exists."
        );
    }

    #[test]
    fn test_add_with_phone_and_birthday() {
        let mut book = AddressBook::new();
        let reply = add_contact(&mut book, &args("Bob 380671234567 1990-03-01")).unwrap();
        assert_eq!(
            reply,
            "Contact named Bob with a phone number 380671234567 and 1990-03-01 birthday has been added."
        );
        let bob = book.get("Bob").unwrap();
        assert_eq!(bob.birthday().unwrap().as_str(), "1990-03-01");
    }

    #[test]
    fn test_add_is_atomic_on_bad_birthday() {
        let mut book = AddressBook::new();
        add_contact(&mut book, &args("Alice")).unwrap();

        let err = add_contact(&mut book, &args("Alice 0991234567 2999-01-01")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FieldError>(),
            Some(FieldError::Birthday { .. })
        ));
        assert!(book.get("Alice").unwrap().phones().is_empty());

        assert!(add_contact(&mut book, &args("Carol 0991234567 nope")).is_err());
        assert!(!book.contains("Carol"));
    }

    #[test]
    fn test_add_bad_phone() {
        let mut book = AddressBook::new();
        let err = add_contact(&mut book, &args("Alice 123")).unwrap_err();
        assert!(matches!(err.downcast_ref::<FieldError>(), Some(FieldError::Phone { .. })));
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_arity() {
        let mut book = AddressBook::new();
        let err = add_contact(&mut book, &[]).unwrap_err();
        assert!(matches!(err.downcast_ref::<CommandError>(), Some(CommandError::Arity { .. })));
    }

    #[test]
    fn test_delete_contact() {
        let mut book = AddressBook::new();
        add_contact(&mut book, &args("Alice")).unwrap();

        let err = delete_contact(&mut book, &args("Bob")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BookError>(),
            Some(BookError::ContactNotFound { .. })
        ));
        assert_eq!(book.len(), 1);

        assert_eq!(
            delete_contact(&mut book, &args("Alice")).unwrap(),
            "Contact Alice has been deleted."
        );
        assert!(book.is_empty());
    }

    #[test]
    fn test_field_setters() {
        let mut book = AddressBook::new();
        add_contact(&mut book, &args("Alice")).unwrap();

        add_birthday(&mut book, &args("Alice 1990-03-01")).unwrap();
        add_email(&mut book, &args("Alice alice@example.com")).unwrap();
        assert_eq!(
            add_address(&mut book, &args("Alice 12 Main St")).unwrap(),
            "The address 12 Main St for Alice has been added."
        );

        let alice = book.get("Alice").unwrap();
        assert_eq!(alice.birthday().unwrap().as_str(), "1990-03-01");
        assert_eq!(alice.email().unwrap().as_str(), "alice@example.com");
        assert_eq!(alice.address().unwrap().as_str(), "12 Main St");

        assert!(add_email(&mut book, &args("Alice not-an-email")).is_err());
        assert_eq!(book.get("Alice").unwrap().email().unwrap().as_str(), "alice@example.com");

        assert!(add_birthday(&mut book, &args("Nobody 1990-03-01")).is_err());
    }

    #[test]
    fn test_change_and_delete_phone() {
        let mut book = AddressBook::new();
        add_contact(&mut book, &args("Alice 0991234567")).unwrap();

        assert_eq!(
            change_phone(&mut book, &args("Alice 0991234567 0501234567")).unwrap(),
            "Alice's phone number is now 0501234567."
        );
        assert!(change_phone(&mut book, &args("Alice 0991234567 0501234567")).is_err());

        assert!(delete_phone(&mut book, &args("Alice 0991234567")).is_err());
        delete_phone(&mut book, &args("Alice 0501234567")).unwrap();
        assert!(book.get("Alice").unwrap().phones().is_empty());
    }

    #[test]
    fn test_getters() {
        let mut book = AddressBook::new();
        add_contact(&mut book, &args("Alice")).unwrap();

        assert_eq!(
            get_phone(&book, &args("Alice")).unwrap(),
            "There are no phone numbers for a contact named Alice."
        );
        assert_eq!(
            get_birthday(&book, &args("Alice"), today()).unwrap(),
            "There is no birthdate for a contact named Alice."
        );
        assert_eq!(
            get_email(&book, &args("Alice")).unwrap(),
            "There is no email for a contact named Alice."
        );
        assert_eq!(
            get_address(&book, &args("Alice")).unwrap(),
            "There is no address for a contact named Alice."
        );

        add_contact(&mut book, &args("Alice 0991234567")).unwrap();
        add_contact(&mut book, &args("Alice 0501234567")).unwrap();
        assert_eq!(
            get_phone(&book, &args("Alice")).unwrap(),
            "Alice\n  0991234567\n  0501234567"
        );

        add_birthday(&mut book, &args("Alice 1990-03-01")).unwrap();
        assert!(get_birthday(&book, &args("Alice"), today())
            .unwrap()
            .starts_with("Alice\n  birthday 1990-03-01 ("));

        assert!(get_phone(&book, &args("Bob")).is_err());
    }
}
