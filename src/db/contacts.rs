use anyhow::Result;
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;

use super::{invalid_column, Database};
use crate::book::AddressBook;
use crate::models::*;

impl Database {
    /// Load the address book snapshot in insertion order.
    pub fn load_address_book(&self) -> Result<AddressBook> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, birthday, email, address FROM contacts ORDER BY id")?;
        let mut rows: Vec<(i64, Record)> = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut phones = self.load_phones()?;
        for (id, record) in rows.iter_mut() {
            for phone in phones.remove(&*id).unwrap_or_default() {
                record.add_phone(phone);
            }
        }

        let book = AddressBook::from_records(rows.into_iter().map(|(_, r)| r));
        tracing::info!(contacts = book.len(), "address book loaded");
        Ok(book)
    }

    /// Replace the stored address book with `book`.
    ///
    /// Runs in one transaction, so a failed save keeps the previous snapshot.
    pub fn save_address_book(&self, book: &AddressBook) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        Self::write_contacts(&tx, book)?;
        tx.commit()?;
        tracing::info!(contacts = book.len(), "address book saved");
        Ok(())
    }

    pub(super) fn write_contacts(conn: &Connection, book: &AddressBook) -> Result<()> {
        conn.execute("DELETE FROM phones", [])?;
        conn.execute("DELETE FROM contacts", [])?;

        {
            let mut insert_contact = conn.prepare(
                "INSERT INTO contacts (id, name, birthday, email, address) VALUES (?, ?, ?, ?, ?)",
            )?;
            let mut insert_phone =
                conn.prepare("INSERT INTO phones (contact_id, position, number) VALUES (?, ?, ?)")?;

            for (id, record) in (1i64..).zip(book.iter()) {
                insert_contact.execute(params![
                    id,
                    record.name().as_str(),
                    record.birthday().map(|b| b.as_str()),
                    record.email().map(|e| e.as_str()),
                    record.address().map(|a| a.as_str()),
                ])?;
                for (position, phone) in (0i64..).zip(record.phones()) {
                    insert_phone.execute(params![id, position, phone.as_str()])?;
                }
            }
        }
        Ok(())
    }

    fn load_phones(&self) -> Result<HashMap<i64, Vec<Phone>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT contact_id, number FROM phones ORDER BY contact_id, position")?;
        let rows = stmt.query_map([], |row| {
            let contact_id: i64 = row.get(0)?;
            let number: String = row.get(1)?;
            let phone = Phone::new(number).map_err(|e| invalid_column(1, e))?;
            Ok((contact_id, phone))
        })?;

        let mut phones: HashMap<i64, Vec<Phone>> = HashMap::new();
        for row in rows {
            let (contact_id, phone) = row?;
            phones.entry(contact_id).or_default().push(phone);
        }
        Ok(phones)
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<(i64, Record)> {
        let id: i64 = row.get(0)?;
        let name = Name::new(row.get::<_, String>(1)?).map_err(|e| invalid_column(1, e))?;
        let mut record = Record::new(name);

        if let Some(value) = row.get::<_, Option<String>>(2)? {
            // Stored birthdays were in the past when saved, so they still are.
            record.set_birthday(Birthday::new(value).map_err(|e| invalid_column(2, e))?);
        }
        if let Some(value) = row.get::<_, Option<String>>(3)? {
            record.set_email(Email::new(value).map_err(|e| invalid_column(3, e))?);
        }
        if let Some(value) = row.get::<_, Option<String>>(4)? {
            record.set_address(Address::new(value).map_err(|e| invalid_column(4, e))?);
        }

        Ok((id, record))
    }
}
