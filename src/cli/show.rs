//! Listing commands: `show all`, `show page`, and `show <pattern>`.

use anyhow::Result;
use chrono::NaiveDate;

use super::display::format_records;
use super::parse::{expect_args, parse_number, Command};
use crate::book::AddressBook;

pub fn show_all(book: &AddressBook, today: NaiveDate) -> String {
    if book.is_empty() {
        return "The address book is empty.".to_string();
    }
    format_records(book, today)
}

/// `show page <number> [page size]`
pub fn show_page(
    book: &AddressBook,
    args: &[String],
    default_page_size: usize,
    today: NaiveDate,
) -> Result<String> {
    expect_args(Command::ShowPage, args, 1, 2)?;
    let number = parse_number(&args[0])?;
    let page_size = match args.get(1) {
        Some(raw) => parse_number(raw)?,
        None => default_page_size,
    };

    let total = book.pages(page_size)?.len();
    match book.page(number, page_size)? {
        Some(page) => Ok(format!(
            "page {} of {}\n\n{}",
            page.number,
            total,
            format_records(page.records, today)
        )),
        None => Ok(format!("There is no page {}. The address book has {} page(s).", number, total)),
    }
}

/// `show <pattern>`
pub fn search(book: &AddressBook, args: &[String], today: NaiveDate) -> Result<String> {
    expect_args(Command::Search, args, 1, 1)?;
    let pattern = &args[0];
    let found = book.search(pattern);
    if found.is_empty() {
        return Ok(format!("There are no contacts that match {}.", pattern));
    }
    Ok(format_records(found, today))
}
