//! In-memory contact and note stores.
//!
//! Neither store does any I/O: loading and saving snapshots is handled by
//! [`crate::db::Database`].

mod address_book;
mod note_book;
mod query;

pub use address_book::{AddressBook, Page, Pages};
pub use note_book::NoteBook;
pub use query::{sort_by_title, NoteMatch, NoteQuery, TAG_PREFIX, TITLE_PREFIX};
