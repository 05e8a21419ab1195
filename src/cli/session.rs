//! One REPL session: both books plus command dispatch.

use anyhow::Result;
use chrono::{Local, NaiveDate};

use super::contact;
use super::help::help_text;
use super::note;
use super::parse::{expect_args, Command};
use super::show;
use super::sort::run_sort;
use super::ui::{term_size, Prompter};
use crate::book::{AddressBook, NoteBook};
use crate::db::Database;
use crate::error::{BookError, CommandError, FieldError, NoteQueryError};

pub const GREETING: &str = "Hello! How can I help you?";
pub const FAREWELL: &str = "Good bye! Thank you for using CLIB.";

/// What the REPL should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Exit(String),
}

#[derive(Debug, Default)]
pub struct Session {
    pub book: AddressBook,
    pub notes: NoteBook,
    pub page_size: usize,
}

impl Session {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn load(db: &Database, page_size: usize) -> Result<Self> {
        Ok(Self {
            book: db.load_address_book()?,
            notes: db.load_note_book()?,
            page_size,
        })
    }

    pub fn save(&self, db: &Database) -> Result<()> {
        db.save_all(&self.book, &self.notes)
    }

    /// Run one command against today's date.
    pub fn execute(
        &mut self,
        command: Command,
        args: &[String],
        prompter: &mut dyn Prompter,
    ) -> Result<Outcome> {
        self.execute_on(command, args, prompter, Local::now().date_naive())
    }

    pub fn execute_on(
        &mut self,
        command: Command,
        args: &[String],
        prompter: &mut dyn Prompter,
        today: NaiveDate,
    ) -> Result<Outcome> {
        tracing::debug!(command = command.words(), args = args.len(), "dispatch");

        let reply = match command {
            Command::Exit => return Ok(Outcome::Exit(FAREWELL.to_string())),
            Command::Hello => GREETING.to_string(),
            Command::Help => {
                expect_args(command, args, 0, 0)?;
                help_text(term_size().0)
            }

            Command::AddContact => contact::add_contact(&mut self.book, args)?,
            Command::DeleteContact => contact::delete_contact(&mut self.book, args)?,
            Command::AddBirthday => contact::add_birthday(&mut self.book, args)?,
            Command::AddEmail => contact::add_email(&mut self.book, args)?,
            Command::AddAddress => contact::add_address(&mut self.book, args)?,
            Command::ChangePhone => contact::change_phone(&mut self.book, args)?,
            Command::DeletePhone => contact::delete_phone(&mut self.book, args)?,
            Command::GetPhone => contact::get_phone(&self.book, args)?,
            Command::GetBirthday => contact::get_birthday(&self.book, args, today)?,
            Command::GetEmail => contact::get_email(&self.book, args)?,
            Command::GetAddress => contact::get_address(&self.book, args)?,

            Command::ShowAll => {
                expect_args(command, args, 0, 0)?;
                show::show_all(&self.book, today)
            }
            Command::ShowPage => show::show_page(&self.book, args, self.page_size, today)?,
            Command::Search => show::search(&self.book, args, today)?,

            Command::AddNote => note::add_note(&mut self.notes, args)?,
            Command::FindNote => note::find_note(&self.notes, args)?,
            Command::EditNote => note::edit_note(&mut self.notes, args, prompter)?,
            Command::DeleteNote => note::delete_note(&mut self.notes, args, prompter)?,

            Command::Sort => run_sort(args, prompter)?,
        };

        Ok(Outcome::Continue(reply))
    }
}

/// Message for a failed command: domain errors show their fixed text,
/// anything else is reported with its context chain.
pub fn render_error(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<FieldError>() {
        return e.to_string();
    }
    if let Some(e) = err.downcast_ref::<BookError>() {
        return e.to_string();
    }
    if let Some(e) = err.downcast_ref::<NoteQueryError>() {
        return e.to_string();
    }
    if let Some(e) = err.downcast_ref::<CommandError>() {
        return e.to_string();
    }
    format!("Error: {:#}", err)
}
