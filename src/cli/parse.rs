//! Command table and line parsing for the REPL.

use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Hello,
    Help,
    Exit,
    AddContact,
    DeleteContact,
    AddBirthday,
    AddEmail,
    AddAddress,
    ChangePhone,
    DeletePhone,
    GetPhone,
    GetBirthday,
    GetEmail,
    GetAddress,
    ShowAll,
    ShowPage,
    Search,
    AddNote,
    FindNote,
    EditNote,
    DeleteNote,
    Sort,
}

/// Command words and the command they select.
///
/// Longer phrases come first so that `add note` wins over `add`.
pub const COMMANDS: &[(&str, Command)] = &[
    ("add birthday", Command::AddBirthday),
    ("add email", Command::AddEmail),
    ("add address", Command::AddAddress),
    ("add note", Command::AddNote),
    ("change phone", Command::ChangePhone),
    ("delete phone", Command::DeletePhone),
    ("delete note", Command::DeleteNote),
    ("get phone", Command::GetPhone),
    ("get birthday", Command::GetBirthday),
    ("get email", Command::GetEmail),
    ("get address", Command::GetAddress),
    ("show all", Command::ShowAll),
    ("show page", Command::ShowPage),
    ("find note", Command::FindNote),
    ("edit note", Command::EditNote),
    ("good bye", Command::Exit),
    ("goodbye", Command::Exit),
    ("exit", Command::Exit),
    ("close", Command::Exit),
    ("hello", Command::Hello),
    ("hi", Command::Hello),
    ("help", Command::Help),
    ("add", Command::AddContact),
    ("delete", Command::DeleteContact),
    ("show", Command::Search),
    ("sort", Command::Sort),
];

impl Command {
    /// Canonical command words, as listed in help.
    pub fn words(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(words, _)| *words)
            .unwrap_or("?")
    }
}

/// Split a line into a command and its arguments.
///
/// Command words match case-insensitively; arguments keep their case.
/// Returns `None` for an unknown command.
pub fn parse_line(line: &str) -> Option<(Command, Vec<String>)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    COMMANDS.iter().find_map(|(words, command)| {
        let words: Vec<&str> = words.split(' ').collect();
        if tokens.len() < words.len() {
            return None;
        }
        let head_matches = words
            .iter()
            .zip(&tokens)
            .all(|(w, t)| t.to_lowercase() == *w);
        head_matches.then(|| {
            let args = tokens[words.len()..].iter().map(|s| s.to_string()).collect();
            (*command, args)
        })
    })
}

/// Check the argument count is within `min..=max`.
pub fn expect_args(
    command: Command,
    args: &[String],
    min: usize,
    max: usize,
) -> Result<(), CommandError> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(CommandError::Arity {
            command: command.words(),
        })
    }
}

/// Parse a positive number argument.
pub fn parse_number(value: &str) -> Result<usize, CommandError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidNumber {
            value: value.to_string(),
        }),
    }
}
