//! Note commands.
//!
//! `delete note` and `edit note` run in two steps: the note book resolves
//! the candidate notes, then the user's answer is turned into a choice
//! that is applied to the book. Only the second step talks to the user.

use anyhow::Result;

use super::display::{format_note, format_numbered};
use super::ui::{term_size, Prompter};
use crate::book::{sort_by_title, NoteBook, NoteMatch, NoteQuery, TAG_PREFIX, TITLE_PREFIX};
use crate::error::NoteQueryError;
use crate::models::Note;

const DELETE_OPTIONS: &str = "Available options:\n\
    Cancel deletion: enter '0'\n\
    Delete all notes: enter 'a' or 'A'\n\
    Delete note #: enter note number";

/// What to do with several matching notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteChoice {
    Cancel,
    All,
    /// 1-based position in the listed matches
    One(usize),
    Invalid,
}

impl DeleteChoice {
    pub fn parse(input: &str, count: usize) -> Self {
        match input.trim() {
            "0" => Self::Cancel,
            "a" | "A" => Self::All,
            other => match other.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => Self::One(n),
                _ => Self::Invalid,
            },
        }
    }
}

/// Which of several matching notes to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditChoice {
    Cancel,
    One(usize),
    Invalid,
}

impl EditChoice {
    pub fn parse(input: &str, count: usize) -> Self {
        match input.trim() {
            "0" => Self::Cancel,
            other => match other.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => Self::One(n),
                _ => Self::Invalid,
            },
        }
    }
}

/// `add note <text...> [#tag...] [/t/title...]`
pub fn add_note(notes: &mut NoteBook, args: &[String]) -> Result<String> {
    let first = args.first().ok_or(NoteQueryError::Empty)?;
    if first.starts_with(TAG_PREFIX) || first.starts_with(TITLE_PREFIX) {
        return Ok("Unable to add the note. Please enter the note in a text format.".to_string());
    }

    let parsed = NoteQuery::parse(args)?;
    let text = parsed.text.unwrap_or_default();
    notes.append(Note::new(text, parsed.tags, parsed.title));
    tracing::debug!(notes = notes.len(), "note added");
    Ok("The note has been added.".to_string())
}

/// Matching notes ordered by title, as shown to the user.
fn resolve<'a>(notes: &'a NoteBook, args: &[String]) -> Result<Vec<NoteMatch<'a>>> {
    let query = NoteQuery::parse(args)?;
    let mut found = notes.select(&query);
    sort_by_title(&mut found);
    Ok(found)
}

/// `find note <query>`
pub fn find_note(notes: &NoteBook, args: &[String]) -> Result<String> {
    let found = resolve(notes, args)?;
    let heading = match found.len() {
        0 => return Ok("No notes match your search criteria.".to_string()),
        1 => "Found note:",
        _ => "Found notes:",
    };
    let body: Vec<String> = found.iter().map(|m| format_note(m.note)).collect();
    Ok(format!("{}\n{}", heading, body.join("\n\n")))
}

/// `delete note <query>`
pub fn delete_note(notes: &mut NoteBook, args: &[String], prompter: &mut dyn Prompter) -> Result<String> {
    let found = resolve(notes, args)?;
    let indices: Vec<usize> = found.iter().map(|m| m.index).collect();

    match indices.len() {
        0 => return Ok("Nothing to delete. No notes match your search criteria.".to_string()),
        1 => {
            let removed = notes.remove_at(indices[0])?;
            return Ok(format!("Deleted note:\n{}", format_note(&removed)));
        }
        _ => {}
    }

    let (width, _) = term_size();
    prompter.show(&format!(
        "Notes that match the condition:\n{}",
        format_numbered(&found, width)
    ));
    prompter.show(DELETE_OPTIONS);
    let answer = prompter.ask("Please enter your command:")?.unwrap_or_default();

    match DeleteChoice::parse(&answer, indices.len()) {
        DeleteChoice::Cancel => Ok("Deletion has been canceled.".to_string()),
        DeleteChoice::All => {
            notes.remove_many(&indices)?;
            Ok("All notes have been deleted.".to_string())
        }
        DeleteChoice::One(n) => {
            notes.remove_at(indices[n - 1])?;
            Ok(format!("Note #{} has been deleted.", n))
        }
        DeleteChoice::Invalid => Ok("Invalid command. Deletion has been canceled.".to_string()),
    }
}

/// `edit note <query>`
pub fn edit_note(notes: &mut NoteBook, args: &[String], prompter: &mut dyn Prompter) -> Result<String> {
    let found = resolve(notes, args)?;

    let (index, label) = match found.len() {
        0 => return Ok("No notes match your search criteria. Please try again.".to_string()),
        1 => {
            prompter.show(&format!("Found note:\n{}", format_note(found[0].note)));
            (found[0].index, "The note has been edited.".to_string())
        }
        count => {
            let (width, _) = term_size();
            prompter.show(&format!(
                "Notes that match the condition:\n{}",
                format_numbered(&found, width)
            ));
            let answer = prompter
                .ask("Which note do you want to edit (0 to cancel):")?
                .unwrap_or_default();
            match EditChoice::parse(&answer, count) {
                EditChoice::Cancel => return Ok("Notes have not been edited.".to_string()),
                EditChoice::Invalid => {
                    return Ok("Incorrect selection. Notes have not been edited.".to_string())
                }
                EditChoice::One(n) => (found[n - 1].index, format!("Note #{} has been edited.", n)),
            }
        }
    };

    let new_text = prompter
        .ask("Type a new note text (Enter to cancel):")?
        .unwrap_or_default();
    if notes.set_text(index, new_text)? {
        Ok(label)
    } else {
        Ok("The note has not been changed.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ui::testing::{output, scripted};

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn texts(notes: &NoteBook) -> Vec<&str> {
        notes.iter().map(|n| n.text()).collect()
    }

    fn sample() -> NoteBook {
        let mut notes = NoteBook::new();
        add_note(&mut notes, &args("buy milk #shopping /t/Groceries")).unwrap();
        add_note(&mut notes, &args("call mom #family")).unwrap();
        add_note(&mut notes, &args("buy bread #shopping /t/Bakery")).unwrap();
        notes
    }

    #[test]
    fn test_add_note_parses_tags_and_title() {
        let notes = sample();
        let first = notes.get(0).unwrap();
        assert_eq!(first.text(), "buy milk");
        assert_eq!(first.tags(), ["#shopping"]);
        assert_eq!(first.title(), Some("Groceries"));
    }

    #[test]
    fn test_add_note_requires_text_first() {
        let mut notes = NoteBook::new();
        let reply = add_note(&mut notes, &args("#tag text")).unwrap();
        assert!(reply.starts_with("Unable to add the note"));
        let reply = add_note(&mut notes, &args("/t/title text")).unwrap();
        assert!(reply.starts_with("Unable to add the note"));
        assert!(notes.is_empty());

        let err = add_note(&mut notes, &[]).unwrap_err();
        assert_eq!(err.downcast_ref::<NoteQueryError>(), Some(&NoteQueryError::Empty));
    }

    #[test]
    fn test_find_by_tag_only() {
        let mut notes = NoteBook::new();
        add_note(&mut notes, &args("buy milk #shopping")).unwrap();

        let reply = find_note(&notes, &args("#shopping")).unwrap();
        assert_eq!(reply, "Found note:\nbuy milk\n#shopping");
    }

    #[test]
    fn test_find_sorted_by_title() {
        let reply = find_note(&sample(), &args("#shopping")).unwrap();
        assert!(reply.starts_with("Found notes:\nBakery"));
        assert!(reply.find("Bakery").unwrap() < reply.find("Groceries").unwrap());
    }

    #[test]
    fn test_find_nothing_and_empty_query() {
        assert_eq!(
            find_note(&sample(), &args("#work")).unwrap(),
            "No notes match your search criteria."
        );
        assert!(find_note(&sample(), &[]).is_err());
    }

    #[test]
    fn test_delete_single_match_without_prompt() {
        let mut notes = sample();
        let mut prompter = scripted(&[]);

        let reply = delete_note(&mut notes, &args("call"), &mut prompter).unwrap();
        assert!(reply.starts_with("Deleted note:"));
        assert_eq!(notes.len(), 2);
        assert!(!texts(&notes).contains(&"call mom"));
        assert_eq!(output(prompter), "");
    }

    #[test]
    fn test_delete_by_number_uses_listed_order() {
        let mut notes = sample();
        // Listed by title: 1) Bakery "buy bread", 2) Groceries "buy milk"
        let mut prompter = scripted(&["1"]);

        let reply = delete_note(&mut notes, &args("buy"), &mut prompter).unwrap();
        assert_eq!(reply, "Note #1 has been deleted.");
        assert_eq!(texts(&notes), ["buy milk", "call mom"]);

        let shown = output(prompter);
        assert!(shown.contains("1) Bakery buy bread"));
        assert!(shown.contains("2) Groceries buy milk"));
    }

    #[test]
    fn test_delete_all() {
        let mut notes = sample();
        let mut prompter = scripted(&["A"]);
        let reply = delete_note(&mut notes, &args("#shopping"), &mut prompter).unwrap();
        assert_eq!(reply, "All notes have been deleted.");
        assert_eq!(texts(&notes), ["call mom"]);
    }

    #[test]
    fn test_delete_cancel_and_invalid() {
        let mut notes = sample();

        let reply = delete_note(&mut notes, &args("buy"), &mut scripted(&["0"])).unwrap();
        assert_eq!(reply, "Deletion has been canceled.");

        let reply = delete_note(&mut notes, &args("buy"), &mut scripted(&["7"])).unwrap();
        assert_eq!(reply, "Invalid command. Deletion has been canceled.");

        // End of input counts as invalid
        let reply = delete_note(&mut notes, &args("buy"), &mut scripted(&[])).unwrap();
        assert_eq!(reply, "Invalid command. Deletion has been canceled.");

        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn test_edit_single_match() {
        let mut notes = sample();
        let reply = edit_note(&mut notes, &args("call"), &mut scripted(&["call dad"])).unwrap();
        assert_eq!(reply, "The note has been edited.");
        assert_eq!(notes.get(1).unwrap().text(), "call dad");
        assert_eq!(notes.get(1).unwrap().tags(), ["#family"]);
    }

    #[test]
    fn test_edit_empty_replacement_keeps_note() {
        let mut notes = sample();
        let reply = edit_note(&mut notes, &args("call"), &mut scripted(&[""])).unwrap();
        assert_eq!(reply, "The note has not been changed.");
        assert_eq!(notes.get(1).unwrap().text(), "call mom");
    }

    #[test]
    fn test_edit_choose_among_several() {
        let mut notes = sample();
        let reply = edit_note(&mut notes, &args("buy"), &mut scripted(&["2", "buy oat milk"])).unwrap();
        assert_eq!(reply, "Note #2 has been edited.");
        assert_eq!(texts(&notes), ["buy oat milk", "call mom", "buy bread"]);

        let reply = edit_note(&mut notes, &args("buy"), &mut scripted(&["0"])).unwrap();
        assert_eq!(reply, "Notes have not been edited.");

        let reply = edit_note(&mut notes, &args("buy"), &mut scripted(&["x"])).unwrap();
        assert_eq!(reply, "Incorrect selection. Notes have not been edited.");
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(DeleteChoice::parse("0", 3), DeleteChoice::Cancel);
        assert_eq!(DeleteChoice::parse("a", 3), DeleteChoice::All);
        assert_eq!(DeleteChoice::parse(" 3 ", 3), DeleteChoice::One(3));
        assert_eq!(DeleteChoice::parse("4", 3), DeleteChoice::Invalid);
        assert_eq!(DeleteChoice::parse("", 3), DeleteChoice::Invalid);

        assert_eq!(EditChoice::parse("0", 2), EditChoice::Cancel);
        assert_eq!(EditChoice::parse("2", 2), EditChoice::One(2));
        assert_eq!(EditChoice::parse("a", 2), EditChoice::Invalid);
    }
}
