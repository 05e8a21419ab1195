use chrono::NaiveDate;

use crate::book::NoteMatch;
use crate::models::{Note, Record};

/// Full contact block: the name, then only the fields that are set.
pub fn format_record(record: &Record, today: NaiveDate) -> String {
    let mut out = record.name().to_string();

    if record.phones().is_empty() {
        out.push_str("\n  no phone numbers");
    }
    for phone in record.phones() {
        out.push_str(&format!("\n  {}", phone));
    }

    if let Some(birthday) = record.birthday() {
        out.push_str(&format!(
            "\n  birthday {} ({})",
            birthday,
            days_label(birthday.days_until_next(today))
        ));
    }
    if let Some(email) = record.email() {
        out.push_str(&format!("\n  {}", email));
    }
    if let Some(address) = record.address() {
        out.push_str(&format!("\n  {}", address));
    }

    out
}

/// Blocks separated by a blank line.
pub fn format_records<'a>(records: impl IntoIterator<Item = &'a Record>, today: NaiveDate) -> String {
    records
        .into_iter()
        .map(|r| format_record(r, today))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn days_label(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    }
}

/// Title line (if any), text, then tags.
pub fn format_note(note: &Note) -> String {
    let mut out = String::new();
    if let Some(title) = note.title() {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(note.text());
    if !note.tags().is_empty() {
        out.push('\n');
        out.push_str(&note.tags().join(" "));
    }
    out
}

/// `1) Title text` lines for picking one of several matches.
pub fn format_numbered(matches: &[NoteMatch<'_>], max_width: usize) -> String {
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let line = match m.note.title() {
                Some(title) => format!("{}) {} {}", i + 1, title, m.note.text()),
                None => format!("{}) {}", i + 1, m.note.text()),
            };
            super::ui::truncate(&line, max_width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
