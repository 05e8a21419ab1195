use super::ui::truncate;

const HELP_ROWS: &[(&str, &str)] = &[
    ("hello, hi", "greeting"),
    ("add <name> [phone] [birthday]", "add a contact or a phone/birthday to one"),
    ("delete <name>", "delete a contact"),
    ("add birthday <name> <YYYY-MM-DD>", "set the birthday"),
    ("add email <name> <email>", "set the email"),
    ("add address <name> <address>", "set the address"),
    ("change phone <name> <old> <new>", "replace a phone number"),
    ("delete phone <name> <phone>", "remove a phone number"),
    ("get phone <name>", "show phone numbers"),
    ("get birthday <name>", "show the birthday and days left"),
    ("get email <name>", "show the email"),
    ("get address <name>", "show the address"),
    ("show all", "show every contact"),
    ("show page <page> [size]", "show one page of contacts"),
    ("show <pattern>", "search contacts by name or phone"),
    ("add note <text> [#tag...] [/t/title]", "add a note"),
    ("find note <text|#tag...>", "find notes"),
    ("edit note <text|#tag...>", "change the text of a note"),
    ("delete note <text|#tag...>", "delete notes"),
    ("sort [path]", "sort a folder's files by type"),
    ("help", "this list"),
    ("good bye, goodbye, exit, close", "save and quit"),
];

/// Command table fitted to `width` columns.
pub fn help_text(width: usize) -> String {
    let left = HELP_ROWS.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
    let mut out = String::from("Available commands:");
    for (command, description) in HELP_ROWS {
        let line = format!("  {:<left$}  {}", command, description, left = left);
        out.push('\n');
        out.push_str(&truncate(&line, width));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse::COMMANDS;

    #[test]
    fn test_help_lists_every_command() {
        let text = help_text(200);
        for (words, _) in COMMANDS {
            assert!(text.contains(words), "missing {:?}", words);
        }
    }

    #[test]
    fn test_help_fits_width() {
        for line in help_text(40).lines() {
            assert!(line.chars().count() <= 40);
        }
    }
}
