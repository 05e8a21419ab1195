//! Note query parsing and matching.
//!
//! A query is built from whitespace-split tokens: `#word` tokens are tag
//! filters, a token starting with `/t/` opens a title that swallows the
//! rest of the line, everything else is joined into a text fragment. A
//! query that starts with a tag has no text fragment at all, so a plain
//! word after a leading tag is rejected.

use crate::error::NoteQueryError;
use crate::models::Note;

pub const TAG_PREFIX: &str = "#";
pub const TITLE_PREFIX: &str = "/t/";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteQuery {
    pub text: Option<String>,
    pub tags: Vec<String>,
    pub title: Option<String>,
}

impl NoteQuery {
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, NoteQueryError> {
        let (first, rest) = tokens.split_first().ok_or(NoteQueryError::Empty)?;
        let first = first.as_ref();

        let mut query = NoteQuery::default();
        if first.starts_with(TAG_PREFIX) {
            query.tags.push(first.to_string());
        } else {
            query.text = Some(first.to_string());
        }

        for (i, token) in rest.iter().enumerate() {
            let token = token.as_ref();
            if token.starts_with(TAG_PREFIX) {
                if !query.tags.iter().any(|t| t == token) {
                    query.tags.push(token.to_string());
                }
            } else if let Some(head) = token.strip_prefix(TITLE_PREFIX) {
                let title = std::iter::once(head)
                    .chain(rest[i + 1..].iter().map(|t| t.as_ref()))
                    .collect::<Vec<_>>()
                    .join(" ");
                query.title = Some(title.trim().to_string()).filter(|t| !t.is_empty());
                break;
            } else if let Some(text) = query.text.as_mut() {
                text.push(' ');
                text.push_str(token);
            } else {
                return Err(NoteQueryError::TextAfterTag {
                    word: token.to_string(),
                });
            }
        }

        Ok(query)
    }

    pub fn is_tag_only(&self) -> bool {
        self.text.is_none()
    }

    /// Text must be a case-sensitive substring; with tag filters the note
    /// must also carry at least one of them.
    pub fn matches(&self, note: &Note) -> bool {
        if let Some(text) = &self.text {
            if !note.text().contains(text.as_str()) {
                return false;
            }
        }
        self.tags.is_empty() || self.tags.iter().any(|tag| note.has_tag(tag))
    }
}

/// A note found by a query, with its position in the note book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteMatch<'a> {
    pub index: usize,
    pub note: &'a Note,
}

impl NoteMatch<'_> {
    pub fn title(&self) -> &str {
        self.note.title().unwrap_or("")
    }
}

/// Stable sort by title; untitled notes come first.
pub fn sort_by_title(matches: &mut [NoteMatch<'_>]) {
    matches.sort_by(|a, b| a.title().cmp(b.title()));
}
