use super::query::{NoteMatch, NoteQuery};
use crate::error::BookError;
use crate::models::Note;

/// Notes in the order they were added. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteBook {
    notes: Vec<Note>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn append(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Note, BookError> {
        self.check_index(index)?;
        Ok(self.notes.remove(index))
    }

    /// Remove several notes by store index. Nothing is removed if any index
    /// is out of range. Returns the removed notes, highest index first.
    pub fn remove_many(&mut self, indices: &[usize]) -> Result<Vec<Note>, BookError> {
        let mut indices = indices.to_vec();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        for &index in &indices {
            self.check_index(index)?;
        }
        Ok(indices.into_iter().map(|i| self.notes.remove(i)).collect())
    }

    /// Replace the note's text. Empty text leaves it unchanged and returns
    /// `Ok(false)`.
    pub fn set_text(&mut self, index: usize, text: String) -> Result<bool, BookError> {
        self.check_index(index)?;
        if text.is_empty() {
            return Ok(false);
        }
        self.notes[index].set_text(text);
        Ok(true)
    }

    /// Linear scan in store order.
    pub fn select(&self, query: &NoteQuery) -> Vec<NoteMatch<'_>> {
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, note)| query.matches(note))
            .map(|(index, note)| NoteMatch { index, note })
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), BookError> {
        if index < self.notes.len() {
            Ok(())
        } else {
            Err(BookError::NoteIndex {
                index,
                len: self.notes.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a NoteBook {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
