use std::collections::HashMap;
use std::iter::{Enumerate, FusedIterator};
use std::slice::Chunks;

use crate::error::BookError;
use crate::models::Record;

/// Contacts keyed by name, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: Vec<Record>,
    // name -> position in `records`
    index: HashMap<String, usize>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from records in order. A repeated name overwrites the
    /// earlier record in place.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut book = Self::new();
        for record in records {
            book.add(record);
        }
        book
    }

    /// Insert or overwrite by name. An overwritten record keeps its position.
    pub fn add(&mut self, record: Record) {
        let key = record.name().as_str().to_string();
        match self.index.get(&key) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<Record, BookError> {
        let pos = self
            .index
            .remove(name)
            .ok_or_else(|| BookError::ContactNotFound {
                name: name.to_string(),
            })?;
        let record = self.records.remove(pos);
        for later in &self.records[pos..] {
            if let Some(i) = self.index.get_mut(later.name().as_str()) {
                *i -= 1;
            }
        }
        tracing::debug!(name, remaining = self.records.len(), "contact removed");
        Ok(record)
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.index.get(name).map(|&pos| &self.records[pos])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.index.get(name).map(|&pos| &mut self.records[pos])
    }

    /// Like `get_mut`, but a missing name is an error.
    pub fn record_mut(&mut self, name: &str) -> Result<&mut Record, BookError> {
        self.get_mut(name).ok_or_else(|| BookError::ContactNotFound {
            name: name.to_string(),
        })
    }

    /// Like `get`, but a missing name is an error.
    pub fn record(&self, name: &str) -> Result<&Record, BookError> {
        self.get(name).ok_or_else(|| BookError::ContactNotFound {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name().as_str())
    }

    /// Lazy pages of at most `page_size` records in insertion order.
    ///
    /// Each call starts from the first page again.
    pub fn pages(&self, page_size: usize) -> Result<Pages<'_>, BookError> {
        if page_size == 0 {
            return Err(BookError::InvalidPageSize);
        }
        Ok(Pages {
            inner: self.records.chunks(page_size).enumerate(),
        })
    }

    /// The 1-based page `number`, or `None` past the last page.
    pub fn page(&self, number: usize, page_size: usize) -> Result<Option<Page<'_>>, BookError> {
        let mut pages = self.pages(page_size)?;
        Ok(number.checked_sub(1).and_then(|skip| pages.nth(skip)))
    }

    /// Records whose name contains `pattern` (any case) or whose phones
    /// contain it (exact case), in insertion order.
    pub fn search(&self, pattern: &str) -> Vec<&Record> {
        self.records.iter().filter(|r| r.matches(pattern)).collect()
    }
}

impl<'a> IntoIterator for &'a AddressBook {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A contiguous slice of the address book.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// 1-based
    pub number: usize,
    pub records: &'a [Record],
}

impl Page<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Pages<'a> {
    inner: Enumerate<Chunks<'a, Record>>,
}

impl<'a> Iterator for Pages<'a> {
    type Item = Page<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(i, records)| Page {
            number: i + 1,
            records,
        })
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n).map(|(i, records)| Page {
            number: i + 1,
            records,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Pages<'_> {}
impl FusedIterator for Pages<'_> {}
