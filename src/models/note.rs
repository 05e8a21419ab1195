/// A free-text note with `#tags` and an optional title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    text: String,
    tags: Vec<String>,
    title: Option<String>,
}

impl Note {
    pub fn new(text: String, tags: Vec<String>, title: Option<String>) -> Self {
        let mut note = Self {
            text,
            tags: Vec::with_capacity(tags.len()),
            title: title.filter(|t| !t.is_empty()),
        };
        for tag in tags {
            note.add_tag(tag);
        }
        note
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Tags behave like a set; a repeated tag is ignored.
    pub fn add_tag(&mut self, tag: String) -> bool {
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}
