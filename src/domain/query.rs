// src/domain/query.rs
use crate::domain::{Note, TagFilter};
use serde::Serialize;

/// Cache key for list fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
    pub tag: TagFilter,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, page: u32, tag: TagFilter) -> Self {
        Self {
            text: text.into(),
            page: page.max(1),
            tag,
        }
    }

    /// Same filter context, different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self::new(self.text.clone(), page, self.tag)
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new("", 1, TagFilter::All)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    pub notes: Vec<Note>,
    pub page: u32,
    pub total_pages: u32,
}

impl NotesPage {
    pub fn contains(&self, note_id: &str) -> bool {
        self.notes.iter().any(|n| n.id == note_id)
    }
}
