// src/application/draft_store.rs
use crate::domain::Draft;

/// Owner of the note being composed. The presentation layer holds it for
/// the lifetime of the form; the coordinator only reads it on submit.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    draft: Draft,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn update(&mut self, edit: impl FnOnce(&mut Draft)) {
        edit(&mut self.draft);
    }

    /// Back to the empty form, after a successful submit or a cancel.
    pub fn clear(&mut self) {
        self.draft = Draft::default();
    }
}
