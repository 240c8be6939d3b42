// src/application/notes_service.rs
use crate::domain::{DomainError, NewNote, Note, NotesPage, SearchQuery};
use async_trait::async_trait;

/// Port to the remote notes service, which owns storage, search and paging.
#[async_trait]
pub trait NotesService: Send + Sync {
    async fn list_notes(&self, query: &SearchQuery) -> Result<NotesPage, DomainError>;

    async fn get_note(&self, id: &str) -> Result<Note, DomainError>;

    async fn create_note(&self, note: &NewNote) -> Result<Note, DomainError>;

    /// Delete a note; the service answers with the deleted record
    async fn delete_note(&self, id: &str) -> Result<Note, DomainError>;
}
