// src/domain/mod.rs
pub mod draft;
pub mod error;
pub mod note;
pub mod query;

pub use draft::{Draft, DraftField, ValidationErrors};
pub use error::{DomainError, Notice, NoticeLevel};
pub use note::{NewNote, Note, Tag, TagFilter, UnknownTag};
pub use query::{NotesPage, SearchQuery};
