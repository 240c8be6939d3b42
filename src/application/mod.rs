// src/application/mod.rs
pub mod browser;
pub mod debouncer;
pub mod draft_store;
pub mod notes_service;
pub mod pagination;
pub mod query_coordinator;

pub use browser::NotesBrowser;
pub use debouncer::{DebounceHandle, Debouncer};
pub use draft_store::DraftStore;
pub use notes_service::NotesService;
pub use pagination::Pagination;
pub use query_coordinator::{ApplyOutcome, Fetched, ListRequest, ListStart, QueryCoordinator};
