// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NotesService;
use crate::constants::NOTES_PER_PAGE;
use crate::domain::{DomainError, NewNote, Note, NotesPage, SearchQuery, Tag};

/// Build a note with fixed timestamps.
pub fn sample_note(id: &str, title: &str, tag: Tag) -> Note {
    let stamp = DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default();
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: format!("Content of {title}"),
        tag,
        created_at: stamp,
        updated_at: stamp,
    }
}

/// Shared handle on how often a mock operation ran.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct MockState {
    notes: HashMap<String, Note>,
    next_id: usize,
}

/// In-memory stand-in for the remote notes service
///
/// Unconfigured list queries are answered by filtering the stored notes the
/// way the service does (text in title or content, tag, fixed page size),
/// so created and deleted notes show up in later listings.
///
/// # Examples
///
/// ```
/// use notehub::domain::Tag;
/// use notehub::util::testing::{sample_note, MockNotesService};
///
/// let mock = MockNotesService::builder()
///     .with_note(sample_note("1", "Shopping list", Tag::Shopping))
///     .build();
/// ```
pub struct MockNotesService {
    state: Mutex<MockState>,
    pages: HashMap<SearchQuery, NotesPage>,
    list_errors: HashMap<SearchQuery, DomainError>,
    list_delays: HashMap<SearchQuery, Duration>,
    create_error: Option<DomainError>,
    list_calls: CallCounter,
    create_calls: CallCounter,
}

impl MockNotesService {
    pub fn builder() -> MockNotesServiceBuilder {
        MockNotesServiceBuilder::new()
    }

    pub fn list_calls(&self) -> CallCounter {
        self.list_calls.clone()
    }

    pub fn create_calls(&self) -> CallCounter {
        self.create_calls.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the state from the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn search(&self, query: &SearchQuery) -> NotesPage {
        let needle = query.text.to_lowercase();
        let mut matching: Vec<Note> = self
            .state()
            .notes
            .values()
            .filter(|n| query.tag.tag().map_or(true, |tag| n.tag == tag))
            .filter(|n| {
                n.title.to_lowercase().contains(&needle) || n.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));

        let per_page = NOTES_PER_PAGE as usize;
        let total_pages = matching.len().div_ceil(per_page) as u32;
        let notes = matching
            .into_iter()
            .skip((query.page as usize).saturating_sub(1) * per_page)
            .take(per_page)
            .collect();

        NotesPage {
            notes,
            page: query.page,
            total_pages,
        }
    }
}

#[async_trait]
impl NotesService for MockNotesService {
    async fn list_notes(&self, query: &SearchQuery) -> Result<NotesPage, DomainError> {
        self.list_calls.hit();
        if let Some(delay) = self.list_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(err) = self.list_errors.get(query) {
            return Err(err.clone());
        }
        if let Some(page) = self.pages.get(query) {
            return Ok(page.clone());
        }
        Ok(self.search(query))
    }

    async fn get_note(&self, id: &str) -> Result<Note, DomainError> {
        self.state()
            .notes
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note, DomainError> {
        self.create_calls.hit();
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        let mut state = self.state();
        state.next_id += 1;
        let id = format!("created-{}", state.next_id);
        let mut created = sample_note(&id, &note.title, note.tag);
        created.content = note.content.clone();
        state.notes.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_note(&self, id: &str) -> Result<Note, DomainError> {
        self.state()
            .notes
            .remove(id)
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }
}

/// Builder for MockNotesService
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNotesServiceBuilder {
    notes: HashMap<String, Note>,
    pages: HashMap<SearchQuery, NotesPage>,
    list_errors: HashMap<SearchQuery, DomainError>,
    list_delays: HashMap<SearchQuery, Duration>,
    create_error: Option<DomainError>,
}

impl MockNotesServiceBuilder {
    pub fn new() -> Self {
        Self {
            notes: HashMap::new(),
            pages: HashMap::new(),
            list_errors: HashMap::new(),
            list_delays: HashMap::new(),
            create_error: None,
        }
    }

    /// Store a note for get, delete and unconfigured list queries
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.insert(note.id.clone(), note);
        self
    }

    /// Answer `query` with a fixed page
    pub fn with_page(mut self, query: SearchQuery, page: NotesPage) -> Self {
        self.pages.insert(query, page);
        self
    }

    /// Fail `query` with `err`
    pub fn with_list_error(mut self, query: SearchQuery, err: DomainError) -> Self {
        self.list_errors.insert(query, err);
        self
    }

    /// Hold the answer to `query` back for `delay`
    pub fn with_list_delay(mut self, query: SearchQuery, delay: Duration) -> Self {
        self.list_delays.insert(query, delay);
        self
    }

    /// Fail every create with `err`
    pub fn with_create_error(mut self, err: DomainError) -> Self {
        self.create_error = Some(err);
        self
    }

    pub fn build(self) -> MockNotesService {
        MockNotesService {
            state: Mutex::new(MockState {
                notes: self.notes,
                next_id: 0,
            }),
            pages: self.pages,
            list_errors: self.list_errors,
            list_delays: self.list_delays,
            create_error: self.create_error,
            list_calls: CallCounter::default(),
            create_calls: CallCounter::default(),
        }
    }
}

impl Default for MockNotesServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "mockito", "rustls"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
