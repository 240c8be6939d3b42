// src/application/query_coordinator.rs
use crate::application::{DraftStore, NotesService};
use crate::domain::{Draft, DomainError, Note, NotesPage, SearchQuery};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A sequence-stamped list fetch. Only the most recently begun request may
/// publish its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    seq: u64,
    query: SearchQuery,
}

impl ListRequest {
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The response belonged to the current query and is now visible.
    Applied,
    /// A newer query was issued meanwhile; visible state is untouched.
    Superseded,
}

/// A begun request together with what the service answered for it.
pub type Fetched = (ListRequest, Result<NotesPage, DomainError>);

/// How `start` satisfied a list query.
pub enum ListStart<F> {
    /// Served from cache and already visible.
    Cached(NotesPage),
    /// Needs the network. Drive the future anywhere and hand its output to `apply`.
    Fetch(F),
}

/// Fronts the remote service with a query-keyed cache and last-query-wins
/// publishing of list results.
pub struct QueryCoordinator<S: NotesService> {
    service: Arc<S>,
    pages: HashMap<SearchQuery, NotesPage>,
    notes: HashMap<String, Note>,
    latest_seq: u64,
    pending: Option<u64>,
    visible: Option<NotesPage>,
}

impl<S: NotesService> QueryCoordinator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
            pages: HashMap::new(),
            notes: HashMap::new(),
            latest_seq: 0,
            pending: None,
            visible: None,
        }
    }

    /// Last successfully applied page. Kept while a newer fetch is pending.
    pub fn visible(&self) -> Option<&NotesPage> {
        self.visible.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cached(&self, query: &SearchQuery) -> Option<&NotesPage> {
        self.pages.get(query)
    }

    /// Mark `query` as the current one. Any request begun earlier is
    /// superseded from this point on.
    pub fn begin(&mut self, query: SearchQuery) -> ListRequest {
        self.latest_seq += 1;
        self.pending = Some(self.latest_seq);
        debug!(seq = self.latest_seq, ?query, "Beginning list request");
        ListRequest {
            seq: self.latest_seq,
            query,
        }
    }

    /// Serve `query` from cache, or begin it and return a fetch that does not
    /// borrow the coordinator, so input can keep flowing while it runs.
    pub fn start(
        &mut self,
        query: SearchQuery,
    ) -> ListStart<impl Future<Output = Fetched> + Send + 'static>
    where
        S: 'static,
    {
        if let Some(page) = self.serve_cached(&query) {
            return ListStart::Cached(page);
        }
        let request = self.begin(query);
        let service = Arc::clone(&self.service);
        ListStart::Fetch(async move {
            let result = service.list_notes(request.query()).await;
            (request, result)
        })
    }

    /// Perform the network call for a begun request without touching state.
    pub async fn fetch(&self, request: &ListRequest) -> Result<NotesPage, DomainError> {
        self.service.list_notes(&request.query).await
    }

    /// Publish the outcome of `request` if it is still the latest one.
    ///
    /// Successful pages are cached under their own query either way.
    /// Failures of superseded requests are dropped.
    pub fn apply(
        &mut self,
        request: ListRequest,
        result: Result<NotesPage, DomainError>,
    ) -> Result<ApplyOutcome, DomainError> {
        let is_current = request.seq == self.latest_seq;

        match result {
            Ok(page) => {
                self.pages.insert(request.query, page.clone());
                if !is_current {
                    debug!(seq = request.seq, latest = self.latest_seq, "Discarding superseded page");
                    return Ok(ApplyOutcome::Superseded);
                }
                self.pending = None;
                self.visible = Some(page);
                Ok(ApplyOutcome::Applied)
            }
            Err(err) if is_current => {
                self.pending = None;
                Err(err)
            }
            Err(err) => {
                debug!(seq = request.seq, error = %err, "Ignoring failure of superseded request");
                Ok(ApplyOutcome::Superseded)
            }
        }
    }

    /// Return the page for `query`, from cache when possible.
    #[instrument(level = "debug", skip(self))]
    pub async fn list(&mut self, query: SearchQuery) -> Result<NotesPage, DomainError> {
        if let Some(page) = self.serve_cached(&query) {
            return Ok(page);
        }

        let request = self.begin(query);
        match self.fetch(&request).await {
            Ok(page) => {
                self.apply(request, Ok(page.clone()))?;
                Ok(page)
            }
            Err(err) => {
                self.pending = None;
                Err(err)
            }
        }
    }

    fn serve_cached(&mut self, query: &SearchQuery) -> Option<NotesPage> {
        let page = self.pages.get(query).cloned()?;
        debug!(?query, "List cache hit");
        // A cached answer still supersedes anything in flight.
        self.latest_seq += 1;
        self.pending = None;
        self.visible = Some(page.clone());
        Some(page)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get(&mut self, id: &str) -> Result<Note, DomainError> {
        if let Some(note) = self.notes.get(id) {
            return Ok(note.clone());
        }
        let note = self.service.get_note(id).await?;
        self.notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    /// Validate and create a note. Invalid drafts never reach the service.
    #[instrument(level = "debug", skip(self))]
    pub async fn create(&mut self, draft: &Draft) -> Result<Note, DomainError> {
        let new_note = draft.validate().map_err(DomainError::Validation)?;
        let note = self.service.create_note(&new_note).await?;
        self.invalidate_lists();
        info!(note_id = %note.id, "Created note");
        Ok(note)
    }

    /// Create from the draft held by `store`, clearing it on success only.
    pub async fn submit(&mut self, store: &mut DraftStore) -> Result<Note, DomainError> {
        let note = self.create(store.draft()).await?;
        store.clear();
        Ok(note)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn remove(&mut self, id: &str) -> Result<Note, DomainError> {
        let deleted = self.service.delete_note(id).await?;
        let before = self.pages.len();
        self.pages.retain(|_, page| !page.contains(id));
        self.notes.remove(id);
        if let Some(visible) = self.visible.as_mut() {
            visible.notes.retain(|note| note.id != id);
        }
        info!(
            note_id = id,
            invalidated = before - self.pages.len(),
            "Deleted note"
        );
        Ok(deleted)
    }

    pub fn invalidate_lists(&mut self) {
        debug!(entries = self.pages.len(), "Invalidating cached lists");
        self.pages.clear();
    }
}
