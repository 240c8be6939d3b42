// src/infrastructure/http.rs
use crate::application::NotesService;
use crate::constants::{DEFAULT_TIMEOUT_SECS, NOTES_PER_PAGE, TOKEN_ENV_VAR};
use crate::domain::{DomainError, NewNote, Note, NotesPage, SearchQuery};
use crate::infrastructure::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Wire shape of `GET /notes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotesResponse {
    notes: Vec<Note>,
    #[serde(default)]
    page: Option<u32>,
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Bearer-authenticated client for the NoteHub REST API.
#[derive(Clone)]
pub struct HttpNotesService {
    client: Client,
    base_url: Url,
    token: String,
    per_page: u32,
}

impl HttpNotesService {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_options(
            base_url,
            token,
            NOTES_PER_PAGE,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn from_config(config: &ApiConfig, token: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_options(&config.base_url, token, config.per_page, config.timeout())
    }

    fn with_options(
        base_url: &str,
        token: impl Into<String>,
        per_page: u32,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(DomainError::Auth(format!("no API token configured, set {TOKEN_ENV_VAR}")));
        }

        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::Config(format!("Invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::Config(format!("Invalid base URL '{base_url}'")));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token,
            per_page,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Request to notes service failed");
                DomainError::Network(e.to_string())
            })
    }
}

/// Map a response to `T` or to the error taxonomy.
///
/// `note_id` is set for routes addressing a single note, where 404 means the
/// note does not exist.
async fn decode<T: DeserializeOwned>(
    response: Response,
    note_id: Option<&str>,
) -> Result<T, DomainError> {
    let status = response.status();
    debug!(%status, "Notes service responded");

    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                DomainError::Service {
                    status: status.as_u16(),
                    message: format!("Unexpected response body: {e}"),
                }
            } else {
                DomainError::Network(e.to_string())
            }
        });
    }

    match (status, note_id) {
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
            Err(DomainError::Auth(format!("service answered {status}")))
        }
        (StatusCode::NOT_FOUND, Some(id)) => Err(DomainError::NoteNotFound(id.to_string())),
        _ => {
            let body = response
                .text()
                .await
                .inspect_err(|e| debug!(error = %e, "Failed to read error body"))
                .ok();
            let message = service_message(status, body.as_deref());
            Err(DomainError::Service {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// `message` field of an error body, else the canonical status reason.
fn service_message(status: StatusCode, body: Option<&str>) -> String {
    body.and_then(|body| serde_json::from_str::<ErrorBody>(body).ok())
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}

#[async_trait]
impl NotesService for HttpNotesService {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self, query: &SearchQuery) -> Result<NotesPage, DomainError> {
        let mut params: Vec<(&str, String)> = vec![
            ("search", query.text.clone()),
            ("page", query.page.to_string()),
            ("perPage", self.per_page.to_string()),
        ];
        if let Some(tag) = query.tag.tag() {
            params.push(("tag", tag.to_string()));
        }

        let request = self.client.get(self.url(&["notes"])).query(&params);
        let response = self.send(request).await?;
        let body: NotesResponse = decode(response, None).await?;

        Ok(NotesPage {
            notes: body.notes,
            page: body.page.unwrap_or(query.page),
            total_pages: body.total_pages,
        })
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_note(&self, id: &str) -> Result<Note, DomainError> {
        let request = self.client.get(self.url(&["notes", id]));
        let response = self.send(request).await?;
        decode(response, Some(id)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_note(&self, note: &NewNote) -> Result<Note, DomainError> {
        let request = self.client.post(self.url(&["notes"])).json(note);
        let response = self.send(request).await?;
        decode(response, None).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &str) -> Result<Note, DomainError> {
        let request = self.client.delete(self.url(&["notes", id]));
        let response = self.send(request).await?;
        decode(response, Some(id)).await
    }
}
