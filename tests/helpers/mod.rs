use notehub::infrastructure::HttpNotesService;
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

/// Client pointed at a mockito server.
pub fn service_for(server: &mockito::Server) -> HttpNotesService {
    HttpNotesService::new(&server.url(), TOKEN).expect("Valid service")
}

/// A note as the service serializes it.
#[allow(dead_code)]
pub fn note_json(id: &str, title: &str, tag: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("Content of {title}"),
        "tag": tag,
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-02T08:30:00Z"
    })
}

/// Known note IDs used across the HTTP tests
#[allow(dead_code)]
pub mod test_notes {
    pub const GROCERIES: &str = "65f1a2b3c4d5e6f708192a3b";
    pub const STANDUP: &str = "65f1a2b3c4d5e6f708192a3c";

    // For testing error cases
    pub const NONEXISTENT: &str = "000000000000000000000000";
}
