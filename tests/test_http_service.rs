mod helpers;

use helpers::{note_json, service_for, test_notes, TOKEN};
use mockito::{Matcher, Server};
use notehub::application::NotesService;
use notehub::domain::{DomainError, NewNote, SearchQuery, Tag, TagFilter};
use serde_json::json;

#[tokio::test]
async fn given_tag_filter_when_listing_then_sends_all_query_params() {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notes")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search".into(), "milk".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("perPage".into(), "10".into()),
            Matcher::UrlEncoded("tag".into(), "Shopping".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "notes": [note_json(test_notes::GROCERIES, "Buy milk", "Shopping")],
                "page": 2,
                "totalPages": 3
            })
            .to_string(),
        )
        .create_async()
        .await;
    let service = service_for(&server);

    // Act
    let page = service
        .list_notes(&SearchQuery::new("milk", 2, TagFilter::Only(Tag::Shopping)))
        .await
        .expect("List should succeed");

    // Assert
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.notes[0].id, test_notes::GROCERIES);
    assert_eq!(page.notes[0].tag, Tag::Shopping);
    mock.assert_async().await;
}

#[tokio::test]
async fn given_all_filter_when_listing_then_omits_tag_param() {
    let mut server = Server::new_async().await;
    let with_tag = server
        .mock("GET", "/notes")
        .match_query(Matcher::Regex("tag=".into()))
        .with_status(500)
        .expect(0)
        .create_async()
        .await;
    let without_tag = server
        .mock("GET", "/notes")
        .match_query(Matcher::UrlEncoded("search".into(), "".into()))
        .with_status(200)
        .with_body(json!({ "notes": [], "totalPages": 0 }).to_string())
        .create_async()
        .await;
    let service = service_for(&server);

    let page = service
        .list_notes(&SearchQuery::default())
        .await
        .expect("List should succeed");

    // page falls back to the requested one when the body omits it
    assert_eq!(page.page, 1);
    assert!(page.notes.is_empty());
    with_tag.assert_async().await;
    without_tag.assert_async().await;
}

#[tokio::test]
async fn given_unauthorized_when_listing_then_auth_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/notes")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let result = service_for(&server).list_notes(&SearchQuery::default()).await;

    assert!(matches!(result, Err(DomainError::Auth(_))));
}

#[tokio::test]
async fn given_server_error_when_listing_then_service_error_with_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/notes")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body(json!({ "message": "maintenance" }).to_string())
        .create_async()
        .await;

    let result = service_for(&server).list_notes(&SearchQuery::default()).await;

    match result {
        Err(DomainError::Service { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_malformed_body_when_listing_then_service_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/notes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let result = service_for(&server).list_notes(&SearchQuery::default()).await;

    assert!(matches!(result, Err(DomainError::Service { status: 200, .. })));
}

#[tokio::test]
async fn given_unreachable_host_when_listing_then_network_error() {
    // Port 9 (discard) on localhost is closed in test environments
    let service = notehub::infrastructure::HttpNotesService::new("http://127.0.0.1:9", TOKEN)
        .expect("Valid service");

    let result = service.list_notes(&SearchQuery::default()).await;

    assert!(matches!(result, Err(DomainError::Network(_))));
}

#[tokio::test]
async fn given_existing_id_when_getting_then_returns_note() {
    let mut server = Server::new_async().await;
    let path = format!("/notes/{}", test_notes::STANDUP);
    server
        .mock("GET", path.as_str())
        .with_status(200)
        .with_body(note_json(test_notes::STANDUP, "Standup", "Meeting").to_string())
        .create_async()
        .await;

    let note = service_for(&server)
        .get_note(test_notes::STANDUP)
        .await
        .expect("Get should succeed");

    assert_eq!(note.title, "Standup");
    assert_eq!(note.tag, Tag::Meeting);
    assert_eq!(note.updated_at.to_rfc3339(), "2025-01-02T08:30:00+00:00");
}

#[tokio::test]
async fn given_unknown_id_when_getting_then_not_found() {
    let mut server = Server::new_async().await;
    let path = format!("/notes/{}", test_notes::NONEXISTENT);
    server
        .mock("GET", path.as_str())
        .with_status(404)
        .create_async()
        .await;

    let result = service_for(&server).get_note(test_notes::NONEXISTENT).await;

    match result {
        Err(DomainError::NoteNotFound(id)) => assert_eq!(id, test_notes::NONEXISTENT),
        other => panic!("Expected NoteNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn given_new_note_when_creating_then_posts_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/notes")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_body(Matcher::Json(json!({
            "title": "Buy milk",
            "content": "Content of Buy milk",
            "tag": "Shopping"
        })))
        .with_status(201)
        .with_body(note_json(test_notes::GROCERIES, "Buy milk", "Shopping").to_string())
        .create_async()
        .await;
    let new_note = NewNote {
        title: "Buy milk".to_string(),
        content: "Content of Buy milk".to_string(),
        tag: Tag::Shopping,
    };

    let created = service_for(&server)
        .create_note(&new_note)
        .await
        .expect("Create should succeed");

    assert_eq!(created.id, test_notes::GROCERIES);
    mock.assert_async().await;
}

#[tokio::test]
async fn given_rejected_payload_when_creating_then_service_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/notes")
        .with_status(400)
        .with_body(json!({ "message": "title too short" }).to_string())
        .create_async()
        .await;
    let new_note = NewNote {
        title: "abc".to_string(),
        content: "x".to_string(),
        tag: Tag::Todo,
    };

    let result = service_for(&server).create_note(&new_note).await;

    assert!(matches!(result, Err(DomainError::Service { status: 400, .. })));
}

#[tokio::test]
async fn given_existing_id_when_deleting_then_returns_deleted_note() {
    let mut server = Server::new_async().await;
    let path = format!("/notes/{}", test_notes::GROCERIES);
    let mock = server
        .mock("DELETE", path.as_str())
        .with_status(200)
        .with_body(note_json(test_notes::GROCERIES, "Buy milk", "Shopping").to_string())
        .create_async()
        .await;

    let deleted = service_for(&server)
        .delete_note(test_notes::GROCERIES)
        .await
        .expect("Delete should succeed");

    assert_eq!(deleted.title, "Buy milk");
    mock.assert_async().await;
}

#[tokio::test]
async fn given_forbidden_when_deleting_then_auth_error() {
    let mut server = Server::new_async().await;
    let path = format!("/notes/{}", test_notes::GROCERIES);
    server
        .mock("DELETE", path.as_str())
        .with_status(403)
        .create_async()
        .await;

    let result = service_for(&server).delete_note(test_notes::GROCERIES).await;

    assert!(matches!(result, Err(DomainError::Auth(_))));
}
