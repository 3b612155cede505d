//! Integration tests for the Drive client (src/drive/mod.rs).

use mockito::Matcher;
use pretty_assertions::assert_eq;

use project_context::drive::{DriveClient, DriveError};

#[test]
fn test_list_folder_follows_pages() {
    let mut server = mockito::Server::new();
    let first = server
        .mock("GET", "/files")
        .match_header("authorization", "Bearer ya29.test")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "'folder123' in parents and trashed = false".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"nextPageToken": "page-2", "files": [
                {"id": "f1", "name": "notes.txt", "mimeType": "text/plain", "modifiedTime": "2025-01-01T00:00:00.000Z"}
            ]}"#,
        )
        .expect(1)
        .create();
    let second = server
        .mock("GET", "/files")
        .match_query(Matcher::UrlEncoded("pageToken".into(), "page-2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"files": [
                {"id": "d1", "name": "Google AI Studio", "mimeType": "application/vnd.google-apps.folder", "modifiedTime": "2025-01-02T00:00:00.000Z"}
            ]}"#,
        )
        .expect(1)
        .create();

    let client = DriveClient::with_base_url("ya29.test", &server.url());
    let files = client.list_folder("folder123").unwrap();

    first.assert();
    second.assert();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["notes.txt", "Google AI Studio"]);
    assert!(!files[0].is_folder());
    assert!(files[1].is_folder());
}

#[test]
fn test_find_folder_by_name() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/files")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "'root' in parents and trashed = false".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"files": [
                {"id": "x1", "name": "Google AI Studio", "mimeType": "text/plain"},
                {"id": "d1", "name": "Google AI Studio", "mimeType": "application/vnd.google-apps.folder"}
            ]}"#,
        )
        .create();

    let client = DriveClient::with_base_url("ya29.test", &server.url());
    let folder = client.find_folder("Google AI Studio").unwrap().unwrap();
    assert_eq!(folder.id, "d1");
    assert!(client.find_folder("Missing").unwrap().is_none());
}

#[test]
fn test_api_error_is_surfaced() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/files")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("Invalid Credentials")
        .create();

    let client = DriveClient::with_base_url("expired", &server.url());
    match client.list_folder("root") {
        Err(DriveError::Api { status, folder, message }) => {
            assert_eq!(status, 401);
            assert_eq!(folder, "root");
            assert!(message.contains("Invalid Credentials"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}
