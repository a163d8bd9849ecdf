//! Integration tests for record creation, gated retrieval, notes and
//! the oversight listing.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, test_app_or_skip, unique};

fn record_body(subject: &str, password: Option<&str>) -> serde_json::Value {
    json!({
        "subject_name": subject,
        "subject_first_name": "Jane",
        "subject_birth_date": "1990-01-01",
        "affiliation": "Acme",
        "sponsor": "Smith",
        "record_password": password,
        "notes": "initial notes",
    })
}

fn search_body(subject: &str, password: Option<&str>) -> serde_json::Value {
    json!({
        "subject_name": subject,
        "subject_first_name": "Jane",
        "subject_birth_date": "1990-01-01",
        "record_password": password,
    })
}

async fn login_as(app: &TestApp, prefix: &str, role: &str) -> String {
    let username = unique(prefix);
    app.create_test_account(&username, "password123", role).await;
    app.login(&username, "password123").await
}

#[tokio::test]
async fn test_entry_creates_and_search_finds() {
    let app = test_app_or_skip!();
    let entry = login_as(&app, "rec-entry", "entry").await;
    let search = login_as(&app, "rec-search", "search").await;
    let subject = unique("Subject");

    let create = app
        .request("POST", "/api/records", Some(record_body(&subject, None)), Some(&entry))
        .await;
    assert_eq!(create.status, StatusCode::OK, "{:?}", create.body);

    let found = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, None)),
            Some(&search),
        )
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["record"]["subject_name"], json!(subject));
    assert_eq!(found.body["record"]["affiliation"], json!("Acme"));
    // The shared secret itself never leaves the server.
    assert!(found.body["record"].get("record_password").is_none());
}

#[tokio::test]
async fn test_missing_key_fields_are_rejected() {
    let app = test_app_or_skip!();
    let entry = login_as(&app, "req-entry", "entry").await;

    let response = app
        .request(
            "POST",
            "/api/records",
            Some(json!({
                "subject_name": unique("Subject"),
                "subject_first_name": "   ",
                "subject_birth_date": "1990-01-01",
            })),
            Some(&entry),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("MISSING_REQUIRED_FIELDS"));
}

#[tokio::test]
async fn test_no_match_is_404() {
    let app = test_app_or_skip!();
    let search = login_as(&app, "miss-search", "search").await;

    let response = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&unique("Nobody"), None)),
            Some(&search),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_record_password_gate() {
    let app = test_app_or_skip!();
    let entry = login_as(&app, "gate-entry", "entry").await;
    let search = login_as(&app, "gate-search", "search").await;
    let subject = unique("Gated");

    app.request(
        "POST",
        "/api/records",
        Some(record_body(&subject, Some("sesame"))),
        Some(&entry),
    )
    .await;

    let wrong = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, Some("open"))),
            Some(&search),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
    assert_eq!(wrong.error_code(), Some("WRONG_RECORD_PASSWORD"));

    let missing = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, None)),
            Some(&search),
        )
        .await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);

    let right = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, Some("sesame"))),
            Some(&search),
        )
        .await;
    assert_eq!(right.status, StatusCode::OK);
}

#[tokio::test]
async fn test_master_is_not_exempt_from_the_record_password() {
    let app = test_app_or_skip!();
    let entry = login_as(&app, "exempt-entry", "entry").await;
    let master = login_as(&app, "exempt-master", "master").await;
    let subject = unique("Sealed");

    app.request(
        "POST",
        "/api/records",
        Some(record_body(&subject, Some("sesame"))),
        Some(&entry),
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, None)),
            Some(&master),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("WRONG_RECORD_PASSWORD"));
}

#[tokio::test]
async fn test_worker_creates_but_cannot_search() {
    let app = test_app_or_skip!();
    let worker = login_as(&app, "w-worker", "worker").await;
    let subject = unique("Worker");

    let create = app
        .request("POST", "/api/records", Some(record_body(&subject, None)), Some(&worker))
        .await;
    assert_eq!(create.status, StatusCode::OK);

    let search = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, None)),
            Some(&worker),
        )
        .await;
    assert_eq!(search.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_viewer_searches_but_cannot_create() {
    let app = test_app_or_skip!();
    let viewer = login_as(&app, "v-viewer", "viewer").await;

    let create = app
        .request(
            "POST",
            "/api/records",
            Some(record_body(&unique("Viewer"), None)),
            Some(&viewer),
        )
        .await;

    assert_eq!(create.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_key_resolves_to_newest_record() {
    let app = test_app_or_skip!();
    let entry = login_as(&app, "dupk-entry", "entry").await;
    let subject = unique("Twin");

    let mut first = record_body(&subject, None);
    first["sponsor"] = json!("First");
    app.request("POST", "/api/records", Some(first), Some(&entry)).await;

    let mut second = record_body(&subject, None);
    second["sponsor"] = json!("Second");
    app.request("POST", "/api/records", Some(second), Some(&entry)).await;

    let found = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, None)),
            Some(&entry),
        )
        .await;

    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["record"]["sponsor"], json!("Second"));
}

#[tokio::test]
async fn test_notes_update_is_master_only() {
    let app = test_app_or_skip!();
    let entry = login_as(&app, "note-entry", "entry").await;
    let master = login_as(&app, "note-master", "master").await;
    let subject = unique("Notes");

    let create = app
        .request("POST", "/api/records", Some(record_body(&subject, None)), Some(&entry))
        .await;
    let id = create.body["id"].as_str().expect("record id").to_string();

    let forbidden = app
        .request(
            "PATCH",
            &format!("/api/records/{id}/notes"),
            Some(json!({ "notes": "entry tampering" })),
            Some(&entry),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let allowed = app
        .request(
            "PATCH",
            &format!("/api/records/{id}/notes"),
            Some(json!({ "notes": "reviewed and cleared" })),
            Some(&master),
        )
        .await;
    assert_eq!(allowed.status, StatusCode::OK);

    let found = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, None)),
            Some(&entry),
        )
        .await;
    assert_eq!(found.body["record"]["notes"], json!("reviewed and cleared"));
}

#[tokio::test]
async fn test_notes_update_unknown_record_is_404() {
    let app = test_app_or_skip!();
    let master = login_as(&app, "note404-master", "master").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/records/{}/notes", uuid::Uuid::new_v4()),
            Some(json!({ "notes": "whatever" })),
            Some(&master),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversight_listing_is_master_only_and_redacted() {
    let app = test_app_or_skip!();
    let entry = login_as(&app, "list-entry", "entry").await;
    let master = login_as(&app, "list-master", "master").await;
    let subject = unique("Listed");

    app.request(
        "POST",
        "/api/records",
        Some(record_body(&subject, Some("sesame"))),
        Some(&entry),
    )
    .await;

    let forbidden = app.request("GET", "/api/records", None, Some(&entry)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let listing = app.request("GET", "/api/records", None, Some(&master)).await;
    assert_eq!(listing.status, StatusCode::OK);

    let records = listing.body["records"].as_array().expect("records array");
    let ours = records
        .iter()
        .find(|r| r["subject_name"] == json!(subject))
        .expect("created record in listing");

    assert_eq!(ours["password_protected"], json!(true));
    assert!(ours.get("record_password").is_none());
}

#[tokio::test]
async fn test_end_to_end_flow() {
    let app = test_app_or_skip!();

    // Seeding runs the way the server does at startup; it is keyed on
    // "no master exists", so on a shared test database it may be a
    // no-op. Either way it must succeed, twice.
    dossier_api::seed_master_account(&app.state)
        .await
        .expect("seeding");
    dossier_api::seed_master_account(&app.state)
        .await
        .expect("seeding is idempotent");

    let master_name = unique("flow-master");
    app.create_test_account(&master_name, "masterpass", "master")
        .await;
    let master = app.login(&master_name, "masterpass").await;

    // Master provisions a clerk, the clerk files a record.
    let clerk = unique("flow-clerk");
    app.request(
        "POST",
        "/api/admin/users",
        Some(json!({ "username": clerk, "password": "clerkpass1", "role": "entry" })),
        Some(&master),
    )
    .await;
    let clerk_token = app.login(&clerk, "clerkpass1").await;

    let subject = unique("Flow");
    let create = app
        .request(
            "POST",
            "/api/records",
            Some(record_body(&subject, None)),
            Some(&clerk_token),
        )
        .await;
    assert_eq!(create.status, StatusCode::OK);
    let id = create.body["id"].as_str().expect("record id").to_string();

    // Master annotates; the clerk's next search reflects it.
    app.request(
        "PATCH",
        &format!("/api/records/{id}/notes"),
        Some(json!({ "notes": "verified" })),
        Some(&master),
    )
    .await;

    let found = app
        .request(
            "POST",
            "/api/records/search",
            Some(search_body(&subject, None)),
            Some(&clerk_token),
        )
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["record"]["notes"], json!("verified"));
}
