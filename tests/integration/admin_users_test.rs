//! Integration tests for master-gated account administration.

use http::StatusCode;
use serde_json::json;

use dossier_core::error::ErrorKind;
use dossier_entity::account::Role;
use dossier_service::account::AccountChanges;
use dossier_service::context::RequestContext;

use crate::helpers::{isolated_app_or_skip, test_app_or_skip, unique};

#[tokio::test]
async fn test_master_creates_account_that_can_login() {
    let app = test_app_or_skip!();
    let master = unique("adm-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let username = unique("adm-entry");
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({ "username": username, "password": "entrypass1", "role": "entry" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.body["id"].as_str().is_some());

    let entry_token = app.login(&username, "entrypass1").await;
    let me = app.request("GET", "/api/me", None, Some(&entry_token)).await;
    assert_eq!(me.body["user"]["role"], json!("entry"));
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let app = test_app_or_skip!();
    let master = unique("dup-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let username = unique("dup-user");
    let body = json!({ "username": username, "password": "password1", "role": "viewer" });

    let first = app
        .request("POST", "/api/admin/users", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request("POST", "/api/admin/users", Some(body), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error_code(), Some("DUPLICATE_USERNAME"));
}

#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let app = test_app_or_skip!();
    let master = unique("role-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({
                "username": unique("role-user"),
                "password": "password1",
                "role": "superuser",
            })),
            Some(&token),
        )
        .await;

    // The role string is parsed against the role enum in the handler,
    // before anything touches the database.
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_master_cannot_administer_accounts() {
    let app = test_app_or_skip!();
    let admin = unique("nm-admin");
    app.create_test_account(&admin, "adminpass1", "admin").await;
    let token = app.login(&admin, "adminpass1").await;

    let list = app.request("GET", "/api/admin/users", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);

    let create = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({ "username": unique("x"), "password": "password1", "role": "viewer" })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);
    assert_eq!(create.error_code(), Some("FORBIDDEN"));
}

#[tokio::test]
async fn test_listing_is_redacted() {
    let app = test_app_or_skip!();
    let master = unique("list-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let response = app.request("GET", "/api/admin/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let users = response.body["users"].as_array().expect("users array");
    assert!(users.iter().any(|u| u["username"] == json!(master)));
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_patch_role_applies_on_next_login() {
    let app = test_app_or_skip!();
    let master = unique("patch-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let username = unique("patch-user");
    let id = app.create_test_account(&username, "password1", "entry").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/users/{id}"),
            Some(json!({ "role": "search" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let user_token = app.login(&username, "password1").await;
    let me = app.request("GET", "/api/me", None, Some(&user_token)).await;
    assert_eq!(me.body["user"]["role"], json!("search"));
}

#[tokio::test]
async fn test_patch_password_replaces_the_credential() {
    let app = test_app_or_skip!();
    let master = unique("pw-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let username = unique("pw-user");
    let id = app.create_test_account(&username, "oldpassword", "viewer").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/users/{id}"),
            Some(json!({ "password": "newpassword" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "username": username, "password": "oldpassword" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    app.login(&username, "newpassword").await;
}

#[tokio::test]
async fn test_empty_patch_is_rejected() {
    let app = test_app_or_skip!();
    let master = unique("empty-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let id = app
        .create_test_account(&unique("empty-user"), "password1", "viewer")
        .await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/users/{id}"),
            Some(json!({})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION"));
}

#[tokio::test]
async fn test_self_deletion_is_refused() {
    let app = test_app_or_skip!();
    let master = unique("self-master");
    let id = app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let response = app
        .request("DELETE", &format!("/api/admin/users/{id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("SELF_DELETION"));
}

#[tokio::test]
async fn test_deleting_one_of_two_masters_succeeds() {
    let app = test_app_or_skip!();
    let master_a = unique("two-master-a");
    app.create_test_account(&master_a, "masterpass", "master").await;
    let master_b_id = app
        .create_test_account(&unique("two-master-b"), "masterpass", "master")
        .await;
    let token = app.login(&master_a, "masterpass").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{master_b_id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}

#[tokio::test]
async fn test_last_master_cannot_be_deleted() {
    // Asserts on master cardinality across the whole accounts table, so
    // it runs against its own database; any master left behind by a
    // sibling test would satisfy the delete guard and break it.
    let app = isolated_app_or_skip!();
    let master_a = unique("last-master-a");
    let master_a_id = app.create_test_account(&master_a, "masterpass", "master").await;
    let master_b_id = app
        .create_test_account(&unique("last-master-b"), "masterpass", "master")
        .await;
    let token = app.login(&master_a, "masterpass").await;

    // Demote ourselves first; the session keeps its master role, so B
    // becomes the only master account left in the store.
    let demote = app
        .request(
            "PATCH",
            &format!("/api/admin/users/{master_a_id}"),
            Some(json!({ "role": "admin" })),
            Some(&token),
        )
        .await;
    assert_eq!(demote.status, StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{master_b_id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("LAST_PRIVILEGED_ACCOUNT"));

    let masters = app
        .state
        .account_repo
        .count_masters()
        .await
        .expect("Failed to count masters");
    assert_eq!(masters, 1, "the refused delete must leave B in place");
}

#[tokio::test]
async fn test_rejected_patch_applies_nothing() {
    let app = test_app_or_skip!();
    let master = unique("part-master");
    let master_id = app.create_test_account(&master, "masterpass", "master").await;

    let username = unique("part-user");
    let id = app.create_test_account(&username, "password1", "entry").await;

    // Drive the service directly: a valid role next to a too-short
    // password must refuse the whole patch, not commit the role half.
    let ctx = RequestContext {
        account_id: master_id,
        username: master,
        role: Role::Master,
    };
    let err = app
        .state
        .account_admin
        .update(
            &ctx,
            id,
            AccountChanges {
                role: Some(Role::Search),
                password: Some("short".into()),
            },
        )
        .await
        .expect_err("a rejected password must fail the patch");
    assert_eq!(err.kind, ErrorKind::Validation);

    let account = app
        .state
        .account_repo
        .find_by_id(id)
        .await
        .expect("Failed to load account")
        .expect("Account vanished");
    assert_eq!(account.role, Role::Entry);
}

#[tokio::test]
async fn test_delete_entry_account() {
    let app = test_app_or_skip!();
    let master = unique("del-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let username = unique("del-user");
    let id = app.create_test_account(&username, "password1", "entry").await;

    let response = app
        .request("DELETE", &format!("/api/admin/users/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let login = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "username": username, "password": "password1" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleting_an_unknown_account_is_404() {
    let app = test_app_or_skip!();
    let master = unique("gone-master");
    app.create_test_account(&master, "masterpass", "master").await;
    let token = app.login(&master, "masterpass").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
