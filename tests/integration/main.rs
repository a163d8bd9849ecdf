//! Integration tests for the Dossier HTTP API.
//!
//! DB-backed: every test builds the full router against the database
//! named by `TEST_DATABASE_URL` and skips cleanly when it is
//! unreachable.

mod helpers;

mod admin_users_test;
mod auth_test;
mod record_test;
