//! Account administration.

pub mod admin;

pub use admin::{AccountAdminService, AccountChanges, NewAccount};
