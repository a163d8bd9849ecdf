//! # dossier-entity
//!
//! Domain models for the Dossier service: accounts, roles, sessions,
//! and case records.

pub mod account;
pub mod record;
pub mod session;

pub use account::{Account, Role};
pub use record::CaseRecord;
pub use session::Session;
