//! # dossier-service
//!
//! Business logic: account administration and case-record operations.
//! Every operation takes a [`RequestContext`] and checks the caller's
//! capability before touching storage.

pub mod account;
pub mod context;
pub mod record;

pub use account::AccountAdminService;
pub use context::RequestContext;
pub use record::RecordService;
