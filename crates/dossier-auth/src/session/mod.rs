//! Opaque-token session management.
//!
//! Tokens are random 64-character strings handed to the client once at
//! login; the server keeps only a SHA-256 digest of each token as the
//! store key, so a leaked store dump cannot be replayed.

pub mod manager;
pub mod store;
pub mod token;

pub use manager::{LoginOutcome, SessionManager};
pub use store::SessionStore;
