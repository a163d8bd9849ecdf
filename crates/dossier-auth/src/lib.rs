//! # dossier-auth
//!
//! Authentication and authorization for Dossier: argon2 password
//! hashing, the opaque-token session manager, the login rate limiter,
//! and the role-based authorization gate.

pub mod password;
pub mod rbac;
pub mod session;
pub mod throttle;

pub use password::PasswordHasher;
pub use rbac::{Capability, RbacEnforcer};
pub use session::{SessionManager, SessionStore};
pub use throttle::{LoginRateLimiter, ThrottleDecision};
