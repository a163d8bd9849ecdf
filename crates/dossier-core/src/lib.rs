//! # dossier-core
//!
//! Core crate for the Dossier record-keeping service. Contains the
//! configuration schemas and the unified error system.
//!
//! This crate has **no** internal dependencies on other Dossier crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
