//! # dossier-database
//!
//! PostgreSQL persistence for Dossier: pool creation, migrations, and
//! the account and record repositories. This layer is the system of
//! record; uniqueness and cardinality invariants are enforced here by
//! the database itself (unique index, guarded statements) so they hold
//! under concurrent writers.

pub mod connection;
pub mod migration;
pub mod repositories;
