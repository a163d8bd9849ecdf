//! Repository implementations.

pub mod account;
pub mod record;

pub use account::AccountRepository;
pub use record::RecordRepository;
