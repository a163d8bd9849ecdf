//! Case record entity.

pub mod model;

pub use model::{CaseRecord, CreateCaseRecord, RecordKey, RecordOverview};
