//! Shared data model for trial-based experiments: field values, trial
//! schemas, trial records and the workspace error type.

pub mod error;
pub mod record;
pub mod value;

pub use error::{Error, Result};
pub use record::{Schema, TrialRecord};
pub use value::FieldValue;
