//! Models module for the SDK
//!
//! Defines the records recovered from definition documents: tables, their
//! fields, and business metrics. Records are immutable values once parsed.

pub mod enums;
pub mod field;
pub mod metric;
pub mod placeholder;
pub mod table;

pub use enums::{SqlDialect, UpdateFrequency};
pub use field::FieldDefinition;
pub use metric::{ChangeRecord, MetricDefinition};
pub use placeholder::{PLACEHOLDER, UNSPECIFIED, is_missing, is_unfilled, strip_placeholder};
pub use table::TableDefinition;
