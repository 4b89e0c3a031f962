//! Import functionality
//!
//! Provides extractors that recover typed records from definition documents:
//! - Table definitions (`# Table definition: db.table`)
//! - Metric definitions (`# Metric definition: name`)
//!
//! Extraction is tolerant. Only a missing title is an error; any other
//! missing section degrades to an empty value and is reported in the
//! [`ExtractionReport`] so that validation can flag it later.

pub mod markdown;
pub mod metric;
pub mod table;

use serde::{Deserialize, Serialize};

/// Error during import
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ImportError {
    /// The document has no recognizable title heading carrying the name
    #[error("Name not found: {0}")]
    NameNotFound(String),
    /// The document could not be read
    #[error("IO error: {0}")]
    IoError(String),
}

/// What happened when a section was looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SectionOutcome {
    /// Section found and at least one entry decoded
    Parsed { entries: usize },
    /// Heading present but nothing usable beneath it
    Empty,
    /// No heading with any accepted name
    Missing,
}

/// Outcome for one named section of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub section: String,
    #[serde(flatten)]
    pub outcome: SectionOutcome,
}

/// Per-section diagnostics for one extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub sections: Vec<SectionReport>,
}

impl ExtractionReport {
    pub(crate) fn record(&mut self, section: &str, found: bool, entries: usize) {
        let outcome = match (found, entries) {
            (false, _) => SectionOutcome::Missing,
            (true, 0) => SectionOutcome::Empty,
            (true, n) => SectionOutcome::Parsed { entries: n },
        };
        self.sections.push(SectionReport {
            section: section.to_string(),
            outcome,
        });
    }

    pub fn outcome(&self, section: &str) -> Option<&SectionOutcome> {
        self.sections
            .iter()
            .find(|s| s.section == section)
            .map(|s| &s.outcome)
    }

    /// Names of sections that were not present in the document
    pub fn missing_sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.outcome == SectionOutcome::Missing)
            .map(|s| s.section.as_str())
            .collect()
    }
}

/// A record together with the diagnostics gathered while extracting it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use = "extractions carry the parsed record and its section report"]
pub struct Extraction<T> {
    pub definition: T,
    pub report: ExtractionReport,
}

pub use metric::MetricDefinitionImporter;
pub use table::TableDefinitionImporter;
