//! Validation findings and results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a finding makes the record invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Machine-readable code of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    /// Shape or format constraint violated
    SchemaError,
    InvalidTableName,
    TableNameTooLong,
    DuplicateFieldNames,
    InvalidFieldName,
    ShortFieldDescription,
    MissingOwner,
    ShortDescription,
    MissingDataSource,
    MissingCategory,
    ShortBusinessDefinition,
    MissingDimensions,
    InvalidChangeDate,
    /// The document could not be parsed at all
    ExtractionFailed,
}

impl FindingKind {
    pub fn code(&self) -> &'static str {
        match self {
            FindingKind::SchemaError => "SCHEMA_ERROR",
            FindingKind::InvalidTableName => "INVALID_TABLE_NAME",
            FindingKind::TableNameTooLong => "TABLE_NAME_TOO_LONG",
            FindingKind::DuplicateFieldNames => "DUPLICATE_FIELD_NAMES",
            FindingKind::InvalidFieldName => "INVALID_FIELD_NAME",
            FindingKind::ShortFieldDescription => "SHORT_FIELD_DESCRIPTION",
            FindingKind::MissingOwner => "MISSING_OWNER",
            FindingKind::ShortDescription => "SHORT_DESCRIPTION",
            FindingKind::MissingDataSource => "MISSING_DATA_SOURCE",
            FindingKind::MissingCategory => "MISSING_CATEGORY",
            FindingKind::ShortBusinessDefinition => "SHORT_BUSINESS_DEFINITION",
            FindingKind::MissingDimensions => "MISSING_DIMENSIONS",
            FindingKind::InvalidChangeDate => "INVALID_CHANGE_DATE",
            FindingKind::ExtractionFailed => "EXTRACTION_FAILED",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One problem discovered about a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub kind: FindingKind,
    pub message: String,
    /// Dotted location of the offending attribute, e.g. `fields[2].name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub severity: Severity,
}

impl ValidationFinding {
    pub fn error(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
            severity: Severity::Error,
        }
    }

    pub fn warning(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
            severity: Severity::Warning,
        }
    }

    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {} ({})", self.kind, self.message, path),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

/// Verdict for one definition.
///
/// `valid` is true exactly when `errors` is empty; the only constructor is
/// [`ValidationResult::from_findings`], which keeps the two in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use = "validation results should be checked for errors"]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
}

impl ValidationResult {
    /// Partition pooled findings into errors and warnings, preserving order
    pub fn from_findings(findings: Vec<ValidationFinding>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            findings.into_iter().partition(ValidationFinding::is_error);
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Errors and warnings in reporting order (errors first)
    pub fn findings(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn has_kind(&self, kind: FindingKind) -> bool {
        self.findings().any(|f| f.kind == kind)
    }
}
