//! CLI command implementations

pub mod generate;
pub mod init;
pub mod parse;
pub mod validate;

use crate::validation::DefinitionKind;

/// Which kind of definition document a command reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Table,
    Metric,
}

impl From<DocumentKind> for DefinitionKind {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Table => DefinitionKind::Table,
            DocumentKind::Metric => DefinitionKind::Metric,
        }
    }
}
