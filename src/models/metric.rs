//! Metric model for the SDK

use super::placeholder::is_unfilled;
use serde::{Deserialize, Serialize};

/// One entry of a metric's change history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Date text as written in the document (normally `YYYY-MM-DD`)
    pub date: String,
    pub description: String,
}

/// A business metric recovered from a metric-definition document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricDefinition {
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Business meaning of the metric
    #[serde(default)]
    pub business_definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Canonical calculation expression
    #[serde(default)]
    pub formula: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_logic: Option<String>,
    #[serde(default)]
    pub data_source: String,
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub related_metrics: Vec<String>,
    #[serde(default)]
    pub change_history: Vec<ChangeRecord>,
}

impl MetricDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether an owner is declared. The placeholder counts as absent.
    pub fn has_owner(&self) -> bool {
        self.owner.as_deref().is_some_and(|owner| !is_unfilled(owner))
    }
}
