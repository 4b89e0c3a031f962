//! Field model for the SDK

use serde::{Deserialize, Serialize};

/// One column of a warehouse table, as declared in the field-definition table
///
/// # Example
///
/// ```rust
/// use dw_definition_sdk::models::FieldDefinition;
///
/// let field = FieldDefinition::new("order_id", "STRING").with_description("订单ID");
/// assert!(field.nullable);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Column name
    pub name: String,
    /// Declared type token (e.g., "STRING", "INT", "DECIMAL")
    #[serde(rename = "type")]
    pub data_type: String,
    /// Column description
    #[serde(default)]
    pub description: String,
    /// Whether the column allows NULL values (default: true)
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Illustrative example value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

fn default_true() -> bool {
    true
}

impl FieldDefinition {
    /// Create a nullable field with an empty description
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            description: String::new(),
            nullable: true,
            example: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the field as required (NOT NULL)
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Upper-cased type token with any precision suffix removed, used for
    /// dialect type lookup (`decimal(10,2)` -> `DECIMAL`).
    pub fn base_type(&self) -> String {
        let trimmed = self.data_type.trim();
        let base = trimmed.split('(').next().unwrap_or(trimmed);
        base.trim().to_uppercase()
    }
}
