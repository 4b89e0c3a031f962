//! Validation module tests

use dw_definition_sdk::models::{
    ChangeRecord, FieldDefinition, MetricDefinition, PLACEHOLDER, TableDefinition, UNSPECIFIED,
};
use dw_definition_sdk::validation::{
    FindingKind, MetricValidator, ReportStatus, Severity, TableValidator,
    validate_metric_documents, validate_table_documents,
};

fn valid_table() -> TableDefinition {
    TableDefinition::new("dw.sales_daily")
        .with_description("每日销售汇总数据，按订单粒度")
        .with_owner("张三")
        .with_fields(vec![
            FieldDefinition::new("order_id", "STRING")
                .with_description("订单号")
                .required(),
            FieldDefinition::new("amount", "DECIMAL").with_description("订单金额"),
        ])
        .with_partition_keys(vec!["dt".to_string()])
        .with_data_sources(vec!["ods.orders".to_string()])
}

fn valid_metric() -> MetricDefinition {
    MetricDefinition {
        category: "交易".to_string(),
        business_definition: "成交总额，含退款订单金额".to_string(),
        owner: Some("王五".to_string()),
        formula: "SUM(amount)".to_string(),
        data_source: "dw.sales_daily".to_string(),
        dimensions: vec!["区域".to_string()],
        ..MetricDefinition::new("GMV")
    }
}

mod table_validation_tests {
    use super::*;

    #[test]
    fn test_valid_table_passes() {
        let result = TableValidator::new().validate(&valid_table());
        assert!(result.valid, "unexpected findings: {:?}", result.errors);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_field_reported_once() {
        let table = valid_table().with_fields(vec![
            FieldDefinition::new("x", "INT").with_description("第一列"),
            FieldDefinition::new("y", "INT").with_description("第二列"),
            FieldDefinition::new("x", "INT").with_description("第三列"),
        ]);
        let result = TableValidator::new().validate(&table);

        let duplicates: Vec<_> = result
            .errors
            .iter()
            .filter(|f| f.kind == FindingKind::DuplicateFieldNames)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].message.matches('x').count(), 1);
        assert!(!duplicates[0].message.contains('y'));
        assert!(!result.valid);
    }

    #[test]
    fn test_placeholder_owner_is_missing() {
        let table = valid_table().with_owner(PLACEHOLDER);
        let result = TableValidator::new().validate(&table);
        assert!(!result.valid);
        assert!(result.has_kind(FindingKind::MissingOwner));
    }

    #[test]
    fn test_unspecified_source_is_missing() {
        let table = valid_table().with_data_sources(vec![UNSPECIFIED.to_string()]);
        let result = TableValidator::new().validate(&table);
        assert!(result.has_kind(FindingKind::MissingDataSource));
        let finding = result
            .findings()
            .find(|f| f.kind == FindingKind::MissingDataSource)
            .unwrap();
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.path.as_deref(), Some("dataSources"));
    }

    #[test]
    fn test_invalid_names() {
        let mut table = valid_table();
        table.name = "DW.Sales".to_string();
        table.fields[0].name = "OrderId".to_string();
        let result = TableValidator::new().validate(&table);

        assert!(result.has_kind(FindingKind::InvalidTableName));
        let field = result
            .errors
            .iter()
            .find(|f| f.kind == FindingKind::InvalidFieldName)
            .unwrap();
        assert_eq!(field.path.as_deref(), Some("fields[0].name"));
    }

    #[test]
    fn test_long_table_name_is_a_warning() {
        let mut table = valid_table();
        table.name = format!("dw.{}", "a".repeat(51));
        let result = TableValidator::new().validate(&table);
        assert!(result.valid);
        assert!(
            result
                .warnings
                .iter()
                .any(|f| f.kind == FindingKind::TableNameTooLong)
        );
    }

    #[test]
    fn test_short_field_description_is_a_warning() {
        let mut table = valid_table();
        table.fields[1].description = "额".to_string();
        let result = TableValidator::new().validate(&table);
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, FindingKind::ShortFieldDescription);
        assert_eq!(result.warnings[0].path.as_deref(), Some("fields[1].description"));
    }

    #[test]
    fn test_empty_table_collects_every_finding() {
        let result = TableValidator::new().validate(&TableDefinition::new("dw.empty"));
        assert!(!result.valid);
        for kind in [
            FindingKind::SchemaError,
            FindingKind::MissingOwner,
            FindingKind::MissingDataSource,
        ] {
            assert!(result.has_kind(kind), "expected {:?}", kind);
        }
        assert!(result.has_kind(FindingKind::ShortDescription));
    }
}

mod metric_validation_tests {
    use super::*;

    #[test]
    fn test_valid_metric_passes() {
        let result = MetricValidator::new().validate(&valid_metric());
        assert!(result.valid, "unexpected findings: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_category_and_owner() {
        let metric = MetricDefinition {
            category: String::new(),
            owner: Some(PLACEHOLDER.to_string()),
            ..valid_metric()
        };
        let result = MetricValidator::new().validate(&metric);
        assert!(!result.valid);
        assert!(result.has_kind(FindingKind::MissingCategory));
        assert!(result.has_kind(FindingKind::MissingOwner));
    }

    #[test]
    fn test_soft_findings_keep_metric_valid() {
        let metric = MetricDefinition {
            dimensions: vec![],
            business_definition: "成交总额".to_string(),
            change_history: vec![ChangeRecord {
                date: "2024/01/15".to_string(),
                description: "初始版本".to_string(),
            }],
            ..valid_metric()
        };
        let result = MetricValidator::new().validate(&metric);
        assert!(result.valid);
        assert!(result.has_kind(FindingKind::MissingDimensions));
        assert!(result.has_kind(FindingKind::ShortBusinessDefinition));
        let date = result
            .warnings
            .iter()
            .find(|f| f.kind == FindingKind::InvalidChangeDate)
            .unwrap();
        assert_eq!(date.path.as_deref(), Some("changeHistory[0].date"));
    }

    #[test]
    fn test_missing_formula_is_a_schema_error() {
        let metric = MetricDefinition {
            formula: String::new(),
            ..valid_metric()
        };
        let result = MetricValidator::new().validate(&metric);
        assert!(!result.valid);
        assert!(result.has_kind(FindingKind::SchemaError));
    }
}

mod report_tests {
    use super::*;

    const GOOD_TABLE: &str = "# Table definition: dw.sales_daily

- **Description:** 每日销售汇总数据，按订单粒度
- **Owner:** 张三

## Field Definitions

| Field | Type | Description | Required |
|---|---|---|---|
| order_id | STRING | 订单号 | 是 |

## Data Sources

- ods.orders
";

    #[test]
    fn test_batch_report_counts() {
        let report = validate_table_documents([
            ("good.md", GOOD_TABLE),
            ("no_owner.md", "# Table definition: dw.orphan\n"),
            ("broken.md", "no title here"),
        ]);

        assert_eq!(report.status, ReportStatus::Failed);
        assert!(!report.is_success());
        assert_eq!(report.data.tables.total, 3);
        assert_eq!(report.data.tables.passed, 1);
        assert_eq!(report.data.tables.failed, 2);
        assert_eq!(report.data.metrics.total, 0);

        let extraction = report
            .errors
            .iter()
            .find(|e| e.kind == FindingKind::ExtractionFailed)
            .unwrap();
        assert_eq!(extraction.name, "broken.md");
        assert!(report.errors.iter().any(|e| e.name == "dw.orphan"));
    }

    #[test]
    fn test_all_valid_report_succeeds() {
        let report = validate_table_documents([("good.md", GOOD_TABLE)]);
        assert_eq!(report.status, ReportStatus::Success);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_report_serializes_lowercase_status() {
        let report = validate_metric_documents([("m.md", "# Metric definition: GMV\n")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["data"]["metrics"]["total"], 1);
        assert!(json["errors"].as_array().is_some_and(|e| !e.is_empty()));
    }
}
