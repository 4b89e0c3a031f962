//! Import module tests

use dw_definition_sdk::import::{
    ImportError, MetricDefinitionImporter, SectionOutcome, TableDefinitionImporter,
};
use dw_definition_sdk::models::UpdateFrequency;

const SALES_DAILY: &str = r#"# Table definition: dw.sales_daily

- **Display Name:** 每日销售汇总
- **Description:** 每日销售汇总数据，按订单粒度
- **Owner:** 张三
- **Update Frequency:** 每日

## 1. Field Definitions

| Field | Type | Description | Required | Example |
|-------|------|-------------|----------|---------|
| order_id | STRING | 订单号 | 是 | O-1001 |
| amount | DECIMAL(10,2) | 订单金额 | 否 | 99.50 |
| `region` | STRING | **区域** | | |
| | STRING | dropped | | |
| dt | STRING | 业务日期 | 是 | |

## 2. Partition Keys

- dt (STRING): 业务日期

## 3. Indexes

- [请填写]

## 4. Data Sources

- ods.orders
- 未指定

## 5. Consumers

- 财务日报
"#;

mod table_import_tests {
    use super::*;

    #[test]
    fn test_parse_full_table_document() {
        let table = TableDefinitionImporter::new().parse(SALES_DAILY).unwrap();

        assert_eq!(table.name, "dw.sales_daily");
        assert_eq!(table.display_name, "每日销售汇总");
        assert_eq!(table.description, "每日销售汇总数据，按订单粒度");
        assert_eq!(table.owner.as_deref(), Some("张三"));
        assert_eq!(table.update_frequency, UpdateFrequency::Daily);
        assert_eq!(table.partition_keys, vec!["dt"]);
        assert_eq!(table.data_sources, vec!["ods.orders"]);
        assert_eq!(table.consumers, vec!["财务日报"]);
        assert!(table.indexes.is_empty());
        assert!(table.quality_rules.is_empty());
    }

    #[test]
    fn test_field_rows() {
        let table = TableDefinitionImporter::new().parse(SALES_DAILY).unwrap();
        let names: Vec<&str> = table.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["order_id", "amount", "region", "dt"]);

        let order_id = table.field("order_id").unwrap();
        assert!(!order_id.nullable);
        assert_eq!(order_id.example.as_deref(), Some("O-1001"));

        let amount = table.field("amount").unwrap();
        assert!(amount.nullable, "only an affirmative marker means required");
        assert_eq!(amount.data_type, "DECIMAL(10,2)");

        let region = table.field("region").unwrap();
        assert_eq!(region.description, "区域");
        assert_eq!(region.example, None);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let importer = TableDefinitionImporter::new();
        assert_eq!(
            importer.parse(SALES_DAILY).unwrap(),
            importer.parse(SALES_DAILY).unwrap()
        );
    }

    #[test]
    fn test_missing_sections_degrade_to_empty() {
        let extraction = TableDefinitionImporter::new()
            .parse_with_report("# Table definition: dw.bare\n")
            .unwrap();

        let table = extraction.definition;
        assert_eq!(table.name, "dw.bare");
        assert!(table.fields.is_empty());
        assert_eq!(table.owner, None);
        assert_eq!(table.update_frequency, UpdateFrequency::Daily);
        assert_eq!(
            extraction.report.outcome("Field Definitions"),
            Some(&SectionOutcome::Missing)
        );
        assert!(extraction.report.missing_sections().contains(&"Data Sources"));
    }

    #[test]
    fn test_section_report_counts_entries() {
        let extraction = TableDefinitionImporter::new()
            .parse_with_report(SALES_DAILY)
            .unwrap();
        assert_eq!(
            extraction.report.outcome("Field Definitions"),
            Some(&SectionOutcome::Parsed { entries: 4 })
        );
        assert_eq!(
            extraction.report.outcome("Indexes"),
            Some(&SectionOutcome::Empty)
        );
    }

    #[test]
    fn test_chinese_headings() {
        let doc = "# 表定义：ods.user_info\n\n- **负责人:** 李四\n\n## 字段定义\n\n| 字段 | 类型 | 描述 | 必填 |\n|---|---|---|---|\n| user_id | BIGINT | 用户ID | 是 |\n\n## 数据来源\n\n- mysql.user\n";
        let table = TableDefinitionImporter::new().parse(doc).unwrap();
        assert_eq!(table.name, "ods.user_info");
        assert_eq!(table.owner.as_deref(), Some("李四"));
        assert_eq!(table.fields.len(), 1);
        assert!(!table.fields[0].nullable);
        assert_eq!(table.data_sources, vec!["mysql.user"]);
    }

    #[test]
    fn test_field_table_under_subheading() {
        let doc = "# Table definition: dw.t\n\n## Field Definitions\n\n### Core\n\n| Field | Type | Description |\n|---|---|---|\n| id | INT | identifier |\n\n## Partition Keys\n\n### Business date\n\n- dt\n";
        let extraction = TableDefinitionImporter::new().parse_with_report(doc).unwrap();
        let table = extraction.definition;
        assert_eq!(table.fields.len(), 1);
        assert_eq!(table.fields[0].name, "id");
        assert_eq!(table.fields[0].description, "identifier");
        assert!(table.partition_keys.is_empty(), "lists stop at any heading");
        assert_eq!(
            extraction.report.outcome("Field Definitions"),
            Some(&SectionOutcome::Parsed { entries: 1 })
        );
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let err = TableDefinitionImporter::new()
            .parse("Just some notes\n\n- **Owner:** 张三\n")
            .unwrap_err();
        assert!(matches!(err, ImportError::NameNotFound(_)));
    }
}

mod metric_import_tests {
    use super::*;

    const GMV: &str = r#"# Metric definition: GMV

- **Category:** 交易
- **Owner:** 王五
- **Data Source:** dw.sales_daily

## Business Definition

成交总额，含退款订单

## Business Formula

```
SUM(amount)
```

## Calculation Formula

```
ignored because the business formula wins
```

## SQL Logic

```sql
SELECT SUM(amount) FROM dw.sales_daily WHERE dt = '${bizdate}'
```

## Dimensions

- 区域
- 渠道

## Related Metrics

- [订单数](order_count.md)

## Change History

- 2024-01-15: 初始版本
"#;

    #[test]
    fn test_parse_metric_document() {
        let metric = MetricDefinitionImporter::new().parse(GMV).unwrap();

        assert_eq!(metric.name, "GMV");
        assert_eq!(metric.category, "交易");
        assert_eq!(metric.owner.as_deref(), Some("王五"));
        assert_eq!(metric.business_definition, "成交总额，含退款订单");
        assert_eq!(metric.formula, "SUM(amount)");
        assert_eq!(
            metric.sql_logic.as_deref(),
            Some("SELECT SUM(amount) FROM dw.sales_daily WHERE dt = '${bizdate}'")
        );
        assert_eq!(metric.data_source, "dw.sales_daily");
        assert_eq!(metric.dimensions, vec!["区域", "渠道"]);
        assert_eq!(metric.related_metrics, vec!["订单数"]);
        assert_eq!(metric.change_history.len(), 1);
        assert_eq!(metric.change_history[0].date, "2024-01-15");
        assert_eq!(metric.change_history[0].description, "初始版本");
    }

    #[test]
    fn test_calculation_formula_is_a_fallback() {
        let doc = "# Metric definition: 订单数\n\n## Calculation Formula\n\n```\nCOUNT(DISTINCT order_id)\n```\n";
        let metric = MetricDefinitionImporter::new().parse(doc).unwrap();
        assert_eq!(metric.formula, "COUNT(DISTINCT order_id)");
        assert_eq!(metric.sql_logic, None);
    }

    #[test]
    fn test_formula_block_under_subheading() {
        let doc = "# Metric definition: GMV\n\n## Business Formula\n\n### Expression\n\n```\nSUM(amount)\n```\n";
        let metric = MetricDefinitionImporter::new().parse(doc).unwrap();
        assert_eq!(metric.formula, "SUM(amount)");
    }

    #[test]
    fn test_metric_without_title_fails() {
        let err = MetricDefinitionImporter::new()
            .parse("# Table definition: dw.t\n")
            .unwrap_err();
        assert!(matches!(err, ImportError::NameNotFound(_)));
    }
}
