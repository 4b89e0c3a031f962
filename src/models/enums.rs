//! Enums for definition records and SQL generation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a warehouse table is refreshed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    Realtime,
    Hourly,
    #[default]
    Daily,
    Weekly,
}

impl UpdateFrequency {
    /// Lenient parse used by the extractor: unknown values fall back to `Daily`.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateFrequency::Realtime => "realtime",
            UpdateFrequency::Hourly => "hourly",
            UpdateFrequency::Daily => "daily",
            UpdateFrequency::Weekly => "weekly",
        }
    }
}

impl FromStr for UpdateFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "realtime" | "实时" => Ok(UpdateFrequency::Realtime),
            "hourly" | "每小时" => Ok(UpdateFrequency::Hourly),
            "daily" | "每日" | "每天" => Ok(UpdateFrequency::Daily),
            "weekly" | "每周" => Ok(UpdateFrequency::Weekly),
            other => Err(format!("Unknown update frequency: {}", other)),
        }
    }
}

impl fmt::Display for UpdateFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target SQL engine for generated DDL/ETL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Hive,
    MySql,
    ClickHouse,
    MaxCompute,
}

impl SqlDialect {
    pub const ALL: [SqlDialect; 4] = [
        SqlDialect::Hive,
        SqlDialect::MySql,
        SqlDialect::ClickHouse,
        SqlDialect::MaxCompute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SqlDialect::Hive => "hive",
            SqlDialect::MySql => "mysql",
            SqlDialect::ClickHouse => "clickhouse",
            SqlDialect::MaxCompute => "maxcompute",
        }
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hive" => Ok(SqlDialect::Hive),
            "mysql" => Ok(SqlDialect::MySql),
            "clickhouse" => Ok(SqlDialect::ClickHouse),
            "maxcompute" | "odps" => Ok(SqlDialect::MaxCompute),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
