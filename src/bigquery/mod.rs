//! BigQuery Sink：目标为 `project.dataset.table`，兼容两代配置格式。
//!
//! - v2：存在 `defaultDataset`，topic 可写成 `dataset:table`
//! - v1：`datasets` / `topicsToTables` 两张按顺序全匹配的正则表

mod config;
mod factory;
mod resolver;

pub use config::{
    BIGQUERY_PLATFORM, BigQueryConfigVersion, BigQuerySinkConf, DatasetRouting, TopicPatternRule,
};
pub use factory::{BIGQUERY_SENSITIVE_KEYS, BIGQUERY_SINK_CONNECTOR_CLASS, BigQuerySinkLineage};
