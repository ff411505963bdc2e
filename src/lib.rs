//! wp-sink-lineage: Kafka Connect sink 连接器的 topic -> 目标对象 血缘解析
//!
//! 模块划分：
//! - manifest：连接器清单与扁平配置
//! - transform：`RegexRouter` 改名管道
//! - connector：按 `connector.class` 分发
//! - s3 / snowflake / bigquery：各 sink 的配置解析与血缘计算

pub mod connector;
pub mod error;
pub mod lineage;
pub mod manifest;
mod naming;
pub mod transform;

// S3：默认启用（feature = "s3"）
#[cfg(feature = "s3")]
pub mod s3;

// Snowflake：默认启用（feature = "snowflake"）
#[cfg(feature = "snowflake")]
pub mod snowflake;

// BigQuery：默认启用（feature = "bigquery"）
#[cfg(feature = "bigquery")]
pub mod bigquery;

pub use connector::{SinkConnector, SinkLineageFactory, extract_sink_lineage};
pub use error::{LineageError, LineageResult};
pub use lineage::{
    CollectedReport, ConnectorLineage, KAFKA, LineageEdge, LineageReport, LineageWarning,
    LogReport,
};
pub use manifest::{ConnectorConfig, ConnectorManifest};
pub use naming::sanitize_table_name;
pub use transform::{RenamePipeline, TransformSpec};
