//! Sink 连接器分发：按 `connector.class` 选择对应的血缘解析实现。

use crate::error::{LineageError, LineageResult};
use crate::lineage::{ConnectorLineage, LineageEdge, LineageReport};
use crate::manifest::{ConnectorConfig, ConnectorManifest, strip_sensitive};

#[cfg(feature = "bigquery")]
use crate::bigquery::{BIGQUERY_SINK_CONNECTOR_CLASS, BigQuerySinkLineage};
#[cfg(feature = "s3")]
use crate::s3::{S3_SINK_CONNECTOR_CLASS, S3SinkLineage};
#[cfg(feature = "snowflake")]
use crate::snowflake::{SNOWFLAKE_SINK_CONNECTOR_CLASS, SnowflakeSinkLineage};

/// 每类 sink 连接器都实现同一套契约：解析配置、计算血缘、导出脱敏配置。
pub trait SinkLineageFactory: Send + Sync {
    fn connector_class(&self) -> &'static str;

    fn target_platform(&self) -> &'static str;

    /// 不允许出现在 flow property bag 里的配置项
    fn sensitive_keys(&self) -> &'static [&'static str];

    fn extract_lineages(
        &self,
        manifest: &ConnectorManifest,
        report: &mut dyn LineageReport,
    ) -> LineageResult<Vec<LineageEdge>>;

    fn flow_property_bag(&self, manifest: &ConnectorManifest) -> ConnectorConfig {
        strip_sensitive(&manifest.config, self.sensitive_keys())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkConnector {
    #[cfg(feature = "s3")]
    S3,
    #[cfg(feature = "snowflake")]
    Snowflake,
    #[cfg(feature = "bigquery")]
    BigQuery,
}

impl SinkConnector {
    pub fn from_class(class: &str) -> Option<Self> {
        match class.trim() {
            #[cfg(feature = "s3")]
            S3_SINK_CONNECTOR_CLASS => Some(Self::S3),
            #[cfg(feature = "snowflake")]
            SNOWFLAKE_SINK_CONNECTOR_CLASS => Some(Self::Snowflake),
            #[cfg(feature = "bigquery")]
            BIGQUERY_SINK_CONNECTOR_CLASS => Some(Self::BigQuery),
            _ => None,
        }
    }

    pub fn factory(&self) -> &'static dyn SinkLineageFactory {
        match *self {
            #[cfg(feature = "s3")]
            Self::S3 => &S3SinkLineage,
            #[cfg(feature = "snowflake")]
            Self::Snowflake => &SnowflakeSinkLineage,
            #[cfg(feature = "bigquery")]
            Self::BigQuery => &BigQuerySinkLineage,
        }
    }

    pub fn extract(
        &self,
        manifest: &ConnectorManifest,
        report: &mut dyn LineageReport,
    ) -> LineageResult<ConnectorLineage> {
        let factory = self.factory();
        let edges = factory.extract_lineages(manifest, report)?;
        log::debug!(
            "connector {} resolved {} lineage edges from {} topics",
            manifest.name,
            edges.len(),
            manifest.topic_names.len()
        );
        Ok(ConnectorLineage {
            connector_name: manifest.name.clone(),
            connector_class: factory.connector_class().to_string(),
            target_platform: factory.target_platform().to_string(),
            edges,
            flow_property_bag: factory.flow_property_bag(manifest),
        })
    }
}

/// 单次调用入口：根据清单里的 `connector.class` 分发并解析血缘。
pub fn extract_sink_lineage(
    manifest: &ConnectorManifest,
    report: &mut dyn LineageReport,
) -> LineageResult<ConnectorLineage> {
    let class = manifest
        .connector_class()
        .ok_or_else(|| LineageError::MissingConnectorClass {
            connector: manifest.name.clone(),
        })?;
    let connector = SinkConnector::from_class(class)
        .ok_or_else(|| LineageError::UnsupportedConnector(class.to_string()))?;
    connector.extract(manifest, report)
}
