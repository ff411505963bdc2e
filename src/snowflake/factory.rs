use std::collections::BTreeMap;

use crate::connector::SinkLineageFactory;
use crate::error::{LineageError, LineageResult};
use crate::lineage::{LineageEdge, LineageReport};
use crate::manifest::{ConnectorManifest, non_empty, required};
use crate::transform::RenamePipeline;

use super::config::{
    DATABASE_KEY, SCHEMA_KEY, SNOWFLAKE_PLATFORM, SnowflakeSinkConf, TOPIC2TABLE_KEY,
};
use super::resolver::resolve_snowflake_lineages;

pub const SNOWFLAKE_SINK_CONNECTOR_CLASS: &str =
    "com.snowflake.kafka.connector.SnowflakeSinkConnector";

pub const SNOWFLAKE_SENSITIVE_KEYS: &[&str] = &[
    "snowflake.private.key",
    "snowflake.private.key.passphrase",
    "value.converter.basic.auth.user.info",
];

pub(crate) fn build_snowflake_conf_from_manifest(
    manifest: &ConnectorManifest,
) -> LineageResult<SnowflakeSinkConf> {
    let config = &manifest.config;
    let database_name = required(config, DATABASE_KEY)?.to_string();
    let schema_name = required(config, SCHEMA_KEY)?.to_string();
    let topics_to_tables = match non_empty(config, TOPIC2TABLE_KEY) {
        Some(raw) => parse_topic2table(raw)?,
        None => BTreeMap::new(),
    };
    Ok(SnowflakeSinkConf {
        database_name,
        schema_name,
        topics_to_tables,
        rename: RenamePipeline::from_config(config),
        ..Default::default()
    })
}

/// `topic:table[,topic:table...]`，每项必须恰好被 `:` 分成两段。
fn parse_topic2table(raw: &str) -> LineageResult<BTreeMap<String, String>> {
    let mut mapping = BTreeMap::new();
    for entry in raw.split(',') {
        let mut parts = entry.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(topic), Some(table), None) => {
                mapping.insert(topic.trim().to_string(), table.trim().to_string());
            }
            _ => return Err(LineageError::malformed(TOPIC2TABLE_KEY, entry, ':')),
        }
    }
    Ok(mapping)
}

pub struct SnowflakeSinkLineage;

impl SinkLineageFactory for SnowflakeSinkLineage {
    fn connector_class(&self) -> &'static str {
        SNOWFLAKE_SINK_CONNECTOR_CLASS
    }

    fn target_platform(&self) -> &'static str {
        SNOWFLAKE_PLATFORM
    }

    fn sensitive_keys(&self) -> &'static [&'static str] {
        SNOWFLAKE_SENSITIVE_KEYS
    }

    fn extract_lineages(
        &self,
        manifest: &ConnectorManifest,
        _report: &mut dyn LineageReport,
    ) -> LineageResult<Vec<LineageEdge>> {
        let conf = build_snowflake_conf_from_manifest(manifest)?;
        Ok(resolve_snowflake_lineages(&conf, &manifest.topic_names))
    }
}
