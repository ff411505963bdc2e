use crate::connector::SinkLineageFactory;
use crate::error::LineageResult;
use crate::lineage::{LineageEdge, LineageReport};
use crate::manifest::{ConnectorManifest, non_empty, required};
use crate::transform::{RenamePipeline, parse_transforms};

use super::config::{
    BIGQUERY_PLATFORM, BigQuerySinkConf, DATASETS_KEY, DEFAULT_DATASET_KEY, DatasetRouting,
    PROJECT_KEY, SANITIZE_TOPICS_KEY, TOPICS_TO_TABLES_KEY, parse_pattern_rules,
};
use super::resolver::resolve_bigquery_lineages;

pub const BIGQUERY_SINK_CONNECTOR_CLASS: &str =
    "com.wepay.kafka.connect.bigquery.BigQuerySinkConnector";

pub const BIGQUERY_SENSITIVE_KEYS: &[&str] = &["keyfile"];

pub(crate) fn build_bigquery_conf_from_manifest(
    manifest: &ConnectorManifest,
) -> LineageResult<BigQuerySinkConf> {
    let config = &manifest.config;
    let project = required(config, PROJECT_KEY)?.to_string();
    let sanitize_topics = non_empty(config, SANITIZE_TOPICS_KEY)
        .is_some_and(|raw| raw.eq_ignore_ascii_case("true"));
    let transforms = parse_transforms(config);
    let rename = RenamePipeline::from_specs(&transforms);

    // 存在 defaultDataset 即为 v2，否则按 1.6.x 之前的 v1 配置解析
    let routing = match config.get(DEFAULT_DATASET_KEY) {
        Some(default_dataset) => DatasetRouting::V2 {
            default_dataset: default_dataset.clone(),
        },
        None => DatasetRouting::V1 {
            datasets: parse_pattern_rules(DATASETS_KEY, required(config, DATASETS_KEY)?)?,
            topics_to_tables: match non_empty(config, TOPICS_TO_TABLES_KEY) {
                Some(raw) => parse_pattern_rules(TOPICS_TO_TABLES_KEY, raw)?,
                None => Vec::new(),
            },
        },
    };

    Ok(BigQuerySinkConf {
        project,
        sanitize_topics,
        transforms,
        rename,
        routing,
        ..Default::default()
    })
}

pub struct BigQuerySinkLineage;

impl SinkLineageFactory for BigQuerySinkLineage {
    fn connector_class(&self) -> &'static str {
        BIGQUERY_SINK_CONNECTOR_CLASS
    }

    fn target_platform(&self) -> &'static str {
        BIGQUERY_PLATFORM
    }

    fn sensitive_keys(&self) -> &'static [&'static str] {
        BIGQUERY_SENSITIVE_KEYS
    }

    fn extract_lineages(
        &self,
        manifest: &ConnectorManifest,
        report: &mut dyn LineageReport,
    ) -> LineageResult<Vec<LineageEdge>> {
        let conf = build_bigquery_conf_from_manifest(manifest)?;
        log::debug!(
            "bigquery connector {} uses {:?} config with {} transforms",
            manifest.name,
            conf.version(),
            conf.transforms.len()
        );
        Ok(resolve_bigquery_lineages(&conf, manifest, report))
    }
}
