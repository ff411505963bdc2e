use crate::connector::SinkLineageFactory;
use crate::error::{LineageError, LineageResult};
use crate::lineage::{LineageEdge, LineageReport, LineageWarning};
use crate::manifest::{ConnectorManifest, non_empty};
use crate::transform::RenamePipeline;

use super::config::{S3_BUCKET_KEY, S3_PLATFORM, S3SinkConf, TOPICS_DIR_KEY};
use super::resolver::resolve_s3_lineages;

pub const S3_SINK_CONNECTOR_CLASS: &str = "io.confluent.connect.s3.S3SinkConnector";

pub const S3_SENSITIVE_KEYS: &[&str] = &[
    "aws.access.key.id",
    "aws.secret.access.key",
    "s3.sse.customer.key",
    "s3.proxy.password",
];

pub(crate) fn build_s3_conf_from_manifest(
    manifest: &ConnectorManifest,
) -> LineageResult<S3SinkConf> {
    let config = &manifest.config;
    let bucket =
        non_empty(config, S3_BUCKET_KEY).ok_or_else(|| LineageError::missing(S3_BUCKET_KEY))?;
    let mut conf = S3SinkConf::new(bucket);
    if let Some(dir) = config.get(TOPICS_DIR_KEY) {
        conf.topics_dir = dir.clone();
    }
    conf.rename = RenamePipeline::from_config(config);
    Ok(conf)
}

pub struct S3SinkLineage;

impl SinkLineageFactory for S3SinkLineage {
    fn connector_class(&self) -> &'static str {
        S3_SINK_CONNECTOR_CLASS
    }

    fn target_platform(&self) -> &'static str {
        S3_PLATFORM
    }

    fn sensitive_keys(&self) -> &'static [&'static str] {
        S3_SENSITIVE_KEYS
    }

    /// 任何错误都降级为连接器级告警，返回空结果。
    fn extract_lineages(
        &self,
        manifest: &ConnectorManifest,
        report: &mut dyn LineageReport,
    ) -> LineageResult<Vec<LineageEdge>> {
        match build_s3_conf_from_manifest(manifest) {
            Ok(conf) => Ok(resolve_s3_lineages(&conf, &manifest.topic_names)),
            Err(err) => {
                report.warning(LineageWarning::connector(
                    manifest.name.as_str(),
                    format!("Error resolving lineage for connector: {err}"),
                ));
                Ok(Vec::new())
            }
        }
    }
}
