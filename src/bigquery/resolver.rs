use crate::lineage::{LineageEdge, LineageReport, LineageWarning};
use crate::manifest::ConnectorManifest;
use crate::naming::sanitize_table_name;

use super::config::{BigQuerySinkConf, DatasetRouting};

/// 对改名后的 topic 求 (dataset, table)；v1 中没有命中任何 dataset 规则时返回 `None`。
pub(crate) fn dataset_table_for_topic(
    conf: &BigQuerySinkConf,
    topic: &str,
) -> Option<(String, String)> {
    let (dataset, table) = match &conf.routing {
        DatasetRouting::V2 { default_dataset } => {
            let parts = topic.split(':').collect::<Vec<_>>();
            if let [dataset, table] = parts.as_slice() {
                (*dataset, *table)
            } else {
                (default_dataset.as_str(), parts[0])
            }
        }
        DatasetRouting::V1 {
            datasets,
            topics_to_tables,
        } => {
            let dataset = datasets.iter().find(|rule| rule.matches(topic))?;
            let table = topics_to_tables
                .iter()
                .find(|rule| rule.matches(topic))
                .map_or(topic, |rule| rule.target.as_str());
            (dataset.target.as_str(), table)
        }
    };
    let table = if conf.sanitize_topics {
        sanitize_table_name(table)
    } else {
        table.to_string()
    };
    Some((dataset.to_string(), table))
}

/// 找不到 dataset 的 topic 上报告警并跳过，不影响其余 topic。
pub(crate) fn resolve_bigquery_lineages(
    conf: &BigQuerySinkConf,
    manifest: &ConnectorManifest,
    report: &mut dyn LineageReport,
) -> Vec<LineageEdge> {
    let mut edges = Vec::with_capacity(manifest.topic_names.len());
    for topic in &manifest.topic_names {
        let renamed = conf.rename.apply(topic);
        let Some((dataset, table)) = dataset_table_for_topic(conf, &renamed) else {
            report.warning(LineageWarning::topic(
                manifest.name.as_str(),
                topic.as_str(),
                format!(
                    "Could not find target dataset for topic '{renamed}', please check your connector configuration"
                ),
            ));
            continue;
        };
        edges.push(LineageEdge::from_kafka(
            topic.as_str(),
            format!("{}.{}.{}", conf.project, dataset, table),
            conf.target_platform,
        ));
    }
    edges
}
