use crate::lineage::LineageEdge;
use crate::naming::sanitize_table_name;

use super::config::SnowflakeSinkConf;

/// 显式映射优先且原样使用；否则先改名再做表名规范化。
pub(crate) fn table_for_topic(conf: &SnowflakeSinkConf, topic: &str) -> String {
    match conf.topics_to_tables.get(topic) {
        Some(table) => table.clone(),
        None => sanitize_table_name(&conf.rename.apply(topic)),
    }
}

pub(crate) fn resolve_snowflake_lineages(
    conf: &SnowflakeSinkConf,
    topics: &[String],
) -> Vec<LineageEdge> {
    topics
        .iter()
        .map(|topic| {
            let table = table_for_topic(conf, topic);
            LineageEdge::from_kafka(
                topic.as_str(),
                format!("{}.{}.{}", conf.database_name, conf.schema_name, table),
                conf.target_platform,
            )
        })
        .collect()
}
