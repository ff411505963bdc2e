use crate::lineage::LineageEdge;

use super::config::S3SinkConf;

/// 每个 topic 都能得到目标路径，不存在跳过的情况。
pub(crate) fn resolve_s3_lineages(conf: &S3SinkConf, topics: &[String]) -> Vec<LineageEdge> {
    topics
        .iter()
        .map(|topic| {
            let renamed = conf.rename.apply(topic);
            LineageEdge::from_kafka(
                topic.as_str(),
                format!("{}/{}/{}", conf.bucket, conf.topics_dir, renamed),
                conf.target_platform,
            )
        })
        .collect()
}
