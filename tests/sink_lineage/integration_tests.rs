//! End-to-end lineage extraction from Kafka Connect REST style manifests.

use anyhow::Context;
use wp_sink_lineage::{
    CollectedReport, ConnectorManifest, LineageError, LogReport, extract_sink_lineage,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn manifest(raw: &str) -> anyhow::Result<ConnectorManifest> {
    ConnectorManifest::from_json_str(raw).context("test manifest")
}

#[test]
fn s3_sink_with_regex_router_chain() -> anyhow::Result<()> {
    init_logger();
    let manifest = manifest(
        r#"{
        "name": "s3-archive",
        "type": "sink",
        "config": {
            "connector.class": "io.confluent.connect.s3.S3SinkConnector",
            "s3.bucket.name": "archive",
            "topics.dir": "raw",
            "aws.access.key.id": "AKIA",
            "aws.secret.access.key": "secret",
            "transforms": "dropPrefix,suffix",
            "transforms.dropPrefix.type": "org.apache.kafka.connect.transforms.RegexRouter",
            "transforms.dropPrefix.regex": "^dbserver1\\.inventory\\.(.*)",
            "transforms.dropPrefix.replacement": "$1",
            "transforms.suffix.type": "org.apache.kafka.connect.transforms.RegexRouter",
            "transforms.suffix.regex": "(.*)",
            "transforms.suffix.replacement": "$1_v1"
        },
        "topics": ["dbserver1.inventory.customers", "audit"]
    }"#,
    )?;
    let mut report = CollectedReport::new();
    let lineage = extract_sink_lineage(&manifest, &mut report)?;

    assert_eq!(lineage.target_platform, "s3");
    let pairs = lineage
        .edges
        .iter()
        .map(|e| (e.source_dataset.as_str(), e.target_dataset.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        vec![
            ("dbserver1.inventory.customers", "archive/raw/customers_v1"),
            ("audit", "archive/raw/audit_v1"),
        ]
    );
    assert!(!lineage.flow_property_bag.contains_key("aws.access.key.id"));
    assert!(!lineage.flow_property_bag.contains_key("aws.secret.access.key"));
    assert!(lineage.flow_property_bag.contains_key("transforms"));
    assert!(report.is_empty());
    Ok(())
}

#[test]
fn s3_sink_without_bucket_degrades_to_warning() -> anyhow::Result<()> {
    let manifest = manifest(
        r#"{
        "name": "s3-broken",
        "config": {"connector.class": "io.confluent.connect.s3.S3SinkConnector"},
        "topics": ["orders"]
    }"#,
    )?;
    let mut report = CollectedReport::new();
    let lineage = extract_sink_lineage(&manifest, &mut report)?;
    assert!(lineage.edges.is_empty());
    assert_eq!(report.warnings.len(), 1);
    Ok(())
}

#[test]
fn snowflake_sink_from_toml_manifest() -> anyhow::Result<()> {
    let manifest = ConnectorManifest::from_toml_str(
        r#"
name = "snowflake-events"
topic_names = ["user.events", "raw", "9abc"]

[config]
"connector.class" = "com.snowflake.kafka.connector.SnowflakeSinkConnector"
"snowflake.database.name" = "ANALYTICS"
"snowflake.schema.name" = "KAFKA"
"snowflake.topic2table.map" = "raw:RAW_TBL"
"snowflake.private.key" = "MIIE..."
"#,
    )?;
    let lineage = extract_sink_lineage(&manifest, &mut LogReport)?;
    let targets = lineage
        .edges
        .iter()
        .map(|e| e.target_dataset.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        targets,
        vec![
            "ANALYTICS.KAFKA.user_events",
            "ANALYTICS.KAFKA.RAW_TBL",
            "ANALYTICS.KAFKA._9abc"
        ]
    );
    assert!(!lineage.flow_property_bag.contains_key("snowflake.private.key"));
    Ok(())
}

#[test]
fn snowflake_malformed_topic2table_fails_connector() -> anyhow::Result<()> {
    let manifest = manifest(
        r#"{
        "name": "snowflake-bad",
        "config": {
            "connector.class": "com.snowflake.kafka.connector.SnowflakeSinkConnector",
            "snowflake.database.name": "DB",
            "snowflake.schema.name": "S",
            "snowflake.topic2table.map": "raw"
        },
        "topics": ["raw"]
    }"#,
    )?;
    let err = extract_sink_lineage(&manifest, &mut LogReport).expect_err("malformed map");
    assert!(matches!(err, LineageError::MalformedEntry { separator: ':', .. }));
    Ok(())
}

#[test]
fn bigquery_v1_sink_reports_unroutable_topics() -> anyhow::Result<()> {
    init_logger();
    let manifest = manifest(
        r#"{
        "name": "bq-legacy",
        "config": {
            "connector.class": "com.wepay.kafka.connect.bigquery.BigQuerySinkConnector",
            "project": "project",
            "datasets": "^evt_.*=analytics",
            "keyfile": "{}"
        },
        "topics": ["evt_click", "other"]
    }"#,
    )?;
    let mut report = CollectedReport::new();
    let lineage = extract_sink_lineage(&manifest, &mut report)?;
    assert_eq!(lineage.edges.len(), 1);
    assert_eq!(lineage.edges[0].source_dataset, "evt_click");
    assert_eq!(lineage.edges[0].target_dataset, "project.analytics.evt_click");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].topic.as_deref(), Some("other"));
    assert!(!lineage.flow_property_bag.contains_key("keyfile"));
    Ok(())
}

#[test]
fn bigquery_v2_sink_uses_default_dataset() -> anyhow::Result<()> {
    let manifest = manifest(
        r#"{
        "name": "bq",
        "config": {
            "connector.class": "com.wepay.kafka.connect.bigquery.BigQuerySinkConnector",
            "project": "project",
            "defaultDataset": "d",
            "sanitizeTopics": "true"
        },
        "topics": ["ds1:tbl1", "plain.topic"]
    }"#,
    )?;
    let lineage = extract_sink_lineage(&manifest, &mut LogReport)?;
    let targets = lineage
        .edges
        .iter()
        .map(|e| e.target_dataset.as_str())
        .collect::<Vec<_>>();
    assert_eq!(targets, vec!["project.ds1.tbl1", "project.d.plain_topic"]);
    Ok(())
}

#[test]
fn lineage_serializes_for_downstream_emitters() -> anyhow::Result<()> {
    let manifest = manifest(
        r#"{
        "name": "s3",
        "config": {
            "connector.class": "io.confluent.connect.s3.S3SinkConnector",
            "s3.bucket.name": "b",
            "topics.dir": "t"
        },
        "topics": ["orders"]
    }"#,
    )?;
    let lineage = extract_sink_lineage(&manifest, &mut LogReport)?;
    let json = serde_json::to_value(&lineage)?;
    assert_eq!(json["edges"][0]["target_dataset"], "b/t/orders");
    assert_eq!(json["edges"][0]["source_platform"], "kafka");
    assert_eq!(json["connector_class"], "io.confluent.connect.s3.S3SinkConnector");
    Ok(())
}
