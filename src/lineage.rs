use serde::Serialize;

use crate::manifest::ConnectorConfig;

/// 所有 sink 连接器的上游平台
pub const KAFKA: &str = "kafka";

/// 一条 topic -> 目标对象 的血缘边。`source_dataset` 始终是改名前的原始 topic。
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct LineageEdge {
    pub source_dataset: String,
    pub source_platform: String,
    pub target_dataset: String,
    pub target_platform: String,
}

impl LineageEdge {
    pub fn from_kafka(
        topic: impl Into<String>,
        target_dataset: impl Into<String>,
        target_platform: impl Into<String>,
    ) -> Self {
        Self {
            source_dataset: topic.into(),
            source_platform: KAFKA.to_string(),
            target_dataset: target_dataset.into(),
            target_platform: target_platform.into(),
        }
    }
}

/// 非致命告警：连接器名、可选的 topic、原因。
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct LineageWarning {
    pub connector: String,
    pub topic: Option<String>,
    pub reason: String,
}

impl LineageWarning {
    pub fn connector(connector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            connector: connector.into(),
            topic: None,
            reason: reason.into(),
        }
    }

    pub fn topic(
        connector: impl Into<String>,
        topic: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            connector: connector.into(),
            topic: Some(topic.into()),
            reason: reason.into(),
        }
    }
}

/// 告警出口。解析过程不会因告警中断。
pub trait LineageReport {
    fn warning(&mut self, warning: LineageWarning);
}

/// 仅写日志的告警出口
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReport;

impl LineageReport for LogReport {
    fn warning(&mut self, warning: LineageWarning) {
        match &warning.topic {
            Some(topic) => log::warn!(
                "lineage warning, connector: {}, topic: {}, reason: {}",
                warning.connector,
                topic,
                warning.reason
            ),
            None => log::warn!(
                "lineage warning, connector: {}, reason: {}",
                warning.connector,
                warning.reason
            ),
        }
    }
}

/// 收集告警，供调用方检查或序列化后上报
#[derive(Debug, Default, Clone, Serialize)]
pub struct CollectedReport {
    pub warnings: Vec<LineageWarning>,
}

impl CollectedReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl LineageReport for CollectedReport {
    fn warning(&mut self, warning: LineageWarning) {
        log::debug!("collect lineage warning: {warning:?}");
        self.warnings.push(warning);
    }
}

/// 单个连接器一次解析的完整产出
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct ConnectorLineage {
    pub connector_name: String,
    pub connector_class: String,
    pub target_platform: String,
    pub edges: Vec<LineageEdge>,
    pub flow_property_bag: ConnectorConfig,
}
