//! 连接器清单：Kafka Connect REST 接口返回的 `name/config/type` 加上已消费的 topic 列表。
//!
//! 清单本身由外部采集，这里只负责反序列化和按 key 取值。

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{LineageError, LineageResult};

/// 扁平的连接器配置，嵌套配置以点分 key 表示（如 `transforms.route.regex`）。
pub type ConnectorConfig = BTreeMap<String, String>;

pub const CONNECTOR_CLASS_KEY: &str = "connector.class";

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Default)]
pub struct ConnectorManifest {
    pub name: String,
    /// `sink` / `source`，REST 接口中的 `type` 字段
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub config: ConnectorConfig,
    #[serde(default, alias = "topics")]
    pub topic_names: Vec<String>,
}

impl ConnectorManifest {
    pub fn new(
        name: impl Into<String>,
        config: ConnectorConfig,
        topic_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: "sink".to_string(),
            config,
            topic_names: topic_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn connector_class(&self) -> Option<&str> {
        self.config.get(CONNECTOR_CLASS_KEY).map(String::as_str)
    }

    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("parse connector manifest from json")
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("parse connector manifest from toml")
    }

    /// 按扩展名选择格式：`.toml` 走 toml，其余按 json 解析。
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read connector manifest {}", path.display()))?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let manifest = if is_toml {
            Self::from_toml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        };
        manifest.with_context(|| format!("load connector manifest {}", path.display()))
    }
}

/// 必填项：缺失即报错，空字符串视为有效值。
pub(crate) fn required<'a>(config: &'a ConnectorConfig, key: &str) -> LineageResult<&'a str> {
    config
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| LineageError::missing(key))
}

/// 可选项：缺失或空字符串都返回 `None`。
pub(crate) fn non_empty<'a>(config: &'a ConnectorConfig, key: &str) -> Option<&'a str> {
    config
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// 去掉敏感 key 后的配置副本，供下游展示。
pub fn strip_sensitive(config: &ConnectorConfig, deny_list: &[&str]) -> ConnectorConfig {
    config
        .iter()
        .filter(|(key, _)| !deny_list.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
