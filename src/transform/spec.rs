use std::collections::BTreeMap;

use serde::Serialize;

use crate::manifest::ConnectorConfig;

pub const TRANSFORMS_KEY: &str = "transforms";
pub const REGEX_ROUTER_TYPE: &str = "org.apache.kafka.connect.transforms.RegexRouter";

/// 单个 transform 的配置，`fields` 为去掉 `transforms.<name>.` 前缀后的键值。
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
pub struct TransformSpec {
    pub name: String,
    /// `type` 字段，缺失时为空串
    pub kind: String,
    pub fields: BTreeMap<String, String>,
}

impl TransformSpec {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_regex_router(&self) -> bool {
        self.kind == REGEX_ROUTER_TYPE
    }
}

/// 按 `transforms` 声明的顺序解析全部 transform，不按类型过滤。
pub fn parse_transforms(config: &ConnectorConfig) -> Vec<TransformSpec> {
    let Some(names) = config.get(TRANSFORMS_KEY) else {
        return Vec::new();
    };
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| collect_transform(config, name))
        .collect()
}

fn collect_transform(config: &ConnectorConfig, name: &str) -> TransformSpec {
    let prefix = format!("{TRANSFORMS_KEY}.{name}.");
    let fields = config
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(prefix.as_str())
                .map(|field| (field.to_string(), value.clone()))
        })
        .collect::<BTreeMap<_, _>>();
    TransformSpec {
        name: name.to_string(),
        kind: fields.get("type").cloned().unwrap_or_default(),
        fields,
    }
}
