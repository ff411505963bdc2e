//! Confluent S3 Sink：topic 落在 `bucket/topics.dir/<topic>` 下。
//!
//! 模块划分：
//! - config：S3SinkConf
//! - factory：配置解析与 SinkLineageFactory 实现
//! - resolver：逐 topic 计算对象路径

mod config;
mod factory;
mod resolver;

pub use config::{S3_PLATFORM, S3SinkConf};
pub use factory::{S3_SENSITIVE_KEYS, S3_SINK_CONNECTOR_CLASS, S3SinkLineage};
