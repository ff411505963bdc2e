//! Snowflake Sink：每个 topic 对应 `database.schema` 下的一张表。
//!
//! 模块划分：
//! - config：SnowflakeSinkConf
//! - factory：配置解析（含 topic2table 映射）与 SinkLineageFactory 实现
//! - resolver：表名推导与血缘计算

mod config;
mod factory;
mod resolver;

pub use config::{SNOWFLAKE_PLATFORM, SnowflakeSinkConf};
pub use factory::{SNOWFLAKE_SENSITIVE_KEYS, SNOWFLAKE_SINK_CONNECTOR_CLASS, SnowflakeSinkLineage};
