use std::collections::BTreeMap;

use educe::Educe;

use crate::transform::RenamePipeline;

pub const SNOWFLAKE_PLATFORM: &str = "snowflake";

pub const DATABASE_KEY: &str = "snowflake.database.name";
pub const SCHEMA_KEY: &str = "snowflake.schema.name";
pub const TOPIC2TABLE_KEY: &str = "snowflake.topic2table.map";

#[derive(Educe, Clone)]
#[educe(Debug, Default)]
pub struct SnowflakeSinkConf {
    #[educe(Default(expression = SNOWFLAKE_PLATFORM))]
    pub target_platform: &'static str,
    pub database_name: String,
    pub schema_name: String,
    /// 用户显式指定的 topic -> table，key 为原始 topic 名
    pub topics_to_tables: BTreeMap<String, String>,
    pub rename: RenamePipeline,
}
