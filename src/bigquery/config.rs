use educe::Educe;
use fancy_regex::Regex;
use serde::Serialize;

use crate::error::{LineageError, LineageResult};
use crate::transform::{RenamePipeline, TransformSpec};

pub const BIGQUERY_PLATFORM: &str = "bigquery";

pub const PROJECT_KEY: &str = "project";
pub const SANITIZE_TOPICS_KEY: &str = "sanitizeTopics";
pub const DEFAULT_DATASET_KEY: &str = "defaultDataset";
pub const DATASETS_KEY: &str = "datasets";
pub const TOPICS_TO_TABLES_KEY: &str = "topicsToTables";

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum BigQueryConfigVersion {
    V1,
    V2,
}

/// `pattern=target` 规则，要求整个 topic 与 pattern 完全匹配。
#[derive(Debug, Clone)]
pub struct TopicPatternRule {
    pub pattern: String,
    pub target: String,
    full_match: Regex,
}

impl TopicPatternRule {
    pub fn new(key: &str, pattern: &str, target: &str) -> LineageResult<Self> {
        let invalid = |err: fancy_regex::Error| LineageError::InvalidPattern {
            key: key.to_string(),
            pattern: pattern.to_string(),
            reason: err.to_string(),
        };
        // 先单独编译，避免 `a)(b` 这类输入在包裹之后意外合法
        Regex::new(pattern).map_err(invalid)?;
        // `(?x)` 模式可能以 `#` 注释结尾，换行符结束注释后再闭合分组
        let full_match = Regex::new(&format!(r"\A(?:{pattern})\z"))
            .or_else(|_| Regex::new(&format!("\\A(?:{pattern}\n)\\z")))
            .map_err(invalid)?;
        Ok(Self {
            pattern: pattern.to_string(),
            target: target.to_string(),
            full_match,
        })
    }

    /// 回溯超限按未匹配处理。
    pub fn matches(&self, topic: &str) -> bool {
        match self.full_match.is_match(topic) {
            Ok(matched) => matched,
            Err(err) => {
                log::warn!("Pattern {} failed on topic {}: {}", self.pattern, topic, err);
                false
            }
        }
    }
}

/// 解析 `pattern=target[,pattern=target...]`，按最后一个 `=` 切分。
/// 重复的 pattern 保留首次出现的位置，目标取最后一次的值。
pub(crate) fn parse_pattern_rules(key: &str, raw: &str) -> LineageResult<Vec<TopicPatternRule>> {
    let mut rules: Vec<TopicPatternRule> = Vec::new();
    for entry in raw.split(',') {
        let (pattern, target) = entry
            .rsplit_once('=')
            .ok_or_else(|| LineageError::malformed(key, entry, '='))?;
        let (pattern, target) = (pattern.trim(), target.trim());
        match rules.iter_mut().find(|rule| rule.pattern == pattern) {
            Some(existing) => existing.target = target.to_string(),
            None => rules.push(TopicPatternRule::new(key, pattern, target)?),
        }
    }
    Ok(rules)
}

#[derive(Educe, Clone)]
#[educe(Debug, Default)]
pub enum DatasetRouting {
    #[educe(Default)]
    V1 {
        datasets: Vec<TopicPatternRule>,
        topics_to_tables: Vec<TopicPatternRule>,
    },
    V2 {
        default_dataset: String,
    },
}

#[derive(Educe, Clone)]
#[educe(Debug, Default)]
pub struct BigQuerySinkConf {
    #[educe(Default(expression = BIGQUERY_PLATFORM))]
    pub target_platform: &'static str,
    pub project: String,
    pub sanitize_topics: bool,
    /// `transforms` 中声明的全部 transform，仅作记录，不参与改名
    pub transforms: Vec<TransformSpec>,
    pub rename: RenamePipeline,
    pub routing: DatasetRouting,
}

impl BigQuerySinkConf {
    pub fn version(&self) -> BigQueryConfigVersion {
        match self.routing {
            DatasetRouting::V1 { .. } => BigQueryConfigVersion::V1,
            DatasetRouting::V2 { .. } => BigQueryConfigVersion::V2,
        }
    }
}
