use thiserror::Error;

/// 血缘解析错误。返回 `Err` 即表示整个连接器的本轮解析失败。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineageError {
    #[error("could not find '{key}' in connector configuration")]
    MissingConfig { key: String },

    #[error("malformed entry '{entry}' in '{key}': expected '{separator}' separator")]
    MalformedEntry {
        key: String,
        entry: String,
        separator: char,
    },

    #[error("invalid pattern '{pattern}' in '{key}': {reason}")]
    InvalidPattern {
        key: String,
        pattern: String,
        reason: String,
    },

    #[error("invalid replacement in transform '{transform}': {reason}")]
    InvalidReplacement { transform: String, reason: String },

    #[error("connector '{connector}' has no 'connector.class'")]
    MissingConnectorClass { connector: String },

    #[error("unsupported sink connector class '{0}'")]
    UnsupportedConnector(String),
}

impl LineageError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    pub fn malformed(key: impl Into<String>, entry: impl Into<String>, separator: char) -> Self {
        Self::MalformedEntry {
            key: key.into(),
            entry: entry.into(),
            separator,
        }
    }
}

pub type LineageResult<T> = Result<T, LineageError>;
