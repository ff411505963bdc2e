//! Topic 改名管道：从连接器配置解析 `transforms` 链，只有 `RegexRouter` 会改写 topic 名。
//!
//! 模块划分：
//! - spec：`transforms.<name>.<field>` 的通用解析
//! - regex_router：`RegexRouter` 的 find + replaceFirst 语义

mod regex_router;
mod spec;

pub use regex_router::RenamePipeline;
pub use spec::{REGEX_ROUTER_TYPE, TRANSFORMS_KEY, TransformSpec, parse_transforms};
