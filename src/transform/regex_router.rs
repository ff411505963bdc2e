use fancy_regex::{Captures, Regex};

use crate::error::{LineageError, LineageResult};
use crate::manifest::ConnectorConfig;

use super::spec::{TransformSpec, parse_transforms};

#[derive(Debug, Clone)]
struct RenameRule {
    name: String,
    /// 缺失、为空或编译失败时为 `None`，该规则不生效
    pattern: Option<Regex>,
    replacement: String,
}

impl RenameRule {
    fn from_spec(spec: &TransformSpec) -> Self {
        let pattern = spec
            .field("regex")
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match Regex::new(raw) {
                Ok(re) => Some(re),
                Err(err) => {
                    log::warn!("Invalid regex pattern in transform {}: {}", spec.name, err);
                    None
                }
            });
        Self {
            name: spec.name.clone(),
            pattern,
            replacement: spec.field("replacement").unwrap_or_default().to_string(),
        }
    }

    /// 只替换第一个匹配；未匹配、回溯超限或替换串非法时返回 `None`。
    fn rename(&self, input: &str) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        let caps = match pattern.captures(input) {
            Ok(caps) => caps?,
            Err(err) => {
                log::warn!("Regex match failed in transform {}: {}", self.name, err);
                return None;
            }
        };
        let whole = caps.get(0)?;
        match expand_replacement(&self.name, &self.replacement, pattern, &caps) {
            Ok(expanded) => Some(format!(
                "{}{}{}",
                &input[..whole.start()],
                expanded,
                &input[whole.end()..]
            )),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        }
    }
}

/// Kafka Connect `RegexRouter` 链，按声明顺序逐个改写上一步的结果。
#[derive(Debug, Clone, Default)]
pub struct RenamePipeline {
    rules: Vec<RenameRule>,
}

impl RenamePipeline {
    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self::from_specs(&parse_transforms(config))
    }

    /// 非 `RegexRouter` 的 transform 直接忽略。
    pub fn from_specs(specs: &[TransformSpec]) -> Self {
        Self {
            rules: specs
                .iter()
                .filter(|spec| spec.is_regex_router())
                .map(RenameRule::from_spec)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn transform_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name.as_str()).collect()
    }

    pub fn apply(&self, topic: &str) -> String {
        let mut current = topic.to_string();
        for rule in &self.rules {
            if let Some(renamed) = rule.rename(&current) {
                log::debug!("Applied transform {}: {} -> {}", rule.name, topic, renamed);
                current = renamed;
            }
        }
        current
    }
}

/// 按 `java.util.regex.Matcher` 的规则展开替换串：
/// `$n` 贪婪读取数字直到超出分组数，`${name}` 引用命名分组，`\` 转义下一个字符。
/// 未参与匹配的分组展开为空。
fn expand_replacement(
    transform: &str,
    replacement: &str,
    pattern: &Regex,
    caps: &Captures<'_>,
) -> LineageResult<String> {
    let invalid = |reason: String| LineageError::InvalidReplacement {
        transform: transform.to_string(),
        reason,
    };
    let group_count = pattern.captures_len() - 1;
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| invalid("character to be escaped is missing".into()))?;
                out.push(escaped);
            }
            '$' => {
                let next = chars.next().ok_or_else(|| {
                    invalid("Illegal group reference: group index is missing".into())
                })?;
                let group = if next == '{' {
                    let mut name = String::new();
                    while let Some(&ch) = chars.peek() {
                        if !ch.is_ascii_alphanumeric() {
                            break;
                        }
                        name.push(ch);
                        chars.next();
                    }
                    if name.is_empty() {
                        return Err(invalid("named capturing group has 0 length name".into()));
                    }
                    if chars.next() != Some('}') {
                        return Err(invalid(
                            "named capturing group is missing trailing '}'".into(),
                        ));
                    }
                    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
                        return Err(invalid(format!(
                            "capturing group name {{{name}}} starts with digit character"
                        )));
                    }
                    if !pattern.capture_names().flatten().any(|n| n == name) {
                        return Err(invalid(format!("No group with name {{{name}}}")));
                    }
                    caps.name(&name)
                } else {
                    let mut index = next
                        .to_digit(10)
                        .ok_or_else(|| invalid("Illegal group reference".into()))?
                        as usize;
                    while let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) {
                        let candidate = index * 10 + digit as usize;
                        if candidate > group_count {
                            break;
                        }
                        index = candidate;
                        chars.next();
                    }
                    if index > group_count {
                        return Err(invalid(format!("No group {index}")));
                    }
                    caps.get(index)
                };
                if let Some(m) = group {
                    out.push_str(m.as_str());
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::REGEX_ROUTER_TYPE;
    use quickcheck_macros::quickcheck;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn router(name: &str, regex: &str, replacement: &str) -> TransformSpec {
        let mut spec = TransformSpec {
            name: name.into(),
            kind: REGEX_ROUTER_TYPE.into(),
            ..Default::default()
        };
        spec.fields.insert("type".into(), REGEX_ROUTER_TYPE.into());
        spec.fields.insert("regex".into(), regex.into());
        spec.fields.insert("replacement".into(), replacement.into());
        spec
    }

    fn pipeline(rules: &[(&str, &str)]) -> RenamePipeline {
        let specs = rules
            .iter()
            .enumerate()
            .map(|(i, (re, rep))| router(&format!("t{i}"), re, rep))
            .collect::<Vec<_>>();
        RenamePipeline::from_specs(&specs)
    }

    #[quickcheck]
    fn empty_pipeline_is_identity(topic: String) -> bool {
        RenamePipeline::default().apply(&topic) == topic
    }

    #[test]
    fn replaces_only_the_first_occurrence() {
        let p = pipeline(&[("a", "X")]);
        assert_eq!(p.apply("banana"), "bXnana");
    }

    #[test]
    fn search_is_unanchored() {
        let p = pipeline(&[("events", "evt")]);
        assert_eq!(p.apply("user.events.v1"), "user.evt.v1");
    }

    #[test]
    fn no_match_leaves_topic_unchanged() {
        let p = pipeline(&[("^prod_", "")]);
        assert_eq!(p.apply("dev_orders"), "dev_orders");
    }

    #[test]
    fn transforms_chain_in_declared_order() {
        let forward = pipeline(&[("a", "b"), ("b", "c")]);
        let reverse = pipeline(&[("b", "c"), ("a", "b")]);
        assert_eq!(forward.apply("a"), "c");
        assert_eq!(reverse.apply("a"), "b");

        let first = pipeline(&[("a", "b")]);
        let second = pipeline(&[("b", "c")]);
        assert_eq!(forward.apply("xa"), second.apply(&first.apply("xa")));
    }

    #[test]
    fn numbered_and_named_group_references() {
        let p = pipeline(&[(r"(?<env>\w+)\.(.*)", "${env}_$2")]);
        assert_eq!(p.apply("prod.orders"), "prod_orders");

        let p = pipeline(&[("(.*)", "prefix_$1")]);
        assert_eq!(p.apply("orders"), "prefix_orders");
    }

    #[test]
    fn multi_digit_reference_stops_at_group_count() {
        // 只有一个分组时 `$10` 等价于 `$1` 后跟字面量 `0`
        let p = pipeline(&[("(o)rders", "$10")]);
        assert_eq!(p.apply("orders"), "o0");
    }

    #[test]
    fn backslash_escapes_dollar() {
        let p = pipeline(&[("cost", r"\$cost")]);
        assert_eq!(p.apply("cost"), "$cost");
    }

    #[test]
    fn unmatched_optional_group_expands_to_nothing() {
        let p = pipeline(&[("(x)?orders", "[$1]")]);
        assert_eq!(p.apply("orders"), "[]");
    }

    #[test]
    fn missing_replacement_deletes_match() {
        let mut spec = router("strip", "^dbserver1\\.", "");
        spec.fields.remove("replacement");
        let p = RenamePipeline::from_specs(&[spec]);
        assert_eq!(p.apply("dbserver1.inventory"), "inventory");
    }

    #[test]
    fn invalid_regex_is_skipped_and_rest_still_apply() {
        init_logger();
        let p = pipeline(&[("(unclosed", "x"), ("orders", "sales")]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.apply("orders"), "sales");
    }

    #[test]
    fn invalid_group_reference_is_skipped() {
        init_logger();
        let p = pipeline(&[("(a)", "$2"), ("a", "b")]);
        assert_eq!(p.apply("a"), "b");
        let p = pipeline(&[("a", "${missing}")]);
        assert_eq!(p.apply("a"), "a");
        let p = pipeline(&[("a", "trailing\\")]);
        assert_eq!(p.apply("a"), "a");
        let p = pipeline(&[("a", "$x")]);
        assert_eq!(p.apply("a"), "a");
    }

    #[test]
    fn lookahead_rename_skips_excluded_prefix() {
        let p = pipeline(&[(r"^(?!internal\.)(.*)", "ext_$1")]);
        assert_eq!(p.apply("orders"), "ext_orders");
        assert_eq!(p.apply("internal.audit"), "internal.audit");
    }

    #[test]
    fn lookbehind_and_backreference_patterns_apply() {
        let p = pipeline(&[(r"(?<=cdc\.)v\d+\.", "")]);
        assert_eq!(p.apply("cdc.v2.orders"), "cdc.orders");

        let p = pipeline(&[(r"^(\w+)\.\1$", "$1")]);
        assert_eq!(p.apply("orders.orders"), "orders");
        assert_eq!(p.apply("orders.items"), "orders.items");
    }

    #[test]
    fn empty_regex_is_inactive() {
        let p = pipeline(&[("", "x")]);
        assert_eq!(p.apply("orders"), "orders");
    }

    #[test]
    fn only_regex_router_transforms_are_kept() {
        let mut config = ConnectorConfig::new();
        config.insert("transforms".into(), "route,cast".into());
        config.insert("transforms.route.type".into(), REGEX_ROUTER_TYPE.into());
        config.insert("transforms.route.regex".into(), "(.*)".into());
        config.insert("transforms.route.replacement".into(), "$1_sink".into());
        config.insert(
            "transforms.cast.type".into(),
            "org.apache.kafka.connect.transforms.Cast$Value".into(),
        );
        config.insert("transforms.cast.regex".into(), "orders".into());
        let p = RenamePipeline::from_config(&config);
        assert_eq!(p.transform_names(), vec!["route"]);
        assert_eq!(p.apply("orders"), "orders_sink");
    }
}
