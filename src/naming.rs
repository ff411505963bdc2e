/// 目标仓库的表名规范化：非 `[A-Za-z0-9_]` 字符替换为 `_`，首字符不是字母或下划线时补 `_` 前缀。
///
/// 不处理两个 topic 规范化后同名的冲突。
pub fn sanitize_table_name(name: &str) -> String {
    let table = name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();
    match table.chars().next() {
        Some(first) if !(first.is_ascii_alphabetic() || first == '_') => format!("_{table}"),
        _ => table,
    }
}
