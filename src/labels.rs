use std::collections::BTreeMap;

/// selectorを`key1=value1,key2=value2`形式の文字列に変換する
///
/// Keys are emitted in ascending order, so equal maps always give equal strings. An empty
/// selector gives the empty string, which matches every workload.
pub fn normalize(selector: &BTreeMap<String, String>) -> String {
    selector
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Textual overlap between two normalized selectors: one contains the other.
pub fn overlaps(lhs: &str, rhs: &str) -> bool {
    lhs.contains(rhs) || rhs.contains(lhs)
}
