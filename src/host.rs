//! Hostname pattern matching.
//!
//! A pattern starting with `*` matches every host ending with the remainder of the pattern,
//! so `*.example.com` matches `svc.example.com` and `*` matches everything. Two wildcard
//! patterns match when the longer one is covered by the shorter one.

/// Whether `host` and `pattern` can select the same hostname.
pub fn matches(host: &str, pattern: &str) -> bool {
    match (host.strip_prefix('*'), pattern.strip_prefix('*')) {
        (Some(host_suffix), Some(pattern_suffix)) => {
            if host_suffix.len() < pattern_suffix.len() {
                pattern_suffix.ends_with(host_suffix)
            } else {
                host_suffix.ends_with(pattern_suffix)
            }
        }
        (Some(suffix), None) => pattern.ends_with(suffix),
        (None, Some(suffix)) => host.ends_with(suffix),
        (None, None) => host == pattern,
    }
}

/// Whether `host` matches any of `patterns`.
pub fn matches_any(host: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| matches(host, pattern))
}
