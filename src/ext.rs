use regex::Regex;
use std::sync::LazyLock;

static SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([^.]+)$").expect("static regex compile"));

/// Lowercased text after the last `.` of `file_name`, or an empty string when there is
/// no dot or nothing follows it.
pub fn extension_of(file_name: &str) -> String {
    SUFFIX
        .captures(file_name)
        .and_then(|it| it.get(1))
        .map(|it| it.as_str().to_lowercase())
        .unwrap_or_default()
}
