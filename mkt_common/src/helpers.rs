/// Split a comma-separated list from an environment variable into its trimmed, non-empty entries.
pub fn parse_list(value: Option<String>) -> Vec<String> {
    let value = match value {
        Some(v) => v,
        None => return Vec::new(),
    };
    value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()).map(|s| s.to_string()).collect()
}
