/// Parse an experience total. Accepts finite, non-negative numbers only.
pub fn parse_experience_points(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Interpret common truthy spellings ("1", "true", "yes", "on").
pub fn parse_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a strictly positive integer, ignoring surrounding whitespace.
pub fn parse_positive_u64(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

/// Split `--name=value` into its parts. Returns `None` for anything else.
pub fn split_long_flag(raw: &str) -> Option<(&str, &str)> {
    let body = raw.strip_prefix("--")?;
    let (name, value) = body.split_once('=')?;
    if name.is_empty() {
        return None;
    }
    Some((name, value))
}
