use crate::leveling::LevelState;

/// Format a vote count compactly (e.g. 999 -> "999", 1200 -> "1.2k", -3400000 -> "-3.4M").
pub fn format_compact_count(count: i64) -> String {
    let sign = if count < 0 { "-" } else { "" };
    let magnitude = count.unsigned_abs();

    let (scaled, suffix) = match magnitude {
        0..=999 => return format!("{}{}", sign, magnitude),
        1_000..=999_999 => (magnitude as f64 / 1_000.0, "k"),
        _ => (magnitude as f64 / 1_000_000.0, "M"),
    };

    // Truncate rather than round so 999_999 never displays as "1000.0k".
    let truncated = (scaled * 10.0).floor() / 10.0;
    let rendered = format!("{:.1}", truncated);
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);

    format!("{}{}{}", sign, rendered, suffix)
}

/// One-line level summary, e.g. "Level 3 (120.5/228.6 XP)".
///
/// The total is rounded to one decimal and the threshold rounded up, so a
/// total that reached a level never displays below that level's threshold.
pub fn format_level_summary(experience_points: f64, state: &LevelState) -> String {
    let current = format_points((experience_points.max(0.0) * 10.0).round() / 10.0);
    match state.next_level_points {
        Some(next) => {
            let next = format_points((next * 10.0).ceil() / 10.0);
            format!("Level {} ({}/{} XP)", state.level, current, next)
        }
        None => format!("Level {} ({} XP)", state.level, current),
    }
}

fn format_points(points: f64) -> String {
    let rendered = format!("{:.1}", points);
    match rendered.strip_suffix(".0") {
        Some(whole) => whole.to_owned(),
        None => rendered,
    }
}
