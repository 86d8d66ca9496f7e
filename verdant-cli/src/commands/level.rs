use verdant_utils::formatting::format_level_summary;
use verdant_utils::leveling::level_state;
use verdant_utils::parse::parse_experience_points;

use super::{CommandMeta, UsageError};

pub const META: CommandMeta = CommandMeta {
    name: "level",
    desc: "Shows the level for an experience total",
    usage: "verdant level <points>",
    needs_backend: false,
};

const BAR_WIDTH: usize = 20;

pub fn parse(args: &[String]) -> Result<f64, UsageError> {
    match args {
        [raw] => parse_experience_points(raw)
            .ok_or_else(|| UsageError::new(&META, format!("invalid experience total `{}`", raw))),
        _ => Err(UsageError::new(&META, "expected exactly one experience total")),
    }
}

pub fn level(points: f64) {
    let state = level_state(points);
    println!("{}", format_level_summary(points, &state));
    println!("{}", progress_bar(state.progress(points)));
}

pub fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        fraction.clamp(0.0, 1.0) * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::{parse, progress_bar};

    #[test]
    fn parses_single_total() {
        assert_eq!(parse(&["14.3".to_owned()]).unwrap(), 14.3);
        assert!(parse(&[]).is_err());
        assert!(parse(&["-1".to_owned()]).is_err());
        assert!(parse(&["1".to_owned(), "2".to_owned()]).is_err());
    }

    #[test]
    fn progress_bars() {
        assert_eq!(progress_bar(0.0), "[--------------------]   0%");
        assert_eq!(progress_bar(0.5), "[##########----------]  50%");
        assert_eq!(progress_bar(1.0), "[####################] 100%");
    }
}
