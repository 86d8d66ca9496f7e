//! Experience points to level.
//!
//! The requirement to leave `level` is `(level + 1)^Y / X`. Levels start at 0
//! and a total equal to a requirement already counts as the next level.

use tracing::warn;

/// Divisor of the requirement curve.
pub const LEVEL_CURVE_X: f64 = 0.07;
/// Exponent of the requirement curve.
pub const LEVEL_CURVE_Y: f64 = 2.0;

/// Level derived from an experience total. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelState {
    pub level: u64,
    /// Smallest total that reaches `level + 1`. `None` for infinite totals and
    /// totals past the last level a `u64` can hold.
    pub next_level_points: Option<f64>,
}

impl LevelState {
    /// Fraction of the way from this level's floor to the next level, in `0.0..=1.0`.
    pub fn progress(&self, experience_points: f64) -> f64 {
        let Some(next) = self.next_level_points else {
            return 1.0;
        };

        let floor = match self.level {
            0 => 0.0,
            level => required_xp(level - 1),
        };
        let span = next - floor;
        if span <= 0.0 {
            return 1.0;
        }

        ((clamp_points(experience_points) - floor) / span).clamp(0.0, 1.0)
    }
}

/// Experience total needed to move past `level`.
pub fn required_xp(level: u64) -> f64 {
    (level as f64 + 1.0).powf(LEVEL_CURVE_Y) / LEVEL_CURVE_X
}

/// Derive the level for an experience total.
///
/// Negative and NaN totals are treated as 0.
pub fn level_state(experience_points: f64) -> LevelState {
    let points = clamp_points(experience_points);
    let top = LevelState {
        level: u64::MAX,
        next_level_points: None,
    };
    if !points.is_finite() || points >= required_xp(u64::MAX - 1) {
        warn!(experience_points, "experience total is past the last level");
        return top;
    }

    // Invert the curve for a starting point, then walk to the exact threshold
    // so the result agrees with `required_xp` despite rounding.
    let mut level = (points * LEVEL_CURVE_X).powf(LEVEL_CURVE_Y.recip()).floor() as u64;
    while level > 0 && points < required_xp(level - 1) {
        level -= 1;
    }
    while points >= required_xp(level) {
        level += 1;
    }

    LevelState {
        level,
        next_level_points: Some(required_xp(level)),
    }
}

fn clamp_points(experience_points: f64) -> f64 {
    if experience_points.is_nan() || experience_points < 0.0 {
        0.0
    } else {
        experience_points
    }
}
