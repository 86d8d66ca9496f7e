use verdant_core::{ActionError, UserId};
use verdant_interactions::experience::LevelDisplay;
use verdant_utils::parse::parse_experience_points;

use super::level::progress_bar;
use super::{CommandMeta, UsageError};
use crate::context::Data;

pub const XP_META: CommandMeta = CommandMeta {
    name: "xp",
    desc: "Fetches a user's experience and level (defaults to you)",
    usage: "verdant xp [user-id]",
    needs_backend: true,
};

pub const AWARD_META: CommandMeta = CommandMeta {
    name: "award",
    desc: "Adds experience to your account",
    usage: "verdant award <points>",
    needs_backend: true,
};

pub fn parse_xp(args: &[String]) -> Result<Option<UserId>, UsageError> {
    match args {
        [] => Ok(None),
        [user] => Ok(Some(UserId::new(user.trim()))),
        _ => Err(UsageError::new(&XP_META, "expected at most one user id")),
    }
}

pub fn parse_award(args: &[String]) -> Result<f64, UsageError> {
    match args {
        [raw] => parse_experience_points(raw)
            .filter(|points| *points > 0.0)
            .ok_or_else(|| UsageError::new(&AWARD_META, format!("invalid points `{}`", raw))),
        _ => Err(UsageError::new(&AWARD_META, "expected exactly one amount")),
    }
}

pub async fn xp(data: &Data, user: Option<UserId>) -> Result<(), ActionError> {
    let user = match user {
        Some(user) => user,
        None => data.session.require_viewer()?.clone(),
    };

    let mut display = LevelDisplay::new(user);
    display.refresh(&data.api).await?;

    if let (Some(summary), Some(progress)) = (display.summary(), display.progress()) {
        println!("{}: {}", display.user_id(), summary);
        println!("{}", progress_bar(progress));
    }
    Ok(())
}

pub async fn award(data: &Data, points: f64) -> Result<(), ActionError> {
    let viewer = data.session.require_viewer()?.clone();
    let mut display = LevelDisplay::new(viewer);
    display.refresh(&data.api).await?;

    let award = display.award(&data.session, points, &data.api).await?;
    if award.leveled_up() {
        println!("Level up! You reached level {}.", award.after.level);
    }
    if let Some(summary) = display.summary() {
        println!("{}", summary);
    }
    Ok(())
}
