use verdant_api::model::votes::VoteTarget;
use verdant_core::{ActionError, EntityId, ViewerVote, VoteAction, VoteTally};
use verdant_interactions::vote::{VoteOutcome, VoteWidget};
use verdant_utils::formatting::format_compact_count;
use verdant_utils::parse::split_long_flag;

use super::{CommandMeta, UsageError};
use crate::context::Data;

pub const META: CommandMeta = CommandMeta {
    name: "vote",
    desc: "Upvotes or downvotes a post, comment or reply",
    usage: "verdant vote <post|comment|reply> <id> <up|down> [--was=up|down|none]",
    needs_backend: true,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteArgs {
    pub target: VoteTarget,
    pub target_id: EntityId,
    pub action: VoteAction,
    pub was: ViewerVote,
}

pub fn parse_target(raw: &str) -> Option<VoteTarget> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "post" | "posts" => Some(VoteTarget::Post),
        "comment" | "comments" => Some(VoteTarget::Comment),
        "reply" | "replies" => Some(VoteTarget::Reply),
        _ => None,
    }
}

pub fn parse_action(raw: &str) -> Option<VoteAction> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "up" | "upvote" | "+" => Some(VoteAction::Upvote),
        "down" | "downvote" | "devote" | "-" => Some(VoteAction::Downvote),
        _ => None,
    }
}

pub fn parse_viewer_vote(raw: &str) -> Option<ViewerVote> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "none" | "" => Some(ViewerVote::None),
        "up" | "upvoted" => Some(ViewerVote::Upvoted),
        "down" | "downvoted" => Some(ViewerVote::Downvoted),
        _ => None,
    }
}

pub fn parse(args: &[String]) -> Result<VoteArgs, UsageError> {
    let [target, target_id, action, rest @ ..] = args else {
        return Err(UsageError::new(&META, "missing arguments"));
    };

    let target = parse_target(target)
        .ok_or_else(|| UsageError::new(&META, format!("unknown target `{}`", target)))?;
    let action = parse_action(action)
        .ok_or_else(|| UsageError::new(&META, format!("unknown direction `{}`", action)))?;

    let mut was = ViewerVote::None;
    for flag in rest {
        match split_long_flag(flag) {
            Some(("was", value)) => {
                was = parse_viewer_vote(value).ok_or_else(|| {
                    UsageError::new(&META, format!("unknown previous vote `{}`", value))
                })?;
            }
            _ => return Err(UsageError::new(&META, format!("unexpected argument `{}`", flag))),
        }
    }

    Ok(VoteArgs {
        target,
        target_id: EntityId::new(target_id.trim()),
        action,
        was,
    })
}

pub async fn vote(data: &Data, args: VoteArgs) -> Result<(), ActionError> {
    // The displayed count is replaced by the backend's numbers, so 0 is fine here.
    let mut widget = VoteWidget::new(args.target, args.target_id, VoteTally::new(0, args.was));

    match widget.submit(&data.session, args.action, &data.api).await? {
        VoteOutcome::Settled(tally) => {
            println!(
                "{} {} -> score {} ({:?})",
                args.target.path_segment(),
                widget.target_id(),
                format_compact_count(tally.count),
                tally.viewer
            );
        }
        VoteOutcome::Ignored => {}
    }
    Ok(())
}
