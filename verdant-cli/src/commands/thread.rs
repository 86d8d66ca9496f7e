use verdant_core::{ActionError, EntityId};
use verdant_interactions::thread::CommentThread;
use verdant_utils::formatting::format_compact_count;
use verdant_utils::parse::split_long_flag;

use super::{CommandMeta, UsageError};
use crate::context::Data;

pub const META: CommandMeta = CommandMeta {
    name: "thread",
    desc: "Shows a post's comments, optionally expanding replies",
    usage: "verdant thread <post-id> [--expand=<comment-id>]...",
    needs_backend: true,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadArgs {
    pub post_id: EntityId,
    pub expand: Vec<EntityId>,
}

pub fn parse(args: &[String]) -> Result<ThreadArgs, UsageError> {
    let [post_id, rest @ ..] = args else {
        return Err(UsageError::new(&META, "missing post id"));
    };

    let mut expand = Vec::new();
    for flag in rest {
        match split_long_flag(flag) {
            Some(("expand", value)) if !value.trim().is_empty() => {
                expand.push(EntityId::new(value.trim()));
            }
            _ => return Err(UsageError::new(&META, format!("unexpected argument `{}`", flag))),
        }
    }

    Ok(ThreadArgs {
        post_id: EntityId::new(post_id.trim()),
        expand,
    })
}

pub async fn thread(data: &Data, args: ThreadArgs) -> Result<(), ActionError> {
    let mut thread = CommentThread::new(args.post_id);
    thread.load(&data.api).await?;

    for comment_id in &args.expand {
        thread.expand(comment_id, &data.api).await?;
    }

    if thread.comments().is_empty() {
        println!("No comments yet.");
    }
    for comment in thread.comments() {
        println!(
            "{:>6}  {}: {}",
            format_compact_count(comment.tally.count),
            comment.author_id,
            comment.content
        );

        if !thread.is_expanded(&comment.id) {
            continue;
        }
        for reply in comment.replies.as_deref().unwrap_or_default() {
            println!(
                "        {:>6}  {}: {}",
                format_compact_count(reply.tally.count),
                reply.author_id,
                reply.content
            );
        }
    }
    Ok(())
}
