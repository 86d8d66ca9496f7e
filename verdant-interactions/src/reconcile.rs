//! Patch server-confirmed results into in-memory lists.
//!
//! Every function returns a new list. Entries that are not touched are the
//! same `Arc` as in the input, so a renderer can skip them by pointer
//! comparison. Order is never changed.

use std::sync::Arc;

use verdant_core::{EntityId, VoteTally};

use crate::entity::{Comment, Reply, Votable};

/// Replace the tally of the entry whose id is `id`.
pub fn reconcile_list<T>(items: &[Arc<T>], id: &EntityId, tally: VoteTally) -> Vec<Arc<T>>
where
    T: Votable,
{
    items
        .iter()
        .map(|item| {
            if item.id() == id {
                Arc::new(item.with_tally(tally))
            } else {
                Arc::clone(item)
            }
        })
        .collect()
}

/// Like [`reconcile_list`], but `id` may also name a reply under any comment.
///
/// When a reply matches, its parent comment is rebuilt around the new reply
/// list; the parent's own fields are left as they were.
pub fn reconcile_thread(
    comments: &[Arc<Comment>],
    id: &EntityId,
    tally: VoteTally,
) -> Vec<Arc<Comment>> {
    comments
        .iter()
        .map(|comment| {
            if &comment.id == id {
                return Arc::new(comment.with_tally(tally));
            }

            match &comment.replies {
                Some(replies) if replies.iter().any(|reply| &reply.id == id) => {
                    Arc::new(Comment {
                        replies: Some(reconcile_list(replies, id, tally)),
                        ..Comment::clone(comment)
                    })
                }
                _ => Arc::clone(comment),
            }
        })
        .collect()
}

/// Store the fetched replies of `parent_id`.
pub fn attach_replies(
    comments: &[Arc<Comment>],
    parent_id: &EntityId,
    replies: Vec<Arc<Reply>>,
) -> Vec<Arc<Comment>> {
    let mut pending = Some(replies);
    comments
        .iter()
        .map(|comment| match pending.take_if(|_| &comment.id == parent_id) {
            Some(replies) => Arc::new(Comment {
                replies: Some(replies),
                ..Comment::clone(comment)
            }),
            None => Arc::clone(comment),
        })
        .collect()
}

/// Add a newly created comment at the end of the list.
pub fn append_comment(comments: &[Arc<Comment>], comment: Comment) -> Vec<Arc<Comment>> {
    let mut updated = Vec::with_capacity(comments.len() + 1);
    updated.extend(comments.iter().cloned());
    updated.push(Arc::new(comment));
    updated
}

/// Add a newly created reply under its parent.
///
/// A parent whose replies were never fetched is left alone; the reply will
/// arrive with the first fetch.
pub fn append_reply(comments: &[Arc<Comment>], reply: Reply) -> Vec<Arc<Comment>> {
    let mut pending = Some(reply);
    comments
        .iter()
        .map(|comment| {
            let reply = pending.take_if(|reply| reply.comment_id == comment.id);
            match (comment.replies.as_ref(), reply) {
                (Some(existing), Some(reply)) => {
                    let mut replies = existing.clone();
                    replies.push(Arc::new(reply));
                    Arc::new(Comment {
                        replies: Some(replies),
                        ..Comment::clone(comment)
                    })
                }
                _ => Arc::clone(comment),
            }
        })
        .collect()
}
