use std::sync::Arc;

use verdant_api::model::comments::{CommentRecord, ReplyRecord};
use verdant_api::model::posts::PostRecord;
use verdant_core::{EntityId, UserId, ViewerVote, VoteTally};

/// Anything carrying a [`VoteTally`] that can be patched in place.
pub trait Votable {
    fn id(&self) -> &EntityId;

    fn tally(&self) -> VoteTally;

    /// Copy of `self` with only the tally replaced.
    fn with_tally(&self, tally: VoteTally) -> Self
    where
        Self: Sized;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    pub id: EntityId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub tally: VoteTally,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub id: EntityId,
    pub post_id: EntityId,
    pub author_id: UserId,
    pub content: String,
    pub tally: VoteTally,
    /// `None` until the replies are fetched for the first time.
    pub replies: Option<Vec<Arc<Reply>>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub id: EntityId,
    pub comment_id: EntityId,
    pub author_id: UserId,
    pub content: String,
    pub tally: VoteTally,
}

impl Comment {
    pub fn replies_loaded(&self) -> bool {
        self.replies.is_some()
    }

    pub fn find_reply(&self, reply_id: &EntityId) -> Option<&Arc<Reply>> {
        self.replies
            .as_deref()
            .and_then(|replies| replies.iter().find(|reply| &reply.id == reply_id))
    }
}

fn tally_from_counts(upvotes: i64, downvotes: i64, viewer: ViewerVote) -> VoteTally {
    VoteTally::new(upvotes.saturating_sub(downvotes), viewer)
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        Self {
            tally: tally_from_counts(
                record.number_of_upvotes,
                record.number_of_devotes,
                record.viewer_vote,
            ),
            id: record.id,
            author_id: record.author_id,
            title: record.title,
            content: record.content,
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            tally: tally_from_counts(
                record.number_of_upvotes,
                record.number_of_devotes,
                record.viewer_vote,
            ),
            id: record.id,
            post_id: record.post_id,
            author_id: record.author_id,
            content: record.content,
            replies: None,
        }
    }
}

impl From<ReplyRecord> for Reply {
    fn from(record: ReplyRecord) -> Self {
        Self {
            tally: tally_from_counts(
                record.number_of_upvotes,
                record.number_of_devotes,
                record.viewer_vote,
            ),
            id: record.id,
            comment_id: record.comment_id,
            author_id: record.author_id,
            content: record.content,
        }
    }
}

macro_rules! votable {
    ($name:ident) => {
        impl Votable for $name {
            fn id(&self) -> &EntityId {
                &self.id
            }

            fn tally(&self) -> VoteTally {
                self.tally
            }

            fn with_tally(&self, tally: VoteTally) -> Self {
                Self {
                    tally,
                    ..self.clone()
                }
            }
        }
    };
}

votable!(Post);
votable!(Comment);
votable!(Reply);
