use serde::{Deserialize, Serialize};

use verdant_core::{EntityId, UserId, VoteAction};

/// Kind of entity a vote is cast on. Each kind has its own endpoint family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoteTarget {
    Post,
    Comment,
    Reply,
}

impl VoteTarget {
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Post => "posts",
            Self::Comment => "comments",
            Self::Reply => "replies",
        }
    }

    /// Endpoint path segments for casting `action` on this kind of entity.
    pub fn vote_segments(self, action: VoteAction) -> [&'static str; 2] {
        let verb = match action {
            VoteAction::Upvote => "upvote",
            VoteAction::Downvote => "devote",
        };
        [self.path_segment(), verb]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub user_id: UserId,
    pub target_id: EntityId,
}

/// Authoritative counts returned after every vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCounts {
    pub number_of_upvotes: i64,
    pub number_of_devotes: i64,
}

impl VoteCounts {
    pub fn score(&self) -> i64 {
        self.number_of_upvotes
            .saturating_sub(self.number_of_devotes)
    }
}
