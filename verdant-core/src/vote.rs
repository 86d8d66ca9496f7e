use std::fmt;

use serde::{Deserialize, Serialize};

/// The viewer's own vote on one entity. At most one direction at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerVote {
    #[default]
    None,
    Upvoted,
    Downvoted,
}

/// What the viewer clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoteAction {
    Upvote,
    Downvote,
}

impl VoteAction {
    /// The viewer state this action produces when it is not a toggle-off.
    pub fn applied_state(self) -> ViewerVote {
        match self {
            Self::Upvote => ViewerVote::Upvoted,
            Self::Downvote => ViewerVote::Downvoted,
        }
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upvote => f.write_str("upvote"),
            Self::Downvote => f.write_str("downvote"),
        }
    }
}

/// Aggregate score of an entity plus the viewer's own vote on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub count: i64,
    pub viewer: ViewerVote,
}

impl VoteTally {
    pub fn new(count: i64, viewer: ViewerVote) -> Self {
        Self { count, viewer }
    }
}
