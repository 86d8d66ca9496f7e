use serde::{Deserialize, Serialize};

use verdant_core::{EntityId, UserId, ViewerVote};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: EntityId,
    pub post_id: EntityId,
    pub author_id: UserId,
    pub content: String,
    pub number_of_upvotes: i64,
    pub number_of_devotes: i64,
    #[serde(default)]
    pub viewer_vote: ViewerVote,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRecord {
    pub id: EntityId,
    pub comment_id: EntityId,
    pub author_id: UserId,
    pub content: String,
    pub number_of_upvotes: i64,
    pub number_of_devotes: i64,
    #[serde(default)]
    pub viewer_vote: ViewerVote,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub user_id: UserId,
    pub post_id: EntityId,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReply {
    pub user_id: UserId,
    pub comment_id: EntityId,
    pub content: String,
}
