use serde::{Deserialize, Serialize};

use verdant_core::{EntityId, UserId, ViewerVote};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: EntityId,
    pub author_id: UserId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub number_of_upvotes: i64,
    pub number_of_devotes: i64,
    #[serde(default)]
    pub viewer_vote: ViewerVote,
}
