use serde::{Deserialize, Serialize};

use verdant_core::{EntityId, UserId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRecord {
    pub id: EntityId,
    pub room_id: EntityId,
    pub sender_id: UserId,
    pub content: String,
    #[serde(default)]
    pub sent_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub sender_id: UserId,
    pub content: String,
}
