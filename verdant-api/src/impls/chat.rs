use verdant_core::EntityId;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::chat::{ChatMessageRecord, NewChatMessage};

pub async fn list_messages(
    api: &ApiClient,
    room_id: &EntityId,
) -> Result<Vec<ChatMessageRecord>, ApiError> {
    api.get_json(&["chats", room_id.as_str(), "messages"]).await
}

pub async fn send_message(
    api: &ApiClient,
    room_id: &EntityId,
    message: &NewChatMessage,
) -> Result<ChatMessageRecord, ApiError> {
    api.post_json(&["chats", room_id.as_str(), "messages"], message)
        .await
}
