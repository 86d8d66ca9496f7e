use verdant_core::{ActionError, EntityId};
use verdant_interactions::chat::ChatFeed;

use super::{CommandMeta, UsageError};
use crate::context::Data;

pub const META: CommandMeta = CommandMeta {
    name: "chat",
    desc: "Prints a chat room, sending a message first if one is given",
    usage: "verdant chat <room-id> [message...]",
    needs_backend: true,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatArgs {
    pub room_id: EntityId,
    pub message: Option<String>,
}

pub fn parse(args: &[String]) -> Result<ChatArgs, UsageError> {
    let [room_id, words @ ..] = args else {
        return Err(UsageError::new(&META, "missing room id"));
    };

    let message = words.join(" ");
    Ok(ChatArgs {
        room_id: EntityId::new(room_id.trim()),
        message: (!message.trim().is_empty()).then_some(message),
    })
}

pub async fn chat(data: &Data, args: ChatArgs) -> Result<(), ActionError> {
    let mut feed = ChatFeed::new(args.room_id);

    match args.message {
        Some(message) => {
            feed.send(&data.session, &message, &data.api).await?;
        }
        None => feed.on_notification(&data.api).await?,
    }

    for message in feed.messages() {
        match &message.sent_at {
            Some(sent_at) => println!("[{}] {}: {}", sent_at, message.sender_id, message.content),
            None => println!("{}: {}", message.sender_id, message.content),
        }
    }
    Ok(())
}
