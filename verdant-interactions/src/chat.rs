//! Chat room view.
//!
//! The real-time channel only tells us that something changed; on every
//! notification the whole message list is fetched again and replaced.

use tracing::{debug, warn};

use verdant_api::ChatService;
use verdant_api::model::chat::{ChatMessageRecord, NewChatMessage};
use verdant_core::{ActionError, EntityId, Session};

use crate::scope::{ScopeTicket, ViewScope};

#[derive(Clone, Debug)]
pub struct ChatFeed {
    room_id: EntityId,
    messages: Vec<ChatMessageRecord>,
    scope: ViewScope,
}

impl ChatFeed {
    pub fn new(room_id: EntityId) -> Self {
        Self {
            room_id,
            messages: Vec::new(),
            scope: ViewScope::new(),
        }
    }

    pub fn room_id(&self) -> &EntityId {
        &self.room_id
    }

    pub fn messages(&self) -> &[ChatMessageRecord] {
        &self.messages
    }

    pub fn ticket(&self) -> ScopeTicket {
        self.scope.ticket()
    }

    pub fn leave(&mut self) {
        self.scope.invalidate();
    }

    pub fn apply_messages(
        &mut self,
        ticket: ScopeTicket,
        messages: Vec<ChatMessageRecord>,
    ) -> bool {
        if !self.scope.is_current(ticket) {
            debug!(room_id = %self.room_id, "discarding stale chat messages");
            return false;
        }
        self.messages = messages;
        true
    }

    /// Refetch and replace the message list.
    pub async fn on_notification<S>(&mut self, service: &S) -> Result<(), ActionError>
    where
        S: ChatService,
    {
        let ticket = self.ticket();
        let messages = service
            .list_messages(&self.room_id)
            .await
            .map_err(|source| {
                warn!(?source, room_id = %self.room_id, "failed to refresh chat");
                ActionError::from(source)
            })?;

        self.apply_messages(ticket, messages);
        Ok(())
    }

    /// Send a message and refresh. Blank messages are not sent.
    ///
    /// Once the backend accepts the message this returns `Ok(true)` even if the
    /// refresh fails; the sent message is then appended locally.
    pub async fn send<S>(
        &mut self,
        session: &Session,
        content: &str,
        service: &S,
    ) -> Result<bool, ActionError>
    where
        S: ChatService,
    {
        let viewer = session.require_viewer()?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(false);
        }

        let message = NewChatMessage {
            sender_id: viewer.clone(),
            content: content.to_owned(),
        };
        let ticket = self.ticket();
        let sent = service
            .send_message(&self.room_id, &message)
            .await
            .map_err(|source| {
                warn!(?source, room_id = %self.room_id, "failed to send chat message");
                ActionError::from(source)
            })?;

        if self.on_notification(service).await.is_err() && self.scope.is_current(ticket) {
            debug!(room_id = %self.room_id, "showing sent message without a refresh");
            self.messages.push(sent);
        }
        Ok(true)
    }
}
