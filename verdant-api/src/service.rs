//! Seams between user-facing interactions and the backend.
//!
//! [`ApiClient`] implements every trait by delegating to [`crate::impls`].
//! Interaction code is generic over these traits so it can run against
//! in-memory fakes.

use std::future::Future;

use verdant_core::{EntityId, UserId, VoteAction};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::impls;
use crate::model::chat::{ChatMessageRecord, NewChatMessage};
use crate::model::comments::{CommentRecord, NewComment, NewReply, ReplyRecord};
use crate::model::experience::ExperiencePoints;
use crate::model::posts::PostRecord;
use crate::model::votes::{VoteCounts, VoteTarget};

pub trait VoteService {
    fn cast_vote(
        &self,
        target: VoteTarget,
        action: VoteAction,
        viewer: &UserId,
        target_id: &EntityId,
    ) -> impl Future<Output = Result<VoteCounts, ApiError>>;
}

pub trait ExperienceService {
    fn experience_points(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<ExperiencePoints, ApiError>>;

    fn add_experience(
        &self,
        user_id: &UserId,
        points: f64,
    ) -> impl Future<Output = Result<ExperiencePoints, ApiError>>;
}

pub trait PostService {
    fn list_posts(&self) -> impl Future<Output = Result<Vec<PostRecord>, ApiError>>;
}

pub trait CommentService {
    fn list_comments(
        &self,
        post_id: &EntityId,
    ) -> impl Future<Output = Result<Vec<CommentRecord>, ApiError>>;

    fn list_replies(
        &self,
        comment_id: &EntityId,
    ) -> impl Future<Output = Result<Vec<ReplyRecord>, ApiError>>;

    fn create_comment(
        &self,
        comment: &NewComment,
    ) -> impl Future<Output = Result<CommentRecord, ApiError>>;

    fn create_reply(&self, reply: &NewReply)
    -> impl Future<Output = Result<ReplyRecord, ApiError>>;
}

pub trait ChatService {
    fn list_messages(
        &self,
        room_id: &EntityId,
    ) -> impl Future<Output = Result<Vec<ChatMessageRecord>, ApiError>>;

    fn send_message(
        &self,
        room_id: &EntityId,
        message: &NewChatMessage,
    ) -> impl Future<Output = Result<ChatMessageRecord, ApiError>>;
}

impl VoteService for ApiClient {
    async fn cast_vote(
        &self,
        target: VoteTarget,
        action: VoteAction,
        viewer: &UserId,
        target_id: &EntityId,
    ) -> Result<VoteCounts, ApiError> {
        impls::votes::cast_vote(self, target, action, viewer, target_id).await
    }
}

impl ExperienceService for ApiClient {
    async fn experience_points(&self, user_id: &UserId) -> Result<ExperiencePoints, ApiError> {
        impls::experience::get_experience_points(self, user_id).await
    }

    async fn add_experience(
        &self,
        user_id: &UserId,
        points: f64,
    ) -> Result<ExperiencePoints, ApiError> {
        impls::experience::add_experience_points(self, user_id, points).await
    }
}

impl PostService for ApiClient {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, ApiError> {
        impls::posts::list_posts(self).await
    }
}

impl CommentService for ApiClient {
    async fn list_comments(&self, post_id: &EntityId) -> Result<Vec<CommentRecord>, ApiError> {
        impls::comments::list_comments(self, post_id).await
    }

    async fn list_replies(&self, comment_id: &EntityId) -> Result<Vec<ReplyRecord>, ApiError> {
        impls::comments::list_replies(self, comment_id).await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<CommentRecord, ApiError> {
        impls::comments::create_comment(self, comment).await
    }

    async fn create_reply(&self, reply: &NewReply) -> Result<ReplyRecord, ApiError> {
        impls::comments::create_reply(self, reply).await
    }
}

impl ChatService for ApiClient {
    async fn list_messages(&self, room_id: &EntityId) -> Result<Vec<ChatMessageRecord>, ApiError> {
        impls::chat::list_messages(self, room_id).await
    }

    async fn send_message(
        &self,
        room_id: &EntityId,
        message: &NewChatMessage,
    ) -> Result<ChatMessageRecord, ApiError> {
        impls::chat::send_message(self, room_id, message).await
    }
}
