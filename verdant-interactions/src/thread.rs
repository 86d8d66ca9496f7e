use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use verdant_api::model::comments::{CommentRecord, NewComment, NewReply, ReplyRecord};
use verdant_api::model::votes::VoteTarget;
use verdant_api::{ApiError, CommentService};
use verdant_core::{ActionError, EntityId, Session, VoteTally};

use crate::entity::{Comment, Reply};
use crate::reconcile::{append_comment, append_reply, attach_replies, reconcile_thread};
use crate::scope::{ScopeTicket, ViewScope};
use crate::vote::VoteWidget;

/// Comments of one post, with replies fetched the first time a comment is expanded.
#[derive(Clone, Debug)]
pub struct CommentThread {
    post_id: EntityId,
    comments: Vec<Arc<Comment>>,
    expanded: HashSet<EntityId>,
    scope: ViewScope,
}

impl CommentThread {
    pub fn new(post_id: EntityId) -> Self {
        Self {
            post_id,
            comments: Vec::new(),
            expanded: HashSet::new(),
            scope: ViewScope::new(),
        }
    }

    pub fn post_id(&self) -> &EntityId {
        &self.post_id
    }

    pub fn comments(&self) -> &[Arc<Comment>] {
        &self.comments
    }

    pub fn comment(&self, comment_id: &EntityId) -> Option<&Arc<Comment>> {
        self.comments.iter().find(|comment| &comment.id == comment_id)
    }

    pub fn is_expanded(&self, comment_id: &EntityId) -> bool {
        self.expanded.contains(comment_id)
    }

    /// Ticket for a request issued against the thread as it is now.
    pub fn ticket(&self) -> ScopeTicket {
        self.scope.ticket()
    }

    /// The viewer navigated away. Responses still in flight are dropped.
    pub fn close(&mut self) {
        self.scope.invalidate();
    }

    /// Replace the comment list. Returns false if the response is stale.
    pub fn apply_comments(&mut self, ticket: ScopeTicket, records: Vec<CommentRecord>) -> bool {
        if !self.scope.is_current(ticket) {
            debug!(post_id = %self.post_id, "discarding stale comment list");
            return false;
        }

        self.comments = records
            .into_iter()
            .map(|record| Arc::new(Comment::from(record)))
            .collect();
        self.expanded.clear();
        true
    }

    /// Store fetched replies for `parent_id`. Returns false if the response is stale.
    pub fn apply_replies(
        &mut self,
        ticket: ScopeTicket,
        parent_id: &EntityId,
        records: Vec<ReplyRecord>,
    ) -> bool {
        if !self.scope.is_current(ticket) {
            debug!(%parent_id, "discarding stale replies");
            return false;
        }

        let replies = records
            .into_iter()
            .map(|record| Arc::new(Reply::from(record)))
            .collect();
        self.comments = attach_replies(&self.comments, parent_id, replies);
        true
    }

    /// Install a server-confirmed tally for a comment or reply.
    pub fn apply_vote(&mut self, entity_id: &EntityId, tally: VoteTally) {
        self.comments = reconcile_thread(&self.comments, entity_id, tally);
    }

    /// Vote widget for a comment or a loaded reply in this thread.
    pub fn vote_widget(&self, entity_id: &EntityId) -> Option<VoteWidget> {
        for comment in &self.comments {
            if &comment.id == entity_id {
                return Some(VoteWidget::new(
                    VoteTarget::Comment,
                    entity_id.clone(),
                    comment.tally,
                ));
            }
            if let Some(reply) = comment.find_reply(entity_id) {
                return Some(VoteWidget::new(
                    VoteTarget::Reply,
                    entity_id.clone(),
                    reply.tally,
                ));
            }
        }
        None
    }

    pub async fn load<S>(&mut self, service: &S) -> Result<(), ActionError>
    where
        S: CommentService,
    {
        let ticket = self.ticket();
        let records = service
            .list_comments(&self.post_id)
            .await
            .map_err(|source| remote_failure(source, "failed to load comments"))?;

        if self.apply_comments(ticket, records) {
            info!(post_id = %self.post_id, comments = self.comments.len(), "comments loaded");
        }
        Ok(())
    }

    /// Expand a comment, fetching its replies only if they were never loaded.
    pub async fn expand<S>(&mut self, comment_id: &EntityId, service: &S) -> Result<(), ActionError>
    where
        S: CommentService,
    {
        let Some(comment) = self.comment(comment_id) else {
            debug!(%comment_id, "expand requested for unknown comment");
            return Ok(());
        };

        if comment.replies_loaded() {
            self.expanded.insert(comment_id.clone());
            return Ok(());
        }

        let ticket = self.ticket();
        let records = service
            .list_replies(comment_id)
            .await
            .map_err(|source| remote_failure(source, "failed to load replies"))?;

        if self.apply_replies(ticket, comment_id, records) {
            self.expanded.insert(comment_id.clone());
        }
        Ok(())
    }

    /// Hide replies. They stay loaded for the next expansion.
    pub fn collapse(&mut self, comment_id: &EntityId) {
        self.expanded.remove(comment_id);
    }

    pub async fn post_comment<S>(
        &mut self,
        session: &Session,
        content: &str,
        service: &S,
    ) -> Result<Arc<Comment>, ActionError>
    where
        S: CommentService,
    {
        let viewer = session.require_viewer()?;
        let request = NewComment {
            user_id: viewer.clone(),
            post_id: self.post_id.clone(),
            content: content.trim().to_owned(),
        };

        let ticket = self.ticket();
        let record = service
            .create_comment(&request)
            .await
            .map_err(|source| remote_failure(source, "failed to post comment"))?;

        let comment = Comment::from(record);
        if self.scope.is_current(ticket) {
            self.comments = append_comment(&self.comments, comment.clone());
        }
        Ok(Arc::new(comment))
    }

    pub async fn post_reply<S>(
        &mut self,
        session: &Session,
        parent_id: &EntityId,
        content: &str,
        service: &S,
    ) -> Result<Arc<Reply>, ActionError>
    where
        S: CommentService,
    {
        let viewer = session.require_viewer()?;
        let request = NewReply {
            user_id: viewer.clone(),
            comment_id: parent_id.clone(),
            content: content.trim().to_owned(),
        };

        let ticket = self.ticket();
        let record = service
            .create_reply(&request)
            .await
            .map_err(|source| remote_failure(source, "failed to post reply"))?;

        let reply = Reply::from(record);
        if self.scope.is_current(ticket) {
            self.comments = append_reply(&self.comments, reply.clone());
        }
        Ok(Arc::new(reply))
    }
}

fn remote_failure(source: ApiError, message: &'static str) -> ActionError {
    warn!(?source, "{}", message);
    source.into()
}
