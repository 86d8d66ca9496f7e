use std::sync::Arc;

use tracing::{debug, warn};

use verdant_api::PostService;
use verdant_api::model::posts::PostRecord;
use verdant_api::model::votes::VoteTarget;
use verdant_core::{ActionError, EntityId, VoteTally};

use crate::entity::Post;
use crate::reconcile::reconcile_list;
use crate::scope::{ScopeTicket, ViewScope};
use crate::vote::VoteWidget;

#[derive(Clone, Debug, Default)]
pub struct PostFeed {
    posts: Vec<Arc<Post>>,
    scope: ViewScope,
}

impl PostFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Arc<Post>] {
        &self.posts
    }

    pub fn ticket(&self) -> ScopeTicket {
        self.scope.ticket()
    }

    pub fn close(&mut self) {
        self.scope.invalidate();
    }

    pub fn apply_posts(&mut self, ticket: ScopeTicket, records: Vec<PostRecord>) -> bool {
        if !self.scope.is_current(ticket) {
            debug!("discarding stale post list");
            return false;
        }

        self.posts = records
            .into_iter()
            .map(|record| Arc::new(Post::from(record)))
            .collect();
        true
    }

    pub fn apply_vote(&mut self, post_id: &EntityId, tally: VoteTally) {
        self.posts = reconcile_list(&self.posts, post_id, tally);
    }

    pub fn vote_widget(&self, post_id: &EntityId) -> Option<VoteWidget> {
        self.posts
            .iter()
            .find(|post| &post.id == post_id)
            .map(|post| VoteWidget::new(VoteTarget::Post, post_id.clone(), post.tally))
    }

    pub async fn load<S>(&mut self, service: &S) -> Result<(), ActionError>
    where
        S: PostService,
    {
        let ticket = self.ticket();
        let records = service.list_posts().await.map_err(|source| {
            warn!(?source, "failed to load posts");
            ActionError::from(source)
        })?;

        self.apply_posts(ticket, records);
        Ok(())
    }
}
