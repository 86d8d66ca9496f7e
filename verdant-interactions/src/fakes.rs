//! In-memory backend for interaction tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use verdant_api::model::chat::{ChatMessageRecord, NewChatMessage};
use verdant_api::model::comments::{CommentRecord, NewComment, NewReply, ReplyRecord};
use verdant_api::model::experience::ExperiencePoints;
use verdant_api::model::posts::PostRecord;
use verdant_api::model::votes::{VoteCounts, VoteTarget};
use verdant_api::{
    ApiError, ChatService, CommentService, ExperienceService, PostService, VoteService,
};
use verdant_core::{EntityId, UserId, ViewerVote, VoteAction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum VoteMode {
    #[default]
    Ok,
    Failing,
    Malformed,
}

#[derive(Clone, Debug, Default)]
struct VoteBook {
    upvotes: i64,
    downvotes: i64,
    voters: HashMap<UserId, ViewerVote>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    vote_mode: VoteMode,
    votes: RefCell<HashMap<EntityId, VoteBook>>,
    vote_calls: Cell<usize>,
    posts: RefCell<Vec<PostRecord>>,
    comments: RefCell<Vec<CommentRecord>>,
    replies: RefCell<HashMap<EntityId, Vec<ReplyRecord>>>,
    reply_fetches: RefCell<HashMap<EntityId, usize>>,
    created_comments: Cell<usize>,
    experience: RefCell<HashMap<UserId, f64>>,
    messages: RefCell<Vec<ChatMessageRecord>>,
    message_fetches: Cell<usize>,
    fail_reads: Cell<bool>,
    next_id: Cell<u64>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_votes(mut self) -> Self {
        self.vote_mode = VoteMode::Failing;
        self
    }

    pub fn malformed_votes(mut self) -> Self {
        self.vote_mode = VoteMode::Malformed;
        self
    }

    /// Seed the totals of an entity; the viewer's own vote is included in them.
    pub fn with_votes(self, id: &str, upvotes: i64, downvotes: i64) -> Self {
        {
            let mut votes = self.votes.borrow_mut();
            let book = votes.entry(EntityId::new(id)).or_default();
            book.upvotes = upvotes;
            book.downvotes = downvotes;
        }
        self
    }

    pub fn with_viewer_vote(self, id: &str, viewer: &str, vote: ViewerVote) -> Self {
        self.votes
            .borrow_mut()
            .entry(EntityId::new(id))
            .or_default()
            .voters
            .insert(UserId::new(viewer), vote);
        self
    }

    pub fn with_post(self, id: &str, upvotes: i64, downvotes: i64) -> Self {
        self.posts.borrow_mut().push(PostRecord {
            id: EntityId::new(id),
            author_id: UserId::new("author"),
            title: format!("post {id}"),
            content: String::new(),
            number_of_upvotes: upvotes,
            number_of_devotes: downvotes,
            viewer_vote: ViewerVote::None,
        });
        self.with_votes(id, upvotes, downvotes)
    }

    pub fn with_comment(self, post_id: &str, id: &str, upvotes: i64, downvotes: i64) -> Self {
        self.comments.borrow_mut().push(CommentRecord {
            id: EntityId::new(id),
            post_id: EntityId::new(post_id),
            author_id: UserId::new("author"),
            content: format!("comment {id}"),
            number_of_upvotes: upvotes,
            number_of_devotes: downvotes,
            viewer_vote: ViewerVote::None,
        });
        self.with_votes(id, upvotes, downvotes)
    }

    pub fn with_reply(self, comment_id: &str, id: &str, upvotes: i64, downvotes: i64) -> Self {
        self.replies
            .borrow_mut()
            .entry(EntityId::new(comment_id))
            .or_default()
            .push(ReplyRecord {
                id: EntityId::new(id),
                comment_id: EntityId::new(comment_id),
                author_id: UserId::new("author"),
                content: format!("reply {id}"),
                number_of_upvotes: upvotes,
                number_of_devotes: downvotes,
                viewer_vote: ViewerVote::None,
            });
        self.with_votes(id, upvotes, downvotes)
    }

    pub fn with_experience(self, user_id: &str, points: f64) -> Self {
        self.experience
            .borrow_mut()
            .insert(UserId::new(user_id), points);
        self
    }

    pub fn with_message(self, room_id: &str, content: &str) -> Self {
        self.push_message(room_id, content);
        self
    }

    pub fn push_message(&self, room_id: &str, content: &str) {
        let id = self.fresh_id("m");
        self.messages.borrow_mut().push(ChatMessageRecord {
            id,
            room_id: EntityId::new(room_id),
            sender_id: UserId::new("someone"),
            content: content.to_owned(),
            sent_at: None,
        });
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn vote_calls(&self) -> usize {
        self.vote_calls.get()
    }

    pub fn reply_fetches(&self, comment_id: &str) -> usize {
        self.reply_fetches
            .borrow()
            .get(&EntityId::new(comment_id))
            .copied()
            .unwrap_or(0)
    }

    pub fn created_comments(&self) -> usize {
        self.created_comments.get()
    }

    pub fn message_fetches(&self) -> usize {
        self.message_fetches.get()
    }

    fn fresh_id(&self, prefix: &str) -> EntityId {
        let next = self.next_id.get() + 1;
        self.next_id.set(next);
        EntityId::new(format!("{prefix}{next}"))
    }

    fn read_guard(&self) -> Result<(), ApiError> {
        if self.fail_reads.get() {
            return Err(unavailable());
        }
        Ok(())
    }
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        body: "unavailable".to_owned(),
    }
}

impl VoteService for FakeBackend {
    async fn cast_vote(
        &self,
        _target: VoteTarget,
        action: VoteAction,
        viewer: &UserId,
        target_id: &EntityId,
    ) -> Result<VoteCounts, ApiError> {
        self.vote_calls.set(self.vote_calls.get() + 1);

        match self.vote_mode {
            VoteMode::Ok => {}
            VoteMode::Failing => return Err(unavailable()),
            VoteMode::Malformed => {
                let source = serde_json::from_str::<VoteCounts>("{}").unwrap_err();
                return Err(ApiError::Decode(source));
            }
        }

        let mut votes = self.votes.borrow_mut();
        let book = votes.entry(target_id.clone()).or_default();
        let current = book.voters.get(viewer).copied().unwrap_or_default();

        let next = match (action, current) {
            (VoteAction::Upvote, ViewerVote::Upvoted) => {
                book.upvotes -= 1;
                ViewerVote::None
            }
            (VoteAction::Upvote, ViewerVote::Downvoted) => {
                book.downvotes -= 1;
                book.upvotes += 1;
                ViewerVote::Upvoted
            }
            (VoteAction::Upvote, ViewerVote::None) => {
                book.upvotes += 1;
                ViewerVote::Upvoted
            }
            (VoteAction::Downvote, ViewerVote::Downvoted) => {
                book.downvotes -= 1;
                ViewerVote::None
            }
            (VoteAction::Downvote, ViewerVote::Upvoted) => {
                book.upvotes -= 1;
                book.downvotes += 1;
                ViewerVote::Downvoted
            }
            (VoteAction::Downvote, ViewerVote::None) => {
                book.downvotes += 1;
                ViewerVote::Downvoted
            }
        };
        book.voters.insert(viewer.clone(), next);

        Ok(VoteCounts {
            number_of_upvotes: book.upvotes,
            number_of_devotes: book.downvotes,
        })
    }
}

impl PostService for FakeBackend {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, ApiError> {
        self.read_guard()?;
        Ok(self.posts.borrow().clone())
    }
}

impl CommentService for FakeBackend {
    async fn list_comments(&self, post_id: &EntityId) -> Result<Vec<CommentRecord>, ApiError> {
        self.read_guard()?;
        Ok(self
            .comments
            .borrow()
            .iter()
            .filter(|comment| &comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn list_replies(&self, comment_id: &EntityId) -> Result<Vec<ReplyRecord>, ApiError> {
        self.read_guard()?;
        *self
            .reply_fetches
            .borrow_mut()
            .entry(comment_id.clone())
            .or_default() += 1;
        Ok(self
            .replies
            .borrow()
            .get(comment_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<CommentRecord, ApiError> {
        self.created_comments.set(self.created_comments.get() + 1);
        let record = CommentRecord {
            id: self.fresh_id("c-new"),
            post_id: comment.post_id.clone(),
            author_id: comment.user_id.clone(),
            content: comment.content.clone(),
            number_of_upvotes: 0,
            number_of_devotes: 0,
            viewer_vote: ViewerVote::None,
        };
        self.comments.borrow_mut().push(record.clone());
        Ok(record)
    }

    async fn create_reply(&self, reply: &NewReply) -> Result<ReplyRecord, ApiError> {
        let record = ReplyRecord {
            id: self.fresh_id("r-new"),
            comment_id: reply.comment_id.clone(),
            author_id: reply.user_id.clone(),
            content: reply.content.clone(),
            number_of_upvotes: 0,
            number_of_devotes: 0,
            viewer_vote: ViewerVote::None,
        };
        self.replies
            .borrow_mut()
            .entry(reply.comment_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}

impl ExperienceService for FakeBackend {
    async fn experience_points(&self, user_id: &UserId) -> Result<ExperiencePoints, ApiError> {
        self.read_guard()?;
        let experience_points = self
            .experience
            .borrow()
            .get(user_id)
            .copied()
            .unwrap_or(0.0);
        Ok(ExperiencePoints { experience_points })
    }

    async fn add_experience(
        &self,
        user_id: &UserId,
        points: f64,
    ) -> Result<ExperiencePoints, ApiError> {
        let mut experience = self.experience.borrow_mut();
        let total = experience.entry(user_id.clone()).or_insert(0.0);
        *total += points;
        Ok(ExperiencePoints {
            experience_points: *total,
        })
    }
}

impl ChatService for FakeBackend {
    async fn list_messages(&self, room_id: &EntityId) -> Result<Vec<ChatMessageRecord>, ApiError> {
        self.read_guard()?;
        self.message_fetches.set(self.message_fetches.get() + 1);
        Ok(self
            .messages
            .borrow()
            .iter()
            .filter(|message| &message.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn send_message(
        &self,
        room_id: &EntityId,
        message: &NewChatMessage,
    ) -> Result<ChatMessageRecord, ApiError> {
        let record = ChatMessageRecord {
            id: self.fresh_id("m"),
            room_id: room_id.clone(),
            sender_id: message.sender_id.clone(),
            content: message.content.clone(),
            sent_at: None,
        };
        self.messages.borrow_mut().push(record.clone());
        Ok(record)
    }
}
