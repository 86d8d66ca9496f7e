//! Tri-state vote widget.
//!
//! Each widget moves through `Idle -> Pending -> Idle`. Entering `Pending`
//! applies an optimistic guess; leaving it either installs the server's
//! counts or restores the tally from before the click. While a request is
//! pending further clicks are ignored.

use tracing::{debug, warn};

use verdant_api::VoteService;
use verdant_api::model::votes::{VoteCounts, VoteTarget};
use verdant_core::{ActionError, EntityId, Session, UserId, ViewerVote, VoteAction, VoteTally};

use crate::scope::{ScopeTicket, ViewScope};

/// Viewer state after `action` is applied to `current`.
///
/// Repeating the current direction toggles it off; the other direction flips.
pub fn next_viewer_state(current: ViewerVote, action: VoteAction) -> ViewerVote {
    match (current, action) {
        (ViewerVote::Upvoted, VoteAction::Upvote)
        | (ViewerVote::Downvoted, VoteAction::Downvote) => ViewerVote::None,
        (_, action) => action.applied_state(),
    }
}

fn weight(vote: ViewerVote) -> i64 {
    match vote {
        ViewerVote::None => 0,
        ViewerVote::Upvoted => 1,
        ViewerVote::Downvoted => -1,
    }
}

/// Count change the widget shows before the server answers.
///
/// Only a guess for perceived latency; the settled count always comes from
/// the backend.
pub fn optimistic_delta(current: ViewerVote, action: VoteAction) -> i64 {
    weight(next_viewer_state(current, action)) - weight(current)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VotePhase {
    Idle,
    Pending {
        previous: VoteTally,
        next_state: ViewerVote,
    },
}

/// A request that has been started and must be settled or rolled back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingVote {
    pub ticket: ScopeTicket,
    pub action: VoteAction,
    pub viewer: UserId,
    pub optimistic: VoteTally,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BeginVote {
    Started(PendingVote),
    /// Another request from this widget is still in flight.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    Settled(VoteTally),
    RolledBack(VoteTally),
    /// The widget was unmounted or the ticket was already used.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    Settled(VoteTally),
    Ignored,
}

#[derive(Clone, Debug)]
pub struct VoteWidget {
    target: VoteTarget,
    target_id: EntityId,
    tally: VoteTally,
    phase: VotePhase,
    scope: ViewScope,
}

impl VoteWidget {
    pub fn new(target: VoteTarget, target_id: EntityId, tally: VoteTally) -> Self {
        Self {
            target,
            target_id,
            tally,
            phase: VotePhase::Idle,
            scope: ViewScope::new(),
        }
    }

    pub fn target(&self) -> VoteTarget {
        self.target
    }

    pub fn target_id(&self) -> &EntityId {
        &self.target_id
    }

    /// What the widget currently displays, optimistic guess included.
    pub fn tally(&self) -> VoteTally {
        self.tally
    }

    /// True while the trigger controls should be disabled.
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, VotePhase::Pending { .. })
    }

    /// Start a vote: check identity, apply the optimistic guess, hand out a ticket.
    pub fn begin(
        &mut self,
        session: &Session,
        action: VoteAction,
    ) -> Result<BeginVote, ActionError> {
        let viewer = session.require_viewer()?;

        if self.is_pending() {
            debug!(target_id = %self.target_id, %action, "vote already in flight; ignoring click");
            return Ok(BeginVote::Ignored);
        }

        let previous = self.tally;
        let next_state = next_viewer_state(previous.viewer, action);
        let optimistic = VoteTally::new(
            previous
                .count
                .saturating_add(optimistic_delta(previous.viewer, action)),
            next_state,
        );

        self.scope.invalidate();
        self.phase = VotePhase::Pending {
            previous,
            next_state,
        };
        self.tally = optimistic;

        Ok(BeginVote::Started(PendingVote {
            ticket: self.scope.ticket(),
            action,
            viewer: viewer.clone(),
            optimistic,
        }))
    }

    /// Install the server's counts for the request identified by `ticket`.
    pub fn settle(&mut self, ticket: ScopeTicket, counts: VoteCounts) -> Settlement {
        let Some((_, next_state)) = self.take_pending(ticket) else {
            return Settlement::Stale;
        };

        self.tally = VoteTally::new(counts.score(), next_state);
        Settlement::Settled(self.tally)
    }

    /// Restore the tally from before the request identified by `ticket`.
    pub fn roll_back(&mut self, ticket: ScopeTicket) -> Settlement {
        let Some((previous, _)) = self.take_pending(ticket) else {
            return Settlement::Stale;
        };

        self.tally = previous;
        Settlement::RolledBack(self.tally)
    }

    /// Forget any in-flight request. Its response will be discarded.
    pub fn unmount(&mut self) {
        if let VotePhase::Pending { previous, .. } = self.phase {
            self.tally = previous;
        }
        self.phase = VotePhase::Idle;
        self.scope.invalidate();
    }

    fn take_pending(&mut self, ticket: ScopeTicket) -> Option<(VoteTally, ViewerVote)> {
        if !self.scope.is_current(ticket) {
            debug!(target_id = %self.target_id, "discarding stale vote response");
            return None;
        }

        let VotePhase::Pending {
            previous,
            next_state,
        } = self.phase
        else {
            return None;
        };

        self.phase = VotePhase::Idle;
        self.scope.invalidate();
        Some((previous, next_state))
    }

    /// Run one vote end to end against `service`.
    pub async fn submit<S>(
        &mut self,
        session: &Session,
        action: VoteAction,
        service: &S,
    ) -> Result<VoteOutcome, ActionError>
    where
        S: VoteService,
    {
        let pending = match self.begin(session, action)? {
            BeginVote::Started(pending) => pending,
            BeginVote::Ignored => return Ok(VoteOutcome::Ignored),
        };

        let result = service
            .cast_vote(self.target, action, &pending.viewer, &self.target_id)
            .await;

        match result {
            Ok(counts) => {
                self.settle(pending.ticket, counts);
                Ok(VoteOutcome::Settled(self.tally))
            }
            Err(source) => {
                warn!(?source, target_id = %self.target_id, %action, "vote failed; rolling back");
                self.roll_back(pending.ticket);
                Err(source.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use verdant_api::model::votes::{VoteCounts, VoteTarget};
    use verdant_core::{ActionError, EntityId, Session, UserId, ViewerVote, VoteAction, VoteTally};

    use super::{
        BeginVote, Settlement, VoteOutcome, VoteWidget, next_viewer_state, optimistic_delta,
    };
    use crate::fakes::FakeBackend;

    fn signed_in() -> Session {
        Session::signed_in(UserId::new("viewer"))
    }

    fn widget(tally: VoteTally) -> VoteWidget {
        VoteWidget::new(VoteTarget::Post, EntityId::new("p1"), tally)
    }

    #[test]
    fn toggle_table() {
        use ViewerVote::*;
        use VoteAction::*;

        assert_eq!(next_viewer_state(None, Upvote), Upvoted);
        assert_eq!(next_viewer_state(Upvoted, Upvote), None);
        assert_eq!(next_viewer_state(Downvoted, Upvote), Upvoted);
        assert_eq!(next_viewer_state(None, Downvote), Downvoted);
        assert_eq!(next_viewer_state(Downvoted, Downvote), None);
        assert_eq!(next_viewer_state(Upvoted, Downvote), Downvoted);

        assert_eq!(optimistic_delta(None, Upvote), 1);
        assert_eq!(optimistic_delta(Upvoted, Upvote), -1);
        assert_eq!(optimistic_delta(Downvoted, Upvote), 2);
        assert_eq!(optimistic_delta(None, Downvote), -1);
        assert_eq!(optimistic_delta(Downvoted, Downvote), 1);
        assert_eq!(optimistic_delta(Upvoted, Downvote), -2);
    }

    #[tokio::test]
    async fn upvote_twice_round_trips() {
        let backend = FakeBackend::new().with_votes("p1", 5, 2);
        let mut widget = widget(VoteTally::new(3, ViewerVote::None));
        let session = signed_in();

        let first = widget
            .submit(&session, VoteAction::Upvote, &backend)
            .await
            .unwrap();
        assert_eq!(first, VoteOutcome::Settled(VoteTally::new(4, ViewerVote::Upvoted)));

        let second = widget
            .submit(&session, VoteAction::Upvote, &backend)
            .await
            .unwrap();
        assert_eq!(second, VoteOutcome::Settled(VoteTally::new(3, ViewerVote::None)));
        assert_eq!(backend.vote_calls(), 2);
    }

    #[tokio::test]
    async fn submit_settles_and_reopens_widget() {
        let backend = FakeBackend::new().with_votes("p1", 9, 1);
        let mut widget = widget(VoteTally::new(8, ViewerVote::None));

        let outcome = widget
            .submit(&signed_in(), VoteAction::Downvote, &backend)
            .await
            .unwrap();

        assert_eq!(outcome, VoteOutcome::Settled(widget.tally()));
        assert_eq!(widget.tally(), VoteTally::new(7, ViewerVote::Downvoted));
        assert!(!widget.is_pending());
    }

    #[tokio::test]
    async fn upvote_on_downvoted_flips_by_two() {
        let backend = FakeBackend::new()
            .with_votes("p1", 5, 2)
            .with_viewer_vote("p1", "viewer", ViewerVote::Downvoted);
        let mut widget = widget(VoteTally::new(3, ViewerVote::Downvoted));

        let outcome = widget
            .submit(&signed_in(), VoteAction::Upvote, &backend)
            .await
            .unwrap();

        assert_eq!(outcome, VoteOutcome::Settled(VoteTally::new(5, ViewerVote::Upvoted)));
    }

    #[tokio::test]
    async fn anonymous_vote_never_reaches_backend() {
        let backend = FakeBackend::new().with_votes("p1", 1, 0);
        let mut widget = widget(VoteTally::new(1, ViewerVote::None));

        for action in [VoteAction::Upvote, VoteAction::Downvote] {
            let result = widget
                .submit(&Session::anonymous(), action, &backend)
                .await;
            assert_eq!(result, Err(ActionError::AuthenticationRequired));
        }

        assert_eq!(backend.vote_calls(), 0);
        assert_eq!(widget.tally(), VoteTally::new(1, ViewerVote::None));
    }

    #[test]
    fn second_click_while_pending_is_ignored() {
        let mut widget = widget(VoteTally::new(0, ViewerVote::None));
        let session = signed_in();

        let BeginVote::Started(pending) = widget.begin(&session, VoteAction::Upvote).unwrap()
        else {
            panic!("first click should start a request");
        };
        assert_eq!(pending.optimistic, VoteTally::new(1, ViewerVote::Upvoted));
        assert!(widget.is_pending());

        assert_eq!(
            widget.begin(&session, VoteAction::Downvote).unwrap(),
            BeginVote::Ignored
        );
        assert_eq!(widget.tally(), VoteTally::new(1, ViewerVote::Upvoted));
    }

    #[tokio::test]
    async fn failure_rolls_back_to_previous_tally() {
        let backend = FakeBackend::new().failing_votes();
        let before = VoteTally::new(7, ViewerVote::Upvoted);
        let mut widget = widget(before);

        let result = widget
            .submit(&signed_in(), VoteAction::Downvote, &backend)
            .await;

        assert!(matches!(result, Err(ActionError::Remote(_))));
        assert_eq!(widget.tally(), before);
        assert!(!widget.is_pending());
    }

    #[tokio::test]
    async fn malformed_counts_roll_back() {
        let backend = FakeBackend::new().malformed_votes();
        let before = VoteTally::new(2, ViewerVote::None);
        let mut widget = widget(before);

        let result = widget
            .submit(&signed_in(), VoteAction::Upvote, &backend)
            .await;

        assert!(matches!(result, Err(ActionError::MalformedResponse(_))));
        assert_eq!(widget.tally(), before);
    }

    #[test]
    fn response_after_unmount_is_discarded() {
        let before = VoteTally::new(10, ViewerVote::None);
        let mut widget = widget(before);

        let BeginVote::Started(pending) = widget.begin(&signed_in(), VoteAction::Upvote).unwrap()
        else {
            panic!("expected a started vote");
        };
        widget.unmount();

        let counts = VoteCounts {
            number_of_upvotes: 50,
            number_of_devotes: 0,
        };
        assert_eq!(widget.settle(pending.ticket, counts), Settlement::Stale);
        assert_eq!(widget.tally(), before);
    }

    #[test]
    fn tickets_are_single_use() {
        let mut widget = widget(VoteTally::new(0, ViewerVote::None));
        let BeginVote::Started(pending) = widget.begin(&signed_in(), VoteAction::Downvote).unwrap()
        else {
            panic!("expected a started vote");
        };

        let counts = VoteCounts {
            number_of_upvotes: 0,
            number_of_devotes: 1,
        };
        assert_eq!(
            widget.settle(pending.ticket, counts),
            Settlement::Settled(VoteTally::new(-1, ViewerVote::Downvoted))
        );
        assert_eq!(widget.roll_back(pending.ticket), Settlement::Stale);
        assert_eq!(widget.tally(), VoteTally::new(-1, ViewerVote::Downvoted));
    }

    #[test]
    fn server_counts_win_over_optimistic_guess() {
        let mut widget = widget(VoteTally::new(3, ViewerVote::None));
        let BeginVote::Started(pending) = widget.begin(&signed_in(), VoteAction::Upvote).unwrap()
        else {
            panic!("expected a started vote");
        };
        assert_eq!(widget.tally().count, 4);

        // Someone else voted in the meantime.
        let counts = VoteCounts {
            number_of_upvotes: 9,
            number_of_devotes: 3,
        };
        widget.settle(pending.ticket, counts);
        assert_eq!(widget.tally(), VoteTally::new(6, ViewerVote::Upvoted));
    }
}
