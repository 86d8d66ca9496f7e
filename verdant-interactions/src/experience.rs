use tracing::{debug, info, warn};

use verdant_api::ExperienceService;
use verdant_api::model::experience::ExperiencePoints;
use verdant_core::{ActionError, Session, UserId};
use verdant_utils::formatting::format_level_summary;
use verdant_utils::leveling::{LevelState, level_state};

use crate::scope::{ScopeTicket, ViewScope};

/// Result of a confirmed experience award.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Award {
    pub before: LevelState,
    pub after: LevelState,
    pub experience_points: f64,
}

impl Award {
    pub fn leveled_up(&self) -> bool {
        self.after.level > self.before.level
    }
}

/// A user's experience total and the level derived from it.
///
/// The total is only ever taken from the backend; the level is recomputed
/// from it every time.
#[derive(Clone, Debug)]
pub struct LevelDisplay {
    user_id: UserId,
    experience_points: Option<f64>,
    scope: ViewScope,
}

impl LevelDisplay {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            experience_points: None,
            scope: ViewScope::new(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn experience_points(&self) -> Option<f64> {
        self.experience_points
    }

    pub fn level(&self) -> Option<LevelState> {
        self.experience_points.map(level_state)
    }

    pub fn progress(&self) -> Option<f64> {
        let points = self.experience_points?;
        Some(level_state(points).progress(points))
    }

    pub fn summary(&self) -> Option<String> {
        let points = self.experience_points?;
        Some(format_level_summary(points, &level_state(points)))
    }

    pub fn ticket(&self) -> ScopeTicket {
        self.scope.ticket()
    }

    pub fn unmount(&mut self) {
        self.scope.invalidate();
    }

    pub fn apply_points(&mut self, ticket: ScopeTicket, points: ExperiencePoints) -> bool {
        if !self.scope.is_current(ticket) {
            debug!(user_id = %self.user_id, "discarding stale experience total");
            return false;
        }
        self.experience_points = Some(points.experience_points);
        true
    }

    pub async fn refresh<S>(&mut self, service: &S) -> Result<LevelState, ActionError>
    where
        S: ExperienceService,
    {
        let ticket = self.ticket();
        let points = service
            .experience_points(&self.user_id)
            .await
            .map_err(|source| {
                warn!(?source, user_id = %self.user_id, "failed to fetch experience");
                ActionError::from(source)
            })?;

        self.apply_points(ticket, points);
        Ok(level_state(points.experience_points))
    }

    /// Ask the backend to add experience for the viewer and re-derive the level.
    ///
    /// Both sides of the award come from the viewer's confirmed total, which may
    /// differ from the total this display shows.
    pub async fn award<S>(
        &mut self,
        session: &Session,
        points: f64,
        service: &S,
    ) -> Result<Award, ActionError>
    where
        S: ExperienceService,
    {
        let viewer = session.require_viewer()?;

        let ticket = self.ticket();
        let confirmed = service
            .add_experience(viewer, points)
            .await
            .map_err(|source| {
                warn!(?source, viewer = %viewer, "failed to add experience");
                ActionError::from(source)
            })?;

        if viewer == &self.user_id {
            self.apply_points(ticket, confirmed);
        }

        let award = Award {
            before: level_state(confirmed.experience_points - points),
            after: level_state(confirmed.experience_points),
            experience_points: confirmed.experience_points,
        };
        if award.leveled_up() {
            info!(viewer = %viewer, level = award.after.level, "level up");
        }
        Ok(award)
    }
}
