use tracing::{debug, info};

use crate::{ActionError, UserId};

/// Who is acting.
///
/// Passed explicitly to every operation that needs a viewer. It is written
/// once at log in and once at log out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    viewer: Option<UserId>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { viewer: None }
    }

    pub fn signed_in(viewer: UserId) -> Self {
        Self {
            viewer: Some(viewer),
        }
    }

    pub fn log_in(&mut self, viewer: UserId) {
        info!(viewer = %viewer, "viewer logged in");
        self.viewer = Some(viewer);
    }

    pub fn log_out(&mut self) {
        if let Some(previous) = self.viewer.take() {
            info!(viewer = %previous, "viewer logged out");
        }
    }

    pub fn viewer(&self) -> Option<&UserId> {
        self.viewer.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.viewer.is_some()
    }

    /// Return the acting viewer or fail with [`ActionError::AuthenticationRequired`].
    pub fn require_viewer(&self) -> Result<&UserId, ActionError> {
        match &self.viewer {
            Some(viewer) => Ok(viewer),
            None => {
                debug!("action attempted without a viewer identity");
                Err(ActionError::AuthenticationRequired)
            }
        }
    }
}
