use thiserror::Error;

/// Failure of a user-initiated action.
///
/// Every variant is caught where the remote call is made and turned into a
/// [`Notice`]; none of them are meant to reach a global error boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// A mutating action was attempted without a viewer identity.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The backend answered with a non-success status or could not be reached.
    #[error("remote request failed: {0}")]
    Remote(String),

    /// The backend answered, but not with the shape we expected.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ActionError {
    /// The user may always retry manually; nothing is retried automatically.
    pub fn is_retryable_by_user(&self) -> bool {
        true
    }

    pub fn notice(&self) -> Notice {
        match self {
            Self::AuthenticationRequired => Notice {
                kind: NoticeKind::LoginPrompt,
                message: "Please log in to continue.".to_owned(),
            },
            Self::Remote(_) => Notice {
                kind: NoticeKind::Error,
                message: "Something went wrong. Please try again.".to_owned(),
            },
            Self::MalformedResponse(_) => Notice {
                kind: NoticeKind::Error,
                message: "The server sent an unexpected response. Please try again.".to_owned(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    LoginPrompt,
    Error,
}

/// A transient, user-visible notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl From<&ActionError> for Notice {
    fn from(error: &ActionError) -> Self {
        error.notice()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionError, Notice, NoticeKind};

    #[test]
    fn missing_identity_becomes_login_prompt() {
        let notice = ActionError::AuthenticationRequired.notice();
        assert_eq!(notice.kind, NoticeKind::LoginPrompt);
    }

    #[test]
    fn remote_and_malformed_become_error_notices() {
        let remote = Notice::from(&ActionError::Remote("503".to_owned()));
        let malformed = Notice::from(&ActionError::MalformedResponse("missing field".to_owned()));

        assert_eq!(remote.kind, NoticeKind::Error);
        assert_eq!(malformed.kind, NoticeKind::Error);
        assert_ne!(remote.message, malformed.message);
    }

    #[test]
    fn every_error_is_retryable_by_hand() {
        assert!(ActionError::AuthenticationRequired.is_retryable_by_user());
        assert!(ActionError::Remote(String::new()).is_retryable_by_user());
        assert!(ActionError::MalformedResponse(String::new()).is_retryable_by_user());
    }
}
