//! Auth Session
//!
//! Explicit session context for one interaction cycle. A session starts
//! as [`AuthStatus::Unknown`] (or authenticated, when restored from a valid
//! cookie) and is moved by a login attempt:
//!
//! ```text
//! Unknown ──begin_login──▶ Pending ──succeed──▶ Authenticated
//!    ▲                        │
//!    │                        └────fail────▶ Failed ──begin_login──▶ Pending
//! ```

use serde::Serialize;

use super::error::{AuthError, AuthResult};

/// Authentication status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// No login attempted yet
    #[default]
    Unknown,
    /// Credentials submitted, not yet checked
    Pending,
    Authenticated,
    /// Last login attempt was rejected
    Failed,
}

/// Per-session authentication context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthSession {
    status: AuthStatus,
    username: Option<String>,
    display_name: Option<String>,
}

impl AuthSession {
    /// Fresh, unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Session restored for a known user
    pub fn authenticated(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            username: Some(username.into()),
            display_name: Some(display_name.into()),
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Credentials were submitted
    pub fn begin_login(&mut self) -> AuthResult<()> {
        match self.status {
            AuthStatus::Unknown | AuthStatus::Failed => {
                self.status = AuthStatus::Pending;
                Ok(())
            }
            from => Err(AuthError::InvalidTransition {
                from,
                to: AuthStatus::Pending,
            }),
        }
    }

    /// Credentials were accepted
    pub fn succeed(
        &mut self,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> AuthResult<()> {
        self.expect_pending(AuthStatus::Authenticated)?;
        self.status = AuthStatus::Authenticated;
        self.username = Some(username.into());
        self.display_name = Some(display_name.into());
        Ok(())
    }

    /// Credentials were rejected
    pub fn fail(&mut self) -> AuthResult<()> {
        self.expect_pending(AuthStatus::Failed)?;
        self.status = AuthStatus::Failed;
        self.username = None;
        self.display_name = None;
        Ok(())
    }

    fn expect_pending(&self, to: AuthStatus) -> AuthResult<()> {
        if self.status == AuthStatus::Pending {
            Ok(())
        } else {
            Err(AuthError::InvalidTransition {
                from: self.status,
                to,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let session = AuthSession::new();
        assert_eq!(session.status(), AuthStatus::Unknown);
        assert!(!session.is_authenticated());
        assert_eq!(session.username(), None);
        assert_eq!(session.display_name(), None);
    }

    #[test]
    fn test_successful_login() {
        let mut session = AuthSession::new();
        session.begin_login().unwrap();
        assert_eq!(session.status(), AuthStatus::Pending);

        session.succeed("anna", "Anna").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("anna"));
        assert_eq!(session.display_name(), Some("Anna"));
    }

    #[test]
    fn test_failed_login_can_retry() {
        let mut session = AuthSession::new();
        session.begin_login().unwrap();
        session.fail().unwrap();
        assert_eq!(session.status(), AuthStatus::Failed);
        assert!(!session.is_authenticated());
        assert_eq!(session.username(), None);

        session.begin_login().unwrap();
        session.succeed("anna", "Anna").unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_out_of_order_transitions() {
        let mut session = AuthSession::new();
        assert!(session.succeed("anna", "Anna").is_err());
        assert!(session.fail().is_err());

        let mut session = AuthSession::authenticated("anna", "Anna");
        assert_eq!(
            session.begin_login(),
            Err(AuthError::InvalidTransition {
                from: AuthStatus::Authenticated,
                to: AuthStatus::Pending,
            })
        );
        assert!(session.is_authenticated());
    }
}
