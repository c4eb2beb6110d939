//! Authentication error types

use thiserror::Error;

use super::session::AuthStatus;

/// Errors raised while authenticating a user or reading a session cookie
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown user or wrong password
    #[error("Username/password is incorrect")]
    InvalidCredentials,

    /// Session state machine was driven out of order
    #[error("Invalid session transition from {from:?} to {to:?}")]
    InvalidTransition { from: AuthStatus, to: AuthStatus },

    /// Cookie value does not have the expected shape
    #[error("Malformed session token")]
    MalformedToken,

    /// Cookie was not signed with the configured key
    #[error("Session token signature mismatch")]
    BadSignature,

    /// Cookie lifetime has elapsed
    #[error("Session token expired")]
    Expired,

    /// Cookie names a user that is no longer configured
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Cookie signing key cannot be used for HMAC
    #[error("Invalid cookie signing key")]
    InvalidKey,

    /// Cookie lifetime does not fit into a timestamp
    #[error("Cookie expiry is out of range")]
    InvalidExpiry,

    /// Password could not be hashed
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
