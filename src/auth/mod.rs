//! Authentication
//!
//! Login gate for the dashboard:
//!
//! - **session**: per-request [`AuthSession`] with explicit state transitions
//! - **authenticator**: credential checks and signed session cookies
//! - **error**: error types

pub mod authenticator;
pub mod error;
pub mod session;

pub use authenticator::{hash_password, hash_password_with_cost, is_bcrypt_hash, Authenticator};
pub use error::{AuthError, AuthResult};
pub use session::{AuthSession, AuthStatus};

/// Find the value of cookie `name` in a `Cookie` header value
pub fn read_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}
