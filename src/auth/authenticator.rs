//! Authenticator
//!
//! Checks login credentials against the configured users and issues the
//! signed session cookie that keeps a user logged in across page reloads.
//!
//! Passwords are stored as bcrypt hashes, the same format the config files
//! of the original login library use.
//!
//! # Token format
//!
//! ```text
//! base64url(username) "." expires_unix "." base64url(hmac_sha256)
//! ```
//!
//! The HMAC covers everything before the last dot.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::BTreeMap;

use super::error::{AuthError, AuthResult};
use super::session::AuthSession;
use crate::config::{Config, CookieConfig, Credentials, UserEntry};

type HmacSha256 = Hmac<Sha256>;

/// Prefixes of the bcrypt variants accepted in the config file
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// bcrypt hash of a password, as stored in the config file
pub fn hash_password(password: &str) -> AuthResult<String> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST)
}

/// bcrypt hash with an explicit work factor
pub fn hash_password_with_cost(password: &str, cost: u32) -> AuthResult<String> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hash(e.to_string()))
}

/// Whether `value` looks like a bcrypt hash (`$2a$`, `$2b$` or `$2y$`)
pub fn is_bcrypt_hash(value: &str) -> bool {
    value.len() == 60 && BCRYPT_PREFIXES.iter().any(|p| value.starts_with(p))
}

/// Login and cookie handling for the configured users
#[derive(Debug, Clone)]
pub struct Authenticator {
    users: BTreeMap<String, UserEntry>,
    cookie: CookieConfig,
}

impl Authenticator {
    pub fn new(credentials: &Credentials, cookie: &CookieConfig) -> Self {
        let users = credentials
            .usernames
            .iter()
            .map(|(name, entry)| (name.to_lowercase(), entry.clone()))
            .collect();

        Self {
            users,
            cookie: cookie.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.credentials, &config.cookie)
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Look up `username` and check the password against its bcrypt hash.
    ///
    /// Usernames are matched case-insensitively. Returns the canonical
    /// username and its entry.
    pub fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<(&str, &UserEntry)> {
        let key = username.trim().to_lowercase();
        let (name, user) = self
            .users
            .get_key_value(&key)
            .ok_or(AuthError::InvalidCredentials)?;

        match bcrypt::verify(password, &user.password) {
            Ok(true) => Ok((name.as_str(), user)),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(e) => {
                tracing::warn!(username = %name, error = %e, "Unreadable password hash");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Drive `session` through one login attempt.
    ///
    /// Leaves the session `Authenticated` or `Failed`; a rejected password is
    /// not an error of this call.
    pub fn login(
        &self,
        session: &mut AuthSession,
        username: &str,
        password: &str,
    ) -> AuthResult<()> {
        session.begin_login()?;

        match self.verify_credentials(username, password) {
            Ok((name, user)) => {
                tracing::info!(username = %name, "Login succeeded");
                session.succeed(name, user.name.clone())
            }
            Err(_) => {
                tracing::warn!(username = %username.trim(), "Login failed");
                session.fail()
            }
        }
    }

    /// Issue a signed session token for `username`
    pub fn issue_token(&self, username: &str, now: DateTime<Utc>) -> AuthResult<String> {
        let expires = Duration::try_seconds(self.cookie.max_age_secs())
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(AuthError::InvalidExpiry)?;

        let payload = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(username.as_bytes()),
            expires.timestamp()
        );
        let signature = URL_SAFE_NO_PAD.encode(self.mac(&payload)?.finalize().into_bytes());
        Ok(format!("{}.{}", payload, signature))
    }

    /// Verify a session token and return the session it stands for
    pub fn verify_token(&self, token: &str, now: DateTime<Utc>) -> AuthResult<AuthSession> {
        let (payload, signature) = token.rsplit_once('.').ok_or(AuthError::MalformedToken)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::MalformedToken)?;

        self.mac(payload)?
            .verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let (encoded_user, expires) = payload.split_once('.').ok_or(AuthError::MalformedToken)?;
        let expires: i64 = expires.parse().map_err(|_| AuthError::MalformedToken)?;
        if now.timestamp() >= expires {
            return Err(AuthError::Expired);
        }

        let username = URL_SAFE_NO_PAD
            .decode(encoded_user)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or(AuthError::MalformedToken)?;

        let user = self
            .users
            .get(&username)
            .ok_or_else(|| AuthError::UnknownUser(username.clone()))?;

        Ok(AuthSession::authenticated(username, user.name.clone()))
    }

    /// Session for an incoming request, given its cookie value if any
    pub fn session_from_cookie(&self, token: Option<&str>, now: DateTime<Utc>) -> AuthSession {
        let Some(token) = token else {
            return AuthSession::new();
        };

        match self.verify_token(token, now) {
            Ok(session) => session,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring session cookie");
                AuthSession::new()
            }
        }
    }

    /// `Set-Cookie` header value carrying `token`
    pub fn set_cookie_header(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.cookie.name,
            token,
            self.cookie.max_age_secs()
        )
    }

    fn mac(&self, payload: &str) -> AuthResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.cookie.key.as_bytes())
            .map_err(|_| AuthError::InvalidKey)?;
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthStatus;
    use chrono::TimeZone;

    /// Lowest bcrypt work factor, keeps the tests fast
    const TEST_COST: u32 = 4;

    fn cookie(expiry_days: f64) -> CookieConfig {
        CookieConfig {
            name: "test_auth".to_string(),
            key: "signing-key".to_string(),
            expiry_days,
        }
    }

    fn test_authenticator() -> Authenticator {
        let mut usernames = BTreeMap::new();
        usernames.insert(
            "Anna".to_string(),
            UserEntry {
                name: "Anna Berg".to_string(),
                password: hash_password_with_cost("secret", TEST_COST).unwrap(),
                email: None,
            },
        );

        Authenticator::new(&Credentials { usernames }, &cookie(1.0))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_hash_password_is_salted_bcrypt() {
        let first = hash_password_with_cost("secret", TEST_COST).unwrap();
        let second = hash_password_with_cost("secret", TEST_COST).unwrap();

        assert!(is_bcrypt_hash(&first));
        assert_ne!(first, second);
        assert!(bcrypt::verify("secret", &first).unwrap());
    }

    #[test]
    fn test_is_bcrypt_hash() {
        let hash = hash_password_with_cost("secret", TEST_COST).unwrap();
        assert!(is_bcrypt_hash(&hash));
        assert!(is_bcrypt_hash(&hash.replacen("$2b$", "$2y$", 1)));
        assert!(!is_bcrypt_hash(
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        ));
        assert!(!is_bcrypt_hash("hunter2"));
    }

    #[test]
    fn test_verify_credentials() {
        let auth = test_authenticator();

        let (name, user) = auth.verify_credentials(" anna ", "secret").unwrap();
        assert_eq!(name, "anna");
        assert_eq!(user.name, "Anna Berg");

        assert_eq!(
            auth.verify_credentials("anna", "wrong").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            auth.verify_credentials("bob", "secret").unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn test_verify_credentials_with_2y_hash() {
        let mut usernames = BTreeMap::new();
        usernames.insert(
            "anna".to_string(),
            UserEntry {
                name: "Anna".to_string(),
                password: hash_password_with_cost("secret", TEST_COST)
                    .unwrap()
                    .replacen("$2b$", "$2y$", 1),
                email: None,
            },
        );
        let auth = Authenticator::new(&Credentials { usernames }, &cookie(1.0));

        assert!(auth.verify_credentials("anna", "secret").is_ok());
    }

    #[test]
    fn test_login_transitions() {
        let auth = test_authenticator();

        let mut session = AuthSession::new();
        auth.login(&mut session, "anna", "secret").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.display_name(), Some("Anna Berg"));

        let mut session = AuthSession::new();
        auth.login(&mut session, "anna", "nope").unwrap();
        assert_eq!(session.status(), AuthStatus::Failed);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_token_roundtrip() {
        let auth = test_authenticator();
        let token = auth.issue_token("anna", now()).unwrap();

        let session = auth.verify_token(&token, now()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("anna"));
    }

    #[test]
    fn test_token_expired() {
        let auth = test_authenticator();
        let token = auth.issue_token("anna", now()).unwrap();
        let later = now() + Duration::days(2);

        assert_eq!(auth.verify_token(&token, later), Err(AuthError::Expired));
    }

    #[test]
    fn test_token_tampered() {
        let auth = test_authenticator();
        let token = auth.issue_token("anna", now()).unwrap();
        let forged = format!(
            "{}{}",
            URL_SAFE_NO_PAD.encode("bob"),
            &token[token.find('.').unwrap()..]
        );

        assert_eq!(auth.verify_token(&forged, now()), Err(AuthError::BadSignature));
        assert_eq!(auth.verify_token("garbage", now()), Err(AuthError::MalformedToken));
    }

    #[test]
    fn test_token_signed_with_other_key() {
        let auth = test_authenticator();
        let mut other_cookie = cookie(1.0);
        other_cookie.key = "another-key".to_string();
        let other = Authenticator::new(&Credentials::default(), &other_cookie);

        let token = other.issue_token("anna", now()).unwrap();
        assert_eq!(auth.verify_token(&token, now()), Err(AuthError::BadSignature));
    }

    #[test]
    fn test_huge_expiry_does_not_panic() {
        let auth = Authenticator::new(&Credentials::default(), &cookie(1e300));
        assert_eq!(auth.issue_token("anna", now()), Err(AuthError::InvalidExpiry));
    }

    #[test]
    fn test_session_from_cookie_falls_back_to_unknown() {
        let auth = test_authenticator();
        assert_eq!(auth.session_from_cookie(None, now()).status(), AuthStatus::Unknown);
        assert_eq!(
            auth.session_from_cookie(Some("x.y.z"), now()).status(),
            AuthStatus::Unknown
        );
    }

    #[test]
    fn test_set_cookie_header() {
        let auth = test_authenticator();
        let header = auth.set_cookie_header("tok");
        assert!(header.starts_with("test_auth=tok;"));
        assert!(header.contains("Max-Age=86400"));
        assert!(header.contains("HttpOnly"));
    }
}
