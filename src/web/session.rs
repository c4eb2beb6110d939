//! Session extraction
//!
//! Resolves the [`AuthSession`] of a request from its session cookie.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};
use chrono::Utc;
use std::convert::Infallible;
use std::sync::Arc;

use super::state::AppState;
use crate::auth::{read_cookie, AuthSession};

/// Session of the current request; unauthenticated without a valid cookie
#[derive(Debug, Clone)]
pub struct CurrentSession(pub AuthSession);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let name = state.authenticator.cookie_name();
        let token = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| read_cookie(header, name));

        Ok(CurrentSession(
            state.authenticator.session_from_cookie(token, Utc::now()),
        ))
    }
}
