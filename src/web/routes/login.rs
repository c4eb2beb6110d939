//! Login Route
//!
//! - POST /login - Check credentials, set the session cookie

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use minijinja::context;
use std::sync::Arc;

use crate::auth::{AuthError, AuthSession};
use crate::web::dto::LoginForm;
use crate::web::error::{WebError, WebResult};
use crate::web::state::AppState;

/// POST /login
///
/// Redirects to the dashboard with a fresh cookie on success. On failure the
/// login form is shown again with an error and no cookie is set.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    // bcrypt is deliberately slow, keep it off the async workers
    let authenticator = Arc::clone(&state.authenticator);
    let (username, password) = (form.username.clone(), form.password);
    let session = tokio::task::spawn_blocking(move || {
        let mut session = AuthSession::new();
        authenticator
            .login(&mut session, &username, &password)
            .map(|_| session)
    })
    .await
    .map_err(|e| WebError::Internal(e.to_string()))??;

    match session.username() {
        Some(username) if session.is_authenticated() => {
            let token = state.authenticator.issue_token(username, Utc::now())?;
            let cookie = state.authenticator.set_cookie_header(&token);
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        _ => {
            let message = AuthError::InvalidCredentials.to_string();
            let page = render_login(&state, Some(&message), form.username.trim())?;
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
    }
}

/// Login page, optionally with an error message
pub(crate) fn render_login(
    state: &AppState,
    error: Option<&str>,
    username: &str,
) -> WebResult<Html<String>> {
    let html = state.templates.render(
        "login.html",
        context! {
            error => error,
            username => username,
        },
    )?;
    Ok(Html(html))
}
