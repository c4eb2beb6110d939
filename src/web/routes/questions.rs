//! Question Routes
//!
//! - POST /questions - Add a question

use axum::{extract::State, response::Redirect, Form};
use std::sync::Arc;

use crate::views::QuestionSubmission;
use crate::web::error::WebResult;
use crate::web::session::CurrentSession;
use crate::web::state::AppState;

/// POST /questions
pub async fn add_question(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Form(submission): Form<QuestionSubmission>,
) -> WebResult<Redirect> {
    if !session.is_authenticated() {
        tracing::warn!("Rejected question from unauthenticated session");
        return Ok(Redirect::to("/"));
    }

    if let Some(line) = submission.into_line() {
        state.questions.append(&line)?;
    }

    Ok(Redirect::to("/#fragen"))
}
