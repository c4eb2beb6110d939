//! Destination Routes
//!
//! - POST /destinations - Add a destination to the map

use axum::{extract::State, response::Redirect, Form};
use std::sync::Arc;

use crate::views::DestinationSubmission;
use crate::web::error::WebResult;
use crate::web::session::CurrentSession;
use crate::web::state::AppState;

/// POST /destinations
///
/// Appends the submitted destination and sends the browser back to the
/// dashboard. Empty names and unauthenticated requests append nothing.
pub async fn add_destination(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Form(submission): Form<DestinationSubmission>,
) -> WebResult<Redirect> {
    if !session.is_authenticated() {
        tracing::warn!("Rejected destination from unauthenticated session");
        return Ok(Redirect::to("/"));
    }

    if let Some(destination) = submission.into_destination()? {
        state.destinations.append(&destination)?;
    }

    Ok(Redirect::to("/#karte"))
}
