//! Dashboard Route
//!
//! - GET / - Login form, or all three sections once authenticated

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use std::sync::Arc;

use crate::views::{CostsView, MapView, QuestionsView};
use crate::web::error::WebResult;
use crate::web::routes::login::render_login;
use crate::web::session::CurrentSession;
use crate::web::state::AppState;

/// GET /
///
/// Every view reloads its store on each request.
pub async fn index(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> WebResult<Response> {
    if !session.is_authenticated() {
        return Ok(render_login(&state, None, "")?.into_response());
    }

    let map = MapView::build(&state.destinations.load()?);
    let questions = QuestionsView::build(&state.questions.load()?);
    let costs = CostsView::build(&state.costs.load()?)?;

    let html = state.templates.render(
        "dashboard.html",
        context! {
            display_name => session.display_name().unwrap_or_default(),
            map_empty => map.is_empty(),
            points_json => map.points_json(),
            map => map,
            questions => questions,
            costs => costs,
        },
    )?;

    Ok(Html(html).into_response())
}
