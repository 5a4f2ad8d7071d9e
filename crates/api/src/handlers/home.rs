//! Handler for the portfolio home page.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub name: String,
    pub interests: Vec<String>,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Json<HomePage> {
    let site = &state.config.site;
    Json(HomePage {
        name: site.owner_name.clone(),
        interests: site.interests.clone(),
    })
}
