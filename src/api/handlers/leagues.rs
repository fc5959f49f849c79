use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use super::{error_response, validation_error, AppState};
use crate::api::models::{CreateLeagueRequest, LeagueListResponse, LeagueResponse};

pub async fn create_league(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateLeagueRequest>,
) -> impl IntoResponse {
    let name = request.name.trim();
    let bounds = &state.config.league;
    if name.len() < bounds.name_min_len || name.len() > bounds.name_max_len {
        return validation_error(format!(
            "League name must be {}-{} characters",
            bounds.name_min_len, bounds.name_max_len
        ));
    }

    match state.leagues.create_league(name) {
        Ok(league) => Json(LeagueResponse { league }).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_leagues(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.leagues.list_leagues() {
        Ok(leagues) => Json(LeagueListResponse { leagues }).into_response(),
        Err(e) => error_response(e),
    }
}
