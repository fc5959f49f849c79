use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::api::handlers::{leagues, players, sessions, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/leagues", get(leagues::list_leagues).post(leagues::create_league))
        .route(
            "/api/leagues/:league/players",
            get(players::list_players).post(players::create_player),
        )
        .route("/api/leagues/:league/players/:player_id", get(players::get_player))
        .route(
            "/api/leagues/:league/players/:player_id/rating-history",
            get(players::rating_history),
        )
        .route(
            "/api/leagues/:league/players/:player_id/match-stats",
            get(players::match_stats),
        )
        .route(
            "/api/leagues/:league/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/api/leagues/:league/sessions/:session_id/players",
            post(sessions::add_roster_member),
        )
        .route(
            "/api/leagues/:league/sessions/:session_id/groups",
            get(sessions::get_groups).post(sessions::define_groups),
        )
        .route(
            "/api/leagues/:league/sessions/:session_id/matches",
            put(sessions::record_match_result),
        )
        .route(
            "/api/leagues/:league/sessions/:session_id/results",
            get(sessions::session_results),
        )
        .route(
            "/api/leagues/:league/sessions/:session_id/close",
            post(sessions::close_session),
        )
        .with_state(state)
}
