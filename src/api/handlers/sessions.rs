use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::players::league_connection;
use super::{error_response, AppState};
use crate::api::models::{
    CreateSessionRequest, GroupResponse, GroupResultResponse, GroupingRequest, MatchResponse,
    MatchResultRequest, PlayerOutcomeResponse, PlayerResponse, RosterRequest,
    SessionResponse, SessionResultsResponse,
};
use crate::database;
use crate::domain::{Group, GroupResult, Player};
use crate::services::sessions::{PlayerOutcome, SessionService};

fn to_session_response(row: database::SessionRow) -> SessionResponse {
    SessionResponse {
        session_id: row.session_id,
        session_date: row.session_date,
    }
}

fn to_player_response(player: &Player) -> PlayerResponse {
    PlayerResponse {
        player_id: player.player_id,
        name: player.name.clone(),
        rating: player.rating,
    }
}

fn to_group_response(group: &Group) -> GroupResponse {
    GroupResponse {
        group_number: group.group_number,
        players: group.players.iter().map(to_player_response).collect(),
    }
}

fn to_group_result_response(result: &GroupResult) -> GroupResultResponse {
    GroupResultResponse {
        group_number: result.group_number,
        players: result.players.iter().map(to_player_response).collect(),
        matches: result
            .matches
            .iter()
            .map(|m| MatchResponse {
                player_one: to_player_response(&m.player_one),
                player_two: to_player_response(&m.player_two),
                player_one_wins: m.wins_one,
                player_two_wins: m.wins_two,
            })
            .collect(),
    }
}

fn to_outcome_response(outcome: &PlayerOutcome) -> PlayerOutcomeResponse {
    PlayerOutcomeResponse {
        player_id: outcome.player_id,
        name: outcome.name.clone(),
        previous_rating: outcome.previous_rating,
        new_rating: outcome.new_rating,
        won_group: outcome.won_group,
        display_rating: outcome.display_rating,
    }
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Path(league): Path<String>,
    Json(request): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    match database::sessions::insert_session(&conn, &request.session_date) {
        Ok(row) => (StatusCode::CREATED, Json(to_session_response(row))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Path(league): Path<String>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    match database::sessions::list_all(&conn) {
        Ok(rows) => {
            let sessions: Vec<SessionResponse> =
                rows.into_iter().map(to_session_response).collect();
            Json(sessions).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn add_roster_member(
    State(state): State<Arc<AppState>>,
    Path((league, session_id)): Path<(String, i64)>,
    Json(request): Json<RosterRequest>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    if let Err(e) = require_player(&conn, request.player_id) {
        return error_response(e);
    }

    match database::sessions::add_roster_member(&conn, session_id, request.player_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

fn require_player(conn: &database::DbConn, player_id: i64) -> anyhow::Result<()> {
    database::players::find_by_id(conn, player_id)?
        .map(|_| ())
        .ok_or_else(|| crate::errors::LeagueError::PlayerNotFound { player_id }.into())
}

/// Run the grouper for a session and persist assignments plus the match plan
pub async fn define_groups(
    State(state): State<Arc<AppState>>,
    Path((league, session_id)): Path<(String, i64)>,
    Json(request): Json<GroupingRequest>,
) -> impl IntoResponse {
    let mut conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    let service = SessionService::new(state.config.clone());
    match service.define_groups(
        &mut conn,
        session_id,
        request.num_groups,
        request.min_per_group,
        request.max_per_group,
    ) {
        Ok(groups) => {
            let response: Vec<GroupResponse> = groups.iter().map(to_group_response).collect();
            Json(response).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_groups(
    State(state): State<Arc<AppState>>,
    Path((league, session_id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    let service = SessionService::new(state.config.clone());
    match service.group_results(&conn, session_id) {
        Ok(results) => {
            let response: Vec<GroupResultResponse> =
                results.iter().map(to_group_result_response).collect();
            Json(response).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn record_match_result(
    State(state): State<Arc<AppState>>,
    Path((league, session_id)): Path<(String, i64)>,
    Json(request): Json<MatchResultRequest>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    if request.player_one_wins < 0 || request.player_two_wins < 0 {
        return super::validation_error("Win counts cannot be negative");
    }

    match database::matches::record_result(
        &conn,
        session_id,
        request.player_one_id,
        request.player_two_id,
        request.player_one_wins,
        request.player_two_wins,
    ) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Rating changes the session would produce, without persisting anything
pub async fn session_results(
    State(state): State<Arc<AppState>>,
    Path((league, session_id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    let service = SessionService::new(state.config.clone());
    match service.preview_close(&conn, session_id) {
        Ok(outcomes) => Json(SessionResultsResponse {
            session_id,
            outcomes: outcomes.iter().map(to_outcome_response).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Close the session: persist one rating snapshot per player and move
/// current ratings. Safe to call again.
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path((league, session_id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let mut conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    let service = SessionService::new(state.config.clone());
    match service.close_session(&mut conn, session_id) {
        Ok(outcomes) => Json(SessionResultsResponse {
            session_id,
            outcomes: outcomes.iter().map(to_outcome_response).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
