use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::{error_response, validation_error, AppState};
use crate::api::models::{
    CreatePlayerRequest, MatchStatsResponse, OpponentStatsResponse, PlayerResponse,
    RatingHistoryResponse, RatingPointResponse,
};
use crate::database::{self, PlayerRow};
use crate::domain::{self, Player};

fn to_player_response(row: PlayerRow) -> PlayerResponse {
    PlayerResponse {
        player_id: row.player_id,
        name: row.name,
        rating: row.rating,
    }
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Path(league): Path<String>,
    Json(request): Json<CreatePlayerRequest>,
) -> impl IntoResponse {
    let name = request.name.trim();
    if name.is_empty() {
        return validation_error("Player name is required");
    }
    let bounds = &state.config.rating;
    if request.rating < bounds.min_player_rating || request.rating > bounds.max_player_rating {
        return validation_error(format!(
            "Rating must be between {} and {}",
            bounds.min_player_rating, bounds.max_player_rating
        ));
    }

    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    match database::players::insert_player(
        &conn,
        name,
        request.rating,
        request.dominant_hand.as_deref(),
        request.racket_type.as_deref(),
    ) {
        Ok(row) => (StatusCode::CREATED, Json(to_player_response(row))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Path(league): Path<String>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    match database::players::list_all(&conn) {
        Ok(rows) => {
            let players: Vec<PlayerResponse> = rows.into_iter().map(to_player_response).collect();
            Json(players).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path((league, player_id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    match database::players::find_by_id(&conn, player_id) {
        Ok(Some(row)) => Json(to_player_response(row)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => error_response(e),
    }
}

/// Rating after each closed session, the data series behind a history chart
pub async fn rating_history(
    State(state): State<Arc<AppState>>,
    Path((league, player_id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    let player = match database::players::find_by_id(&conn, player_id) {
        Ok(Some(row)) => row,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => return error_response(e),
    };

    match database::ratings::history(&conn, player_id) {
        Ok(points) => Json(RatingHistoryResponse {
            player_id,
            name: player.name,
            history: points
                .into_iter()
                .map(|p| RatingPointResponse {
                    session_id: p.session_id,
                    session_date: p.session_date,
                    rating: p.rating,
                })
                .collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Per-opponent win/loss rollup across all of a player's recorded matches
pub async fn match_stats(
    State(state): State<Arc<AppState>>,
    Path((league, player_id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let conn = match league_connection(&state, &league) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    let player = match database::players::find_by_id(&conn, player_id) {
        Ok(Some(row)) => row,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => return error_response(e),
    };

    let rows = match database::matches::list_by_player(&conn, player_id) {
        Ok(rows) => rows,
        Err(e) => return error_response(e),
    };

    let matches: Vec<domain::Match> = rows
        .into_iter()
        .map(|row| domain::Match {
            player_one: Player::new(row.player_one_id, row.player_one_name.clone(), row.player_one_rating),
            player_two: Player::new(row.player_two_id, row.player_two_name.clone(), row.player_two_rating),
            wins_one: row.player_one_wins.unwrap_or(0),
            wins_two: row.player_two_wins.unwrap_or(0),
        })
        .collect();

    let opponents = domain::summarize_opponents(&matches)
        .into_iter()
        .map(|summary| OpponentStatsResponse {
            opponent: PlayerResponse {
                player_id: summary.opponent.player_id,
                name: summary.opponent.name,
                rating: summary.opponent.rating,
            },
            match_wins: summary.match_wins,
            match_losses: summary.match_losses,
            match_win_pct: summary.match_win_pct,
            game_wins: summary.game_wins,
            game_losses: summary.game_losses,
            game_win_pct: summary.game_win_pct,
            total_matches: summary.total_matches,
            total_games: summary.total_games,
        })
        .collect();

    Json(MatchStatsResponse {
        player_id,
        name: player.name,
        opponents,
    })
    .into_response()
}

pub fn league_connection(
    state: &AppState,
    league: &str,
) -> anyhow::Result<crate::database::DbConn> {
    let pool = state.leagues.pool(league)?;
    database::get_connection(&pool)
}
