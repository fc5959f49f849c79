use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::settings::AppConfig;
use crate::database::LeagueStore;
use crate::errors::LeagueError;

pub mod leagues;
pub mod players;
pub mod sessions;

pub struct AppState {
    pub leagues: LeagueStore,
    pub config: AppConfig,
}

/// Map a failure to an HTTP response, turning the typed domain errors into
/// client-facing statuses and everything else into a 500
pub fn error_response(err: anyhow::Error) -> Response {
    let status = match err.downcast_ref::<LeagueError>() {
        Some(LeagueError::ConstraintUnsatisfiable { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(LeagueError::UnresolvedPlayer { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(LeagueError::LeagueNotFound { .. })
        | Some(LeagueError::PlayerNotFound { .. })
        | Some(LeagueError::SessionNotFound { .. })
        | Some(LeagueError::MatchNotFound { .. }) => StatusCode::NOT_FOUND,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, format!("{err}")).into_response()
}

pub fn validation_error(message: impl Into<String>) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, message.into()).into_response()
}
