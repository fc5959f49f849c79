/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Typed failures surfaced by the grouping and rating cores
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("Grouping constraints cannot be satisfied: {reason}")]
    ConstraintUnsatisfiable { reason: String },

    #[error("No entering rating could be resolved for player {player_id}")]
    UnresolvedPlayer { player_id: i64 },

    #[error("League not found: {league}")]
    LeagueNotFound { league: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: i64 },

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: i64 },

    #[error("No match recorded for players {player_one_id} and {player_two_id} in session {session_id}")]
    MatchNotFound {
        session_id: i64,
        player_one_id: i64,
        player_two_id: i64,
    },
}

impl LeagueError {
    pub fn constraint(reason: impl Into<String>) -> Self {
        LeagueError::ConstraintUnsatisfiable {
            reason: reason.into(),
        }
    }
}
