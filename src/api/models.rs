use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeagueRequest {
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    pub league: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListResponse {
    pub leagues: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    pub name: String,
    pub rating: i64,
    pub dominant_hand: Option<String>,
    pub racket_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub player_id: i64,
    pub name: String,
    pub rating: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub session_date: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: i64,
    pub session_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRequest {
    pub player_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingRequest {
    pub num_groups: usize,
    pub min_per_group: Option<usize>,
    pub max_per_group: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub group_number: i64,
    pub players: Vec<PlayerResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub player_one: PlayerResponse,
    pub player_two: PlayerResponse,
    pub player_one_wins: i64,
    pub player_two_wins: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResultResponse {
    pub group_number: i64,
    pub players: Vec<PlayerResponse>,
    pub matches: Vec<MatchResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultRequest {
    pub player_one_id: i64,
    pub player_two_id: i64,
    pub player_one_wins: i64,
    pub player_two_wins: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOutcomeResponse {
    pub player_id: i64,
    pub name: String,
    pub previous_rating: i64,
    pub new_rating: i64,
    pub won_group: bool,
    pub display_rating: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResultsResponse {
    pub session_id: i64,
    pub outcomes: Vec<PlayerOutcomeResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPointResponse {
    pub session_id: i64,
    pub session_date: String,
    pub rating: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistoryResponse {
    pub player_id: i64,
    pub name: String,
    pub history: Vec<RatingPointResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentStatsResponse {
    pub opponent: PlayerResponse,
    pub match_wins: i64,
    pub match_losses: i64,
    pub match_win_pct: f64,
    pub game_wins: i64,
    pub game_losses: i64,
    pub game_win_pct: f64,
    pub total_matches: i64,
    pub total_games: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatsResponse {
    pub player_id: i64,
    pub name: String,
    pub opponents: Vec<OpponentStatsResponse>,
}
