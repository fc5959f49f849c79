use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct PlayerRow {
    pub player_id: i64,
    pub name: String,
    pub rating: i64,
    pub dominant_hand: Option<String>,
    pub racket_type: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct SessionRow {
    pub session_id: i64,
    pub session_date: String,
    pub created_at: Option<NaiveDateTime>,
}

/// One roster member with their (possibly unassigned) group
#[derive(Debug, Clone)]
pub struct RosterRow {
    pub player_id: i64,
    pub name: String,
    pub rating: i64,
    pub group_number: Option<i64>,
}

/// Canonical match row joined with both players' identity and current rating
#[derive(Debug, Clone)]
pub struct MatchRow {
    pub session_id: i64,
    pub player_one_id: i64,
    pub player_one_name: String,
    pub player_one_rating: i64,
    pub player_one_wins: Option<i64>,
    pub player_two_id: i64,
    pub player_two_name: String,
    pub player_two_rating: i64,
    pub player_two_wins: Option<i64>,
    pub group_number: i64,
    pub ordinal: i64,
}

impl MatchRow {
    /// Flip the two sides, so the subject of a per-player query is always
    /// side one
    pub fn reversed(self) -> Self {
        Self {
            session_id: self.session_id,
            player_one_id: self.player_two_id,
            player_one_name: self.player_two_name,
            player_one_rating: self.player_two_rating,
            player_one_wins: self.player_two_wins,
            player_two_id: self.player_one_id,
            player_two_name: self.player_one_name,
            player_two_rating: self.player_one_rating,
            player_two_wins: self.player_one_wins,
            group_number: self.group_number,
            ordinal: self.ordinal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionRatingRow {
    pub player_id: i64,
    pub session_id: i64,
    pub previous_rating: i64,
    pub rating: i64,
    pub won_group: bool,
}

/// A point in a player's rating history, one per closed session
#[derive(Debug, Clone)]
pub struct RatingHistoryRow {
    pub session_id: i64,
    pub session_date: String,
    pub rating: i64,
}
