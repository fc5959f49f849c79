use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type PlayerId = i64;

/// One recorded match, reduced to what the rating engine needs
#[derive(Debug, Clone)]
pub struct PlayedMatch {
    pub player_one: PlayerId,
    pub wins_one: i64,
    pub player_two: PlayerId,
    pub wins_two: i64,
}

/// A player's rating snapshot across one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub previous_rating: i64,
    pub new_rating: i64,
}

/// Entering-rating sources for a session's aggregation pass.
///
/// A prior snapshot (an already-written session rating for this session)
/// takes precedence over the player's current rating, which keeps
/// reprocessing a closed session idempotent.
#[derive(Debug, Clone, Default)]
pub struct RatingSeeds {
    current: HashMap<PlayerId, i64>,
    snapshots: HashMap<PlayerId, i64>,
}

impl RatingSeeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_rating(&mut self, player_id: PlayerId, rating: i64) {
        self.current.insert(player_id, rating);
    }

    pub fn set_session_snapshot(&mut self, player_id: PlayerId, previous_rating: i64) {
        self.snapshots.insert(player_id, previous_rating);
    }

    pub fn resolve(&self, player_id: PlayerId) -> Option<i64> {
        self.snapshots
            .get(&player_id)
            .or_else(|| self.current.get(&player_id))
            .copied()
    }
}
