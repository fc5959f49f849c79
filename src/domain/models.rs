use serde::{Deserialize, Serialize};

/// A league member with their current skill rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: i64,
    pub name: String,
    pub rating: i64,
    /// Set when the player won their group in the session being displayed
    pub won_group_number: Option<i64>,
}

impl Player {
    pub fn new(player_id: i64, name: impl Into<String>, rating: i64) -> Self {
        Self {
            player_id,
            name: name.into(),
            rating,
            won_group_number: None,
        }
    }

    /// Display rating with the group-winner bonus applied
    pub fn adjusted_rating(&self, bonus: i64) -> i64 {
        if self.won_group_number.is_some() {
            self.rating + bonus
        } else {
            self.rating
        }
    }
}

/// A skill bracket within one session, playing round-robin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub group_number: i64,
    pub players: Vec<Player>,
}

impl Group {
    pub fn new(group_number: i64) -> Self {
        Self {
            group_number,
            players: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.players.len()
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn highest_rated_player(&self) -> Option<&Player> {
        self.players.iter().max_by_key(|p| p.rating)
    }

    pub fn lowest_rated_player(&self) -> Option<&Player> {
        self.players.iter().min_by_key(|p| p.rating)
    }

    pub fn remove_player(&mut self, player_id: i64) {
        self.players.retain(|p| p.player_id != player_id);
    }
}

/// One head-to-head result between two group members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub player_one: Player,
    pub player_two: Player,
    pub wins_one: i64,
    pub wins_two: i64,
}

/// Read-model for one group's matches and members, derived on read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResult {
    pub group_number: i64,
    pub matches: Vec<Match>,
    pub players: Vec<Player>,
}

impl GroupResult {
    pub fn new(group_number: i64, matches: Vec<Match>) -> Self {
        Self {
            group_number,
            matches,
            players: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjusted_rating_applies_bonus_only_to_group_winners() {
        let mut player = Player::new(1, "Ola", 1500);
        assert_eq!(player.adjusted_rating(200), 1500);

        player.won_group_number = Some(2);
        assert_eq!(player.adjusted_rating(200), 1700);
    }

    #[test]
    fn group_tracks_membership_and_extremes() {
        let mut group = Group::new(1);
        group.add_player(Player::new(1, "Anna", 1800));
        group.add_player(Player::new(2, "Piotr", 1450));
        group.add_player(Player::new(3, "Marta", 1620));

        assert_eq!(group.size(), 3);
        assert_eq!(group.highest_rated_player().unwrap().player_id, 1);
        assert_eq!(group.lowest_rated_player().unwrap().player_id, 2);

        group.remove_player(2);
        assert_eq!(group.size(), 2);
        assert_eq!(group.lowest_rated_player().unwrap().player_id, 3);
    }
}
