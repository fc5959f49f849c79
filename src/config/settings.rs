#[derive(Debug, Clone)]
pub struct RatingSettings {
    /// Points exchanged for a win between equally rated players
    pub baseline_points: i64,
    /// Share of the rating difference that shifts the baseline (BTTC uses 4%)
    pub difference_factor: f64,
    pub min_player_rating: i64,
    pub max_player_rating: i64,
    /// Display bonus applied to a player who won their group
    pub group_winner_bonus: i64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            baseline_points: 16,
            difference_factor: 0.04,
            min_player_rating: 100,
            max_player_rating: 3000,
            group_winner_bonus: 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeagueSettings {
    pub data_dir: &'static str,
    pub name_min_len: usize,
    pub name_max_len: usize,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            data_dir: "data",
            name_min_len: 4,
            name_max_len: 25,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub league: LeagueSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Prefer passing the config explicitly (Dependency Injection) rather than
// holding it in a global.
