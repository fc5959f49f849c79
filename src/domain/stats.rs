use std::collections::BTreeMap;

use serde::Serialize;

use super::models::{Match, Player};

/// Head-to-head record of one player against a single opponent
#[derive(Debug, Clone, Serialize)]
pub struct OpponentSummary {
    pub opponent: Player,
    pub match_wins: i64,
    pub match_losses: i64,
    pub match_win_pct: f64,
    pub game_wins: i64,
    pub game_losses: i64,
    pub game_win_pct: f64,
    pub total_matches: i64,
    pub total_games: i64,
}

impl OpponentSummary {
    fn new(opponent: Player) -> Self {
        Self {
            opponent,
            match_wins: 0,
            match_losses: 0,
            match_win_pct: 0.0,
            game_wins: 0,
            game_losses: 0,
            game_win_pct: 0.0,
            total_matches: 0,
            total_games: 0,
        }
    }
}

/// Roll up a player's matches into per-opponent records.
///
/// Every match must have the subject player as `player_one`. A tie in wins
/// counts as neither a match win nor a match loss. Percentages over an empty
/// record are 0 rather than a division error.
pub fn summarize_opponents(matches: &[Match]) -> Vec<OpponentSummary> {
    let mut by_opponent: BTreeMap<i64, OpponentSummary> = BTreeMap::new();

    for m in matches {
        let entry = by_opponent
            .entry(m.player_two.player_id)
            .or_insert_with(|| OpponentSummary::new(m.player_two.clone()));

        if m.wins_one > m.wins_two {
            entry.match_wins += 1;
        } else if m.wins_two > m.wins_one {
            entry.match_losses += 1;
        }
        entry.game_wins += m.wins_one;
        entry.game_losses += m.wins_two;
        entry.total_matches += 1;
        entry.total_games += m.wins_one + m.wins_two;
    }

    let mut summaries: Vec<OpponentSummary> = by_opponent.into_values().collect();
    for summary in &mut summaries {
        summary.match_win_pct = percentage(summary.match_wins, summary.total_matches);
        summary.game_win_pct = percentage(summary.game_wins, summary.total_games);
    }
    summaries
}

fn percentage(part: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = part as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_against(opponent_id: i64, wins_one: i64, wins_two: i64) -> Match {
        Match {
            player_one: Player::new(1, "Subject", 1500),
            player_two: Player::new(opponent_id, format!("Opponent {opponent_id}"), 1500),
            wins_one,
            wins_two,
        }
    }

    #[test]
    fn accumulates_per_opponent_records() {
        let matches = vec![
            match_against(2, 3, 1),
            match_against(2, 0, 3),
            match_against(3, 3, 2),
        ];

        let summaries = summarize_opponents(&matches);
        assert_eq!(summaries.len(), 2);

        let versus_two = &summaries[0];
        assert_eq!(versus_two.opponent.player_id, 2);
        assert_eq!(versus_two.match_wins, 1);
        assert_eq!(versus_two.match_losses, 1);
        assert_eq!(versus_two.match_win_pct, 50.0);
        assert_eq!(versus_two.game_wins, 3);
        assert_eq!(versus_two.game_losses, 4);
        assert_eq!(versus_two.total_games, 7);
        assert_eq!(versus_two.game_win_pct, 42.9);

        let versus_three = &summaries[1];
        assert_eq!(versus_three.match_wins, 1);
        assert_eq!(versus_three.match_win_pct, 100.0);
    }

    #[test]
    fn tie_counts_as_neither_win_nor_loss() {
        let summaries = summarize_opponents(&[match_against(2, 1, 1)]);
        assert_eq!(summaries[0].match_wins, 0);
        assert_eq!(summaries[0].match_losses, 0);
        assert_eq!(summaries[0].total_matches, 1);
        assert_eq!(summaries[0].match_win_pct, 0.0);
    }

    #[test]
    fn empty_record_yields_zero_percentages() {
        let summaries = summarize_opponents(&[match_against(2, 0, 0)]);
        assert_eq!(summaries[0].total_games, 0);
        assert_eq!(summaries[0].game_win_pct, 0.0);
        assert_eq!(summaries[0].match_win_pct, 0.0);
    }
}
