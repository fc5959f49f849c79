use std::collections::VecDeque;

use crate::domain::{Group, Player};

impl Group {
    /// Schedule all round-robin matchups for this group.
    ///
    /// Every unordered pair of members appears exactly once. The raw
    /// combination order would front-load all of player one's matches, so the
    /// sequence is reordered by a zig-zag walk that alternates between the
    /// head and tail of the list, spreading each player's matches out.
    ///
    /// Empty and single-player groups produce no matches.
    pub fn make_matches(&self) -> Vec<(Player, Player)> {
        interleave(pair_combinations(&self.players))
    }
}

/// All C(n,2) unordered pairs, in lexicographic order of the slice
fn pair_combinations(players: &[Player]) -> Vec<(Player, Player)> {
    let mut pairs = Vec::new();
    for (idx, first) in players.iter().enumerate() {
        for second in &players[idx + 1..] {
            pairs.push((first.clone(), second.clone()));
        }
    }
    pairs
}

/// Reorder by alternately taking from the front and the back: the item at
/// output position i comes from input position 0, -1, 1, -2, 2, ...
fn interleave<T>(items: Vec<T>) -> Vec<T> {
    let mut remaining: VecDeque<T> = items.into();
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut from_front = true;

    while let Some(item) = if from_front {
        remaining.pop_front()
    } else {
        remaining.pop_back()
    } {
        ordered.push(item);
        from_front = !from_front;
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(n: usize) -> Group {
        let mut group = Group::new(1);
        for idx in 0..n {
            group.add_player(Player::new(idx as i64 + 1, format!("Player {}", idx + 1), 1500));
        }
        group
    }

    fn pair_ids(matches: &[(Player, Player)]) -> Vec<(i64, i64)> {
        matches
            .iter()
            .map(|(a, b)| (a.player_id, b.player_id))
            .collect()
    }

    #[test]
    fn empty_and_singleton_groups_have_no_matches() {
        assert!(group_of(0).make_matches().is_empty());
        assert!(group_of(1).make_matches().is_empty());
    }

    #[test]
    fn every_pair_appears_exactly_once() {
        for n in 2..=7 {
            let matches = group_of(n).make_matches();
            assert_eq!(matches.len(), n * (n - 1) / 2);

            let mut pairs: Vec<(i64, i64)> = matches
                .iter()
                .map(|(a, b)| {
                    let (lo, hi) = (a.player_id.min(b.player_id), a.player_id.max(b.player_id));
                    (lo, hi)
                })
                .collect();
            pairs.sort_unstable();
            pairs.dedup();
            assert_eq!(pairs.len(), n * (n - 1) / 2, "duplicate pair for n={n}");
        }
    }

    #[test]
    fn three_players_alternate_sides() {
        let matches = group_of(3).make_matches();
        assert_eq!(pair_ids(&matches), vec![(1, 2), (2, 3), (1, 3)]);
    }

    #[test]
    fn four_players_follow_zig_zag_order() {
        let matches = group_of(4).make_matches();
        assert_eq!(
            pair_ids(&matches),
            vec![(1, 2), (3, 4), (1, 3), (2, 4), (1, 4), (2, 3)]
        );
    }

    #[test]
    fn opening_matches_share_no_player_for_even_groups() {
        let matches = group_of(4).make_matches();
        let (a, b) = (&matches[0], &matches[1]);
        let first = [a.0.player_id, a.1.player_id];
        assert!(!first.contains(&b.0.player_id));
        assert!(!first.contains(&b.1.player_id));
    }

    #[test]
    fn no_player_opens_with_back_to_back_matches() {
        // Raw combination order would give player 1 the first n-1 matches in
        // a row; the zig-zag must break that up for everyone.
        for n in 4..=7 {
            let matches = group_of(n).make_matches();
            let (first, second) = (&matches[0], &matches[1]);
            let first_ids = [first.0.player_id, first.1.player_id];
            assert!(
                !first_ids.contains(&second.0.player_id)
                    && !first_ids.contains(&second.1.player_id),
                "player repeats across opening matches for n={n}"
            );
        }
    }
}
