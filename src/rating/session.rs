use std::collections::BTreeMap;

use log::info;

use super::bttc::adjust;
use super::types::{PlayedMatch, PlayerId, RatingChange, RatingSeeds};
use crate::config::settings::RatingSettings;
use crate::errors::LeagueError;

/// Apply the BTTC adjustment across all of a session's matches.
///
/// Matches are processed strictly in the order supplied; the accumulation is
/// order-dependent, since each side's delta is computed from its running
/// rating, already shifted by the player's earlier matches in this session.
/// Callers must therefore pass matches in a fixed, reproducible order.
///
/// Each player's running rating is seeded on first encounter from `seeds`;
/// a player with no resolvable entering rating fails the whole pass, so the
/// result is all-or-nothing.
pub fn apply_session(
    matches: &[PlayedMatch],
    seeds: &RatingSeeds,
    settings: &RatingSettings,
) -> Result<BTreeMap<PlayerId, RatingChange>, LeagueError> {
    let mut entering: BTreeMap<PlayerId, i64> = BTreeMap::new();
    let mut running: BTreeMap<PlayerId, i64> = BTreeMap::new();

    for m in matches {
        seed_player(m.player_one, seeds, &mut entering, &mut running)?;
        seed_player(m.player_two, seeds, &mut entering, &mut running)?;

        let rating_one = running[&m.player_one];
        let rating_two = running[&m.player_two];

        let delta_one = adjust(rating_one, m.wins_one, rating_two, m.wins_two, settings);
        let delta_two = adjust(rating_two, m.wins_two, rating_one, m.wins_one, settings);

        *running.get_mut(&m.player_one).unwrap() += delta_one;
        *running.get_mut(&m.player_two).unwrap() += delta_two;
    }

    info!(
        "Aggregated {} matches into rating changes for {} players",
        matches.len(),
        running.len()
    );

    Ok(running
        .into_iter()
        .map(|(player_id, new_rating)| {
            let change = RatingChange {
                previous_rating: entering[&player_id],
                new_rating,
            };
            (player_id, change)
        })
        .collect())
}

fn seed_player(
    player_id: PlayerId,
    seeds: &RatingSeeds,
    entering: &mut BTreeMap<PlayerId, i64>,
    running: &mut BTreeMap<PlayerId, i64>,
) -> Result<(), LeagueError> {
    if running.contains_key(&player_id) {
        return Ok(());
    }
    let rating = seeds
        .resolve(player_id)
        .ok_or(LeagueError::UnresolvedPlayer { player_id })?;
    entering.insert(player_id, rating);
    running.insert(player_id, rating);
    Ok(())
}
