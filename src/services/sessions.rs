use std::collections::HashMap;

use anyhow::Result;
use log::info;

use crate::config::settings::AppConfig;
use crate::database::{self, DbConn, MatchRow};
use crate::domain::{Group, GroupResult, Match, Player};
use crate::errors::LeagueError;
use crate::grouping::make_groups;
use crate::rating::{apply_session, PlayedMatch, RatingSeeds};

/// A player's final line on the session results sheet
#[derive(Debug, Clone)]
pub struct PlayerOutcome {
    pub player_id: i64,
    pub name: String,
    pub previous_rating: i64,
    pub new_rating: i64,
    pub won_group: bool,
    /// New rating with the group-winner display bonus applied
    pub display_rating: i64,
}

/// Orchestrates a session's lifecycle: group definition, schedule seeding,
/// and the rating pass at session close.
pub struct SessionService {
    config: AppConfig,
}

impl SessionService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the grouper over the session roster, persist the assignments and
    /// seed the match schedule. Existing results survive regrouping.
    pub fn define_groups(
        &self,
        conn: &mut DbConn,
        session_id: i64,
        num_groups: usize,
        min_per_group: Option<usize>,
        max_per_group: Option<usize>,
    ) -> Result<Vec<Group>> {
        self.require_session(conn, session_id)?;

        let roster = database::sessions::roster(conn, session_id)?;
        let players: Vec<Player> = roster
            .iter()
            .map(|row| Player::new(row.player_id, row.name.clone(), row.rating))
            .collect();

        let groups = make_groups(&players, num_groups, min_per_group, max_per_group)?;

        let tx = conn.transaction()?;
        for group in &groups {
            for player in &group.players {
                database::sessions::set_group_number(
                    &tx,
                    session_id,
                    player.player_id,
                    group.group_number,
                )?;
            }
            for (idx, (one, two)) in group.make_matches().iter().enumerate() {
                database::matches::upsert_match(
                    &tx,
                    session_id,
                    one.player_id,
                    two.player_id,
                    group.group_number,
                    idx as i64 + 1,
                )?;
            }
        }
        tx.commit()?;

        info!(
            "Defined {} groups for session {}",
            groups.len(),
            session_id
        );
        Ok(groups)
    }

    /// The session's groups with their members and scheduled matches
    pub fn group_results(&self, conn: &DbConn, session_id: i64) -> Result<Vec<GroupResult>> {
        self.require_session(conn, session_id)?;

        let roster = database::sessions::roster(conn, session_id)?;
        let num_groups = database::sessions::group_count(conn, session_id)?;

        let mut results = Vec::new();
        for group_number in 1..=num_groups {
            let rows = database::matches::list_by_group(conn, session_id, group_number)?;
            let matches = rows.into_iter().map(to_domain_match).collect();

            let mut result = GroupResult::new(group_number, matches);
            result.players = roster
                .iter()
                .filter(|row| row.group_number == Some(group_number))
                .map(|row| Player::new(row.player_id, row.name.clone(), row.rating))
                .collect();
            results.push(result);
        }
        Ok(results)
    }

    /// Compute every participant's net rating change without persisting
    pub fn preview_close(&self, conn: &DbConn, session_id: i64) -> Result<Vec<PlayerOutcome>> {
        self.require_session(conn, session_id)?;
        self.compute_outcomes(conn, session_id)
    }

    /// Close the session: compute all rating changes, write one snapshot per
    /// player and move each player's current rating. Idempotent: snapshots
    /// already present are kept, and re-closing reproduces the same values
    /// from them.
    pub fn close_session(&self, conn: &mut DbConn, session_id: i64) -> Result<Vec<PlayerOutcome>> {
        self.require_session(conn, session_id)?;
        let outcomes = self.compute_outcomes(conn, session_id)?;

        let tx = conn.transaction()?;
        for outcome in &outcomes {
            database::ratings::insert_if_absent(
                &tx,
                outcome.player_id,
                session_id,
                outcome.previous_rating,
                outcome.new_rating,
                outcome.won_group,
            )?;
            database::players::update_rating(&tx, outcome.player_id, outcome.new_rating)?;
        }
        tx.commit()?;

        info!(
            "Closed session {} with rating changes for {} players",
            session_id,
            outcomes.len()
        );
        Ok(outcomes)
    }

    fn compute_outcomes(&self, conn: &DbConn, session_id: i64) -> Result<Vec<PlayerOutcome>> {
        let rows = database::matches::list_by_session(conn, session_id)?;

        let mut seeds = RatingSeeds::new();
        let mut names: HashMap<i64, String> = HashMap::new();
        for row in &rows {
            for (player_id, name, rating) in [
                (row.player_one_id, &row.player_one_name, row.player_one_rating),
                (row.player_two_id, &row.player_two_name, row.player_two_rating),
            ] {
                if names.contains_key(&player_id) {
                    continue;
                }
                names.insert(player_id, name.clone());
                seeds.set_current_rating(player_id, rating);
                if let Some(snapshot) =
                    database::ratings::find_for_session(conn, player_id, session_id)?
                {
                    seeds.set_session_snapshot(player_id, snapshot.previous_rating);
                }
            }
        }

        let played: Vec<PlayedMatch> = rows.iter().map(to_played_match).collect();
        let changes = apply_session(&played, &seeds, &self.config.rating)?;
        let winners = group_winners(&rows);

        let bonus = self.config.rating.group_winner_bonus;
        Ok(changes
            .into_iter()
            .map(|(player_id, change)| {
                let mut player =
                    Player::new(player_id, names[&player_id].clone(), change.new_rating);
                player.won_group_number = winners.get(&player_id).copied();

                PlayerOutcome {
                    player_id,
                    name: player.name.clone(),
                    previous_rating: change.previous_rating,
                    new_rating: change.new_rating,
                    won_group: player.won_group_number.is_some(),
                    display_rating: player.adjusted_rating(bonus),
                }
            })
            .collect())
    }

    fn require_session(&self, conn: &DbConn, session_id: i64) -> Result<()> {
        database::sessions::find_by_id(conn, session_id)?
            .map(|_| ())
            .ok_or_else(|| LeagueError::SessionNotFound { session_id }.into())
    }
}

fn to_domain_match(row: MatchRow) -> Match {
    Match {
        player_one: Player::new(row.player_one_id, row.player_one_name, row.player_one_rating),
        player_two: Player::new(row.player_two_id, row.player_two_name, row.player_two_rating),
        wins_one: row.player_one_wins.unwrap_or(0),
        wins_two: row.player_two_wins.unwrap_or(0),
    }
}

fn to_played_match(row: &MatchRow) -> PlayedMatch {
    PlayedMatch {
        player_one: row.player_one_id,
        wins_one: row.player_one_wins.unwrap_or(0),
        player_two: row.player_two_id,
        wins_two: row.player_two_wins.unwrap_or(0),
    }
}

/// The sole winner of each group, by match wins. A shared top score leaves
/// the group without a winner.
fn group_winners(rows: &[MatchRow]) -> HashMap<i64, i64> {
    let mut wins_by_group: HashMap<i64, HashMap<i64, i64>> = HashMap::new();

    for row in rows {
        let tally = wins_by_group.entry(row.group_number).or_default();
        let wins_one = row.player_one_wins.unwrap_or(0);
        let wins_two = row.player_two_wins.unwrap_or(0);
        if wins_one > wins_two {
            *tally.entry(row.player_one_id).or_insert(0) += 1;
        } else if wins_two > wins_one {
            *tally.entry(row.player_two_id).or_insert(0) += 1;
        }
    }

    let mut winners = HashMap::new();
    for (group_number, tally) in wins_by_group {
        let best = tally.values().max().copied().unwrap_or(0);
        let mut at_best = tally.iter().filter(|&(_, &count)| count == best);
        if let (Some((&player_id, _)), None) = (at_best.next(), at_best.next()) {
            winners.insert(player_id, group_number);
        }
    }
    winners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::create_memory_pool;
    use crate::database::players::insert_player;
    use crate::database::sessions::{add_roster_member, insert_session};
    use crate::database::setup::init_schema;
    use crate::database::DbPool;

    fn service() -> SessionService {
        SessionService::new(AppConfig::new())
    }

    fn league_with_players(ratings: &[i64]) -> (DbPool, i64, Vec<i64>) {
        let pool = create_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        init_schema(&conn).unwrap();

        let session = insert_session(&conn, "2026-08-07").unwrap();
        let mut player_ids = Vec::new();
        for (idx, &rating) in ratings.iter().enumerate() {
            let player =
                insert_player(&conn, &format!("Player {}", idx + 1), rating, None, None).unwrap();
            add_roster_member(&conn, session.session_id, player.player_id).unwrap();
            player_ids.push(player.player_id);
        }
        drop(conn);
        (pool, session.session_id, player_ids)
    }

    #[test]
    fn define_groups_persists_assignments_and_schedule() {
        let (pool, session_id, _) = league_with_players(&[2000, 1950, 1900, 1300, 1250, 1200]);
        let mut conn = pool.get().unwrap();

        let groups = service()
            .define_groups(&mut conn, session_id, 2, Some(3), Some(3))
            .unwrap();
        assert_eq!(groups.len(), 2);

        let results = service().group_results(&conn, session_id).unwrap();
        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.players.len(), 3);
            // Round-robin of three players
            assert_eq!(result.matches.len(), 3);
        }
    }

    #[test]
    fn close_session_applies_and_persists_changes() {
        let (pool, session_id, ids) = league_with_players(&[1600, 1600]);
        let mut conn = pool.get().unwrap();
        let svc = service();

        svc.define_groups(&mut conn, session_id, 1, None, None).unwrap();
        database::matches::record_result(&conn, session_id, ids[0], ids[1], 3, 0).unwrap();

        let outcomes = svc.close_session(&mut conn, session_id).unwrap();
        assert_eq!(outcomes.len(), 2);

        let winner = outcomes.iter().find(|o| o.player_id == ids[0]).unwrap();
        assert_eq!(winner.previous_rating, 1600);
        assert_eq!(winner.new_rating, 1616);
        assert!(winner.won_group);
        assert_eq!(winner.display_rating, 1816);

        let loser = outcomes.iter().find(|o| o.player_id == ids[1]).unwrap();
        assert_eq!(loser.new_rating, 1584);
        assert!(!loser.won_group);

        // Player.rating moved with the close
        let updated = database::players::find_by_id(&conn, ids[0]).unwrap().unwrap();
        assert_eq!(updated.rating, 1616);
    }

    #[test]
    fn closing_twice_is_idempotent() {
        let (pool, session_id, ids) = league_with_players(&[1500, 1700]);
        let mut conn = pool.get().unwrap();
        let svc = service();

        svc.define_groups(&mut conn, session_id, 1, None, None).unwrap();
        database::matches::record_result(&conn, session_id, ids[0], ids[1], 3, 1).unwrap();

        let first = svc.close_session(&mut conn, session_id).unwrap();
        let second = svc.close_session(&mut conn, session_id).unwrap();

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.previous_rating, b.previous_rating);
            assert_eq!(a.new_rating, b.new_rating);
        }

        let snapshot = database::ratings::find_for_session(&conn, ids[0], session_id)
            .unwrap()
            .unwrap();
        // Seeded from the snapshot, not the already-moved current rating
        assert_eq!(snapshot.previous_rating, 1500);
    }

    #[test]
    fn preview_leaves_no_trace() {
        let (pool, session_id, ids) = league_with_players(&[1500, 1700]);
        let mut conn = pool.get().unwrap();
        let svc = service();

        svc.define_groups(&mut conn, session_id, 1, None, None).unwrap();
        database::matches::record_result(&conn, session_id, ids[0], ids[1], 3, 1).unwrap();

        let preview = svc.preview_close(&conn, session_id).unwrap();
        assert_eq!(preview.len(), 2);

        assert!(database::ratings::find_for_session(&conn, ids[0], session_id)
            .unwrap()
            .is_none());
        let untouched = database::players::find_by_id(&conn, ids[0]).unwrap().unwrap();
        assert_eq!(untouched.rating, 1500);
    }

    #[test]
    fn unknown_session_is_rejected() {
        let (pool, _, _) = league_with_players(&[1500]);
        let conn = pool.get().unwrap();
        let err = service().preview_close(&conn, 999).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LeagueError>(),
            Some(LeagueError::SessionNotFound { session_id: 999 })
        ));
    }
}
