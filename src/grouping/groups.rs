use log::info;

use super::cluster::cluster;
use crate::domain::{Group, Player};
use crate::errors::LeagueError;

/// Partition a rated roster into skill-clustered groups of near-equal size.
///
/// Players are stable-sorted by rating descending (ties keep roster order),
/// their ratings clustered under the size bounds, and groups numbered 1..
/// in order of first appearance along the sorted walk, so group 1 always
/// holds the strongest players.
pub fn make_groups(
    players: &[Player],
    num_groups: usize,
    min_per_group: Option<usize>,
    max_per_group: Option<usize>,
) -> Result<Vec<Group>, LeagueError> {
    let num_players = players.len();
    validate_constraints(num_players, num_groups, min_per_group, max_per_group)?;

    let sorted_players = sort_by_rating_descending(players);
    let ratings: Vec<f64> = sorted_players.iter().map(|p| p.rating as f64).collect();

    let labels = cluster(
        &ratings,
        num_groups,
        min_per_group.unwrap_or(0).max(1),
        max_per_group.unwrap_or(num_players),
    )?;

    let groups = assemble_groups(sorted_players, &labels);
    info!(
        "Split {} players into {} groups",
        num_players,
        groups.len()
    );
    Ok(groups)
}

fn validate_constraints(
    num_players: usize,
    num_groups: usize,
    min_per_group: Option<usize>,
    max_per_group: Option<usize>,
) -> Result<(), LeagueError> {
    if num_players == 0 {
        return Err(LeagueError::constraint("roster is empty"));
    }
    if num_groups == 0 {
        return Err(LeagueError::constraint("at least one group is required"));
    }
    if num_groups > num_players {
        return Err(LeagueError::constraint(format!(
            "{num_groups} groups requested for only {num_players} players"
        )));
    }

    let min_size = min_per_group.unwrap_or(0);
    let max_size = max_per_group.unwrap_or(num_players);
    if min_size > max_size {
        return Err(LeagueError::constraint(format!(
            "minimum group size {min_size} exceeds maximum {max_size}"
        )));
    }
    if num_groups * min_size > num_players || num_groups * max_size < num_players {
        return Err(LeagueError::constraint(format!(
            "{num_players} players cannot fill {num_groups} groups of {min_size}..={max_size}"
        )));
    }
    Ok(())
}

fn sort_by_rating_descending(players: &[Player]) -> Vec<Player> {
    let mut sorted = players.to_vec();
    // Stable: equally rated players keep their roster order
    sorted.sort_by_key(|p| std::cmp::Reverse(p.rating));
    sorted
}

/// Walk the rating-sorted players, closing a group whenever the cluster label
/// changes. Group numbers are 1-based in first-appearance order, not the
/// clustering's internal label values.
fn assemble_groups(sorted_players: Vec<Player>, labels: &[usize]) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut group = Group::new(1);
    let mut last_label: Option<usize> = None;

    for (player, &label) in sorted_players.into_iter().zip(labels) {
        if let Some(previous) = last_label {
            if label != previous {
                let next_number = group.group_number + 1;
                groups.push(group);
                group = Group::new(next_number);
            }
        }
        group.add_player(player);
        last_label = Some(label);
    }
    groups.push(group);

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(ratings: &[i64]) -> Vec<Player> {
        ratings
            .iter()
            .enumerate()
            .map(|(idx, &rating)| Player::new(idx as i64 + 1, format!("Player {}", idx + 1), rating))
            .collect()
    }

    #[test]
    fn partitions_roster_exactly_once() {
        let players = roster(&[2100, 1450, 1800, 1430, 2050, 1500, 1950, 1410]);
        let groups = make_groups(&players, 2, Some(3), Some(5)).unwrap();

        let mut seen: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.players.iter().map(|p| p.player_id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        for group in &groups {
            assert!((3..=5).contains(&group.size()));
        }
    }

    #[test]
    fn numbers_groups_from_strongest_down() {
        let players = roster(&[1200, 2100, 1250, 2000, 1150, 1950]);
        let groups = make_groups(&players, 2, Some(3), Some(3)).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group_number, 1);
        assert_eq!(groups[1].group_number, 2);

        let top: Vec<i64> = groups[0].players.iter().map(|p| p.rating).collect();
        assert_eq!(top, vec![2100, 2000, 1950]);
        let bottom: Vec<i64> = groups[1].players.iter().map(|p| p.rating).collect();
        assert_eq!(bottom, vec![1250, 1200, 1150]);
    }

    #[test]
    fn equal_ratings_keep_roster_order() {
        let players = roster(&[1500, 1500, 1500, 1500]);
        let groups = make_groups(&players, 2, Some(2), Some(2)).unwrap();

        let first: Vec<i64> = groups[0].players.iter().map(|p| p.player_id).collect();
        let second: Vec<i64> = groups[1].players.iter().map(|p| p.player_id).collect();
        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![3, 4]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let players = roster(&[1820, 1700, 1705, 1650, 1500, 1502, 1495, 1300, 1290, 1288]);
        let first = make_groups(&players, 3, Some(2), Some(4)).unwrap();
        let second = make_groups(&players, 3, Some(2), Some(4)).unwrap();

        let ids = |groups: &[Group]| -> Vec<Vec<i64>> {
            groups
                .iter()
                .map(|g| g.players.iter().map(|p| p.player_id).collect())
                .collect()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert!(matches!(
            make_groups(&[], 1, None, None),
            Err(LeagueError::ConstraintUnsatisfiable { .. })
        ));
    }

    #[test]
    fn unsatisfiable_bounds_are_rejected_up_front() {
        let players = roster(&[1500, 1400, 1300]);
        assert!(matches!(
            make_groups(&players, 2, Some(2), Some(3)),
            Err(LeagueError::ConstraintUnsatisfiable { .. })
        ));
        assert!(matches!(
            make_groups(&players, 5, None, None),
            Err(LeagueError::ConstraintUnsatisfiable { .. })
        ));
    }

    #[test]
    fn defaults_cover_missing_bounds() {
        let players = roster(&[1900, 1850, 1400, 1350]);
        let groups = make_groups(&players, 2, None, None).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].size() + groups[1].size(), 4);
    }
}
