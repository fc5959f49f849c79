use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::MatchRow;
use crate::errors::LeagueError;

// A match is one canonical row per unordered pair: the lower player id is
// always stored as player one, and callers may pass the pair in either
// orientation. This replaces the mirrored two-row representation and its
// dual-write invariant.

fn canonical_pair(a: i64, b: i64) -> (i64, i64, bool) {
    if a <= b { (a, b, false) } else { (b, a, true) }
}

/// Create the match row for a scheduled pairing. If the pair was already
/// scheduled (e.g. the organizer regrouped), only its schedule position is
/// refreshed; recorded wins are kept.
pub fn upsert_match(
    conn: &Connection,
    session_id: i64,
    player_a: i64,
    player_b: i64,
    group_number: i64,
    ordinal: i64,
) -> Result<()> {
    let (one, two, _) = canonical_pair(player_a, player_b);
    conn.execute(
        "INSERT INTO matches (session_id, player_one_id, player_two_id, group_number, ordinal) VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(session_id, player_one_id, player_two_id)
         DO UPDATE SET group_number = excluded.group_number, ordinal = excluded.ordinal",
        params![session_id, one, two, group_number, ordinal],
    )
    .context("Failed to insert match")?;
    Ok(())
}

/// Record (or correct) the win counts for a pair, in either orientation
pub fn record_result(
    conn: &Connection,
    session_id: i64,
    player_a: i64,
    player_b: i64,
    wins_a: i64,
    wins_b: i64,
) -> Result<()> {
    let (one, two, flipped) = canonical_pair(player_a, player_b);
    let (wins_one, wins_two) = if flipped { (wins_b, wins_a) } else { (wins_a, wins_b) };

    let changed = conn
        .execute(
            "UPDATE matches SET player_one_wins = ?1, player_two_wins = ?2 WHERE session_id = ?3 AND player_one_id = ?4 AND player_two_id = ?5",
            params![wins_one, wins_two, session_id, one, two],
        )
        .context("Failed to record match result")?;

    if changed == 0 {
        return Err(LeagueError::MatchNotFound {
            session_id,
            player_one_id: player_a,
            player_two_id: player_b,
        }
        .into());
    }
    Ok(())
}

const MATCH_COLUMNS: &str = "
    m.session_id,
    p1.player_id,
    p1.name,
    p1.rating,
    m.player_one_wins,
    p2.player_id,
    p2.name,
    p2.rating,
    m.player_two_wins,
    m.group_number,
    m.ordinal
";

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        session_id: row.get(0)?,
        player_one_id: row.get(1)?,
        player_one_name: row.get(2)?,
        player_one_rating: row.get(3)?,
        player_one_wins: row.get(4)?,
        player_two_id: row.get(5)?,
        player_two_name: row.get(6)?,
        player_two_rating: row.get(7)?,
        player_two_wins: row.get(8)?,
        group_number: row.get(9)?,
        ordinal: row.get(10)?,
    })
}

pub fn find_match(
    conn: &Connection,
    session_id: i64,
    player_a: i64,
    player_b: i64,
) -> Result<Option<MatchRow>> {
    let (one, two, _) = canonical_pair(player_a, player_b);
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches m
         JOIN players p1 ON p1.player_id = m.player_one_id
         JOIN players p2 ON p2.player_id = m.player_two_id
         WHERE m.session_id = ?1 AND m.player_one_id = ?2 AND m.player_two_id = ?3"
    );

    conn.query_row(&sql, params![session_id, one, two], parse_match_row)
        .optional()
        .context("Failed to query match")
}

/// All of a session's matches in their processing order: by group, then by
/// schedule position. This ordering is what makes session aggregation
/// reproducible.
pub fn list_by_session(conn: &Connection, session_id: i64) -> Result<Vec<MatchRow>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches m
         JOIN players p1 ON p1.player_id = m.player_one_id
         JOIN players p2 ON p2.player_id = m.player_two_id
         WHERE m.session_id = ?1
         ORDER BY m.group_number ASC, m.ordinal ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![session_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_group(
    conn: &Connection,
    session_id: i64,
    group_number: i64,
) -> Result<Vec<MatchRow>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches m
         JOIN players p1 ON p1.player_id = m.player_one_id
         JOIN players p2 ON p2.player_id = m.player_two_id
         WHERE m.session_id = ?1 AND m.group_number = ?2
         ORDER BY m.ordinal ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![session_id, group_number], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// A player's matches across all sessions, oriented so the subject is always
/// side one
pub fn list_by_player(conn: &Connection, player_id: i64) -> Result<Vec<MatchRow>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches m
         JOIN players p1 ON p1.player_id = m.player_one_id
         JOIN players p2 ON p2.player_id = m.player_two_id
         WHERE m.player_one_id = ?1 OR m.player_two_id = ?1
         ORDER BY m.session_id ASC, m.group_number ASC, m.ordinal ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows
        .into_iter()
        .map(|row| {
            if row.player_one_id == player_id {
                row
            } else {
                row.reversed()
            }
        })
        .collect())
}
