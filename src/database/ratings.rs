use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{RatingHistoryRow, SessionRatingRow};

/// Write a player's rating snapshot for a session. Insert-if-absent: if the
/// snapshot already exists it is left untouched, which makes session close
/// safe to re-invoke.
pub fn insert_if_absent(
    conn: &Connection,
    player_id: i64,
    session_id: i64,
    previous_rating: i64,
    rating: i64,
    won_group: bool,
) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO session_ratings (player_id, session_id, previous_rating, rating, won_group) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![player_id, session_id, previous_rating, rating, won_group as i64],
    )
    .context("Failed to insert session rating")?;
    Ok(())
}

fn parse_session_rating_row(row: &rusqlite::Row) -> rusqlite::Result<SessionRatingRow> {
    Ok(SessionRatingRow {
        player_id: row.get(0)?,
        session_id: row.get(1)?,
        previous_rating: row.get(2)?,
        rating: row.get(3)?,
        won_group: row.get::<_, i64>(4)? != 0,
    })
}

pub fn find_for_session(
    conn: &Connection,
    player_id: i64,
    session_id: i64,
) -> Result<Option<SessionRatingRow>> {
    let sql = "SELECT player_id, session_id, previous_rating, rating, won_group FROM session_ratings WHERE player_id = ?1 AND session_id = ?2";

    conn.query_row(sql, params![player_id, session_id], parse_session_rating_row)
        .optional()
        .context("Failed to query session rating")
}

pub fn list_for_session(conn: &Connection, session_id: i64) -> Result<Vec<SessionRatingRow>> {
    let sql = "SELECT player_id, session_id, previous_rating, rating, won_group FROM session_ratings WHERE session_id = ?1 ORDER BY player_id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![session_id], parse_session_rating_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// A player's rating after each closed session, oldest first
pub fn history(conn: &Connection, player_id: i64) -> Result<Vec<RatingHistoryRow>> {
    let sql = "
        SELECT
            s.session_id,
            s.session_date,
            r.rating
        FROM session_ratings r
        JOIN sessions s
            ON s.session_id = r.session_id
        WHERE r.player_id = ?1
        ORDER BY s.session_id ASC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id], |row| {
            Ok(RatingHistoryRow {
                session_id: row.get(0)?,
                session_date: row.get(1)?,
                rating: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::create_memory_pool;
    use crate::database::players::insert_player;
    use crate::database::sessions::insert_session;
    use crate::database::setup::init_schema;

    #[test]
    fn duplicate_snapshot_is_ignored() {
        let pool = create_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        init_schema(&conn).unwrap();

        let player = insert_player(&conn, "Nick", 1500, None, None).unwrap();
        let session = insert_session(&conn, "2026-08-07").unwrap();

        insert_if_absent(&conn, player.player_id, session.session_id, 1500, 1532, false).unwrap();
        // A second close must not overwrite the audit trail
        insert_if_absent(&conn, player.player_id, session.session_id, 1532, 1560, true).unwrap();

        let row = find_for_session(&conn, player.player_id, session.session_id)
            .unwrap()
            .unwrap();
        assert_eq!(row.previous_rating, 1500);
        assert_eq!(row.rating, 1532);
        assert!(!row.won_group);
    }

    #[test]
    fn history_is_ordered_by_session() {
        let pool = create_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        init_schema(&conn).unwrap();

        let player = insert_player(&conn, "Nick", 1500, None, None).unwrap();
        let first = insert_session(&conn, "2026-07-24").unwrap();
        let second = insert_session(&conn, "2026-07-31").unwrap();

        insert_if_absent(&conn, player.player_id, second.session_id, 1532, 1518, false).unwrap();
        insert_if_absent(&conn, player.player_id, first.session_id, 1500, 1532, false).unwrap();

        let points = history(&conn, player.player_id).unwrap();
        let ratings: Vec<i64> = points.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![1532, 1518]);
        assert_eq!(points[0].session_date, "2026-07-24");
    }
}
