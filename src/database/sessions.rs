use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{RosterRow, SessionRow};

pub fn insert_session(conn: &Connection, session_date: &str) -> Result<SessionRow> {
    let sql = "INSERT INTO sessions (session_date) VALUES (?1) RETURNING session_id, session_date, created_at";

    conn.query_row(sql, params![session_date], parse_session_row)
        .context("Failed to insert new session")
}

fn parse_session_row(row: &rusqlite::Row) -> rusqlite::Result<SessionRow> {
    Ok(SessionRow {
        session_id: row.get(0)?,
        session_date: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn find_by_id(conn: &Connection, session_id: i64) -> Result<Option<SessionRow>> {
    let sql = "SELECT session_id, session_date, created_at FROM sessions WHERE session_id = ?1";

    conn.query_row(sql, params![session_id], parse_session_row)
        .optional()
        .context("Failed to query session by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<SessionRow>> {
    let sql = "SELECT session_id, session_date, created_at FROM sessions ORDER BY session_id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_session_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Add a player to a session's roster; re-adding is a no-op
pub fn add_roster_member(conn: &Connection, session_id: i64, player_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO session_players (session_id, player_id) VALUES (?1, ?2)",
        params![session_id, player_id],
    )
    .context("Failed to add player to session roster")?;
    Ok(())
}

/// The session's roster, grouped players first, strongest first within a group
pub fn roster(conn: &Connection, session_id: i64) -> Result<Vec<RosterRow>> {
    let sql = "
        SELECT
            p.player_id,
            p.name,
            p.rating,
            sp.group_number
        FROM session_players sp
        JOIN players p
            ON p.player_id = sp.player_id
        WHERE sp.session_id = ?1
        ORDER BY sp.group_number ASC, p.rating DESC, p.player_id ASC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![session_id], |row| {
            Ok(RosterRow {
                player_id: row.get(0)?,
                name: row.get(1)?,
                rating: row.get(2)?,
                group_number: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn set_group_number(
    conn: &Connection,
    session_id: i64,
    player_id: i64,
    group_number: i64,
) -> Result<()> {
    let changed = conn
        .execute(
            "UPDATE session_players SET group_number = ?1 WHERE session_id = ?2 AND player_id = ?3",
            params![group_number, session_id, player_id],
        )
        .context("Failed to assign player to group")?;

    anyhow::ensure!(
        changed == 1,
        "Player {player_id} is not on the roster of session {session_id}"
    );
    Ok(())
}

pub fn group_count(conn: &Connection, session_id: i64) -> Result<i64> {
    let sql = "SELECT COUNT(DISTINCT group_number) FROM session_players WHERE session_id = ?1 AND group_number IS NOT NULL";
    conn.query_row(sql, params![session_id], |row| row.get(0))
        .context("Failed to count session groups")
}
