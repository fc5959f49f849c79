use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::PlayerRow;

const PLAYER_COLUMNS: &str = "player_id, name, rating, dominant_hand, racket_type, created_at";

pub fn insert_player(
    conn: &Connection,
    name: &str,
    rating: i64,
    dominant_hand: Option<&str>,
    racket_type: Option<&str>,
) -> Result<PlayerRow> {
    let sql = format!(
        "INSERT INTO players (name, rating, dominant_hand, racket_type) VALUES (?1, ?2, ?3, ?4) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![name, rating, dominant_hand, racket_type],
        parse_player_row,
    )
    .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<PlayerRow> {
    Ok(PlayerRow {
        player_id: row.get(0)?,
        name: row.get(1)?,
        rating: row.get(2)?,
        dominant_hand: row.get(3)?,
        racket_type: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn find_by_id(conn: &Connection, player_id: i64) -> Result<Option<PlayerRow>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = ?1");

    conn.query_row(&sql, params![player_id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<PlayerRow>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn update_rating(conn: &Connection, player_id: i64, rating: i64) -> Result<()> {
    let changed = conn
        .execute(
            "UPDATE players SET rating = ?1 WHERE player_id = ?2",
            params![rating, player_id],
        )
        .context("Failed to update player rating")?;

    anyhow::ensure!(changed == 1, "No player with id {player_id}");
    Ok(())
}
