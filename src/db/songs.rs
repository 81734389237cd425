use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{NewSong, Song};

const SONG_COLUMNS: &str =
    "id, title, artist, chart, link, level, is_favorite, is_blacklisted, color";

fn song_from_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        title: row.get(1)?,
        artist: row.get(2)?,
        chart: row.get(3)?,
        link: row.get(4)?,
        level: row.get(5)?,
        is_favorite: row.get(6)?,
        is_blacklisted: row.get(7)?,
        color: row.get(8)?,
    })
}

/// Fetch the whole catalog, easiest charts first, titles compared
/// case-insensitively so mixed-case entries group together.
pub fn fetch_all_songs(conn: &Connection) -> Result<Vec<Song>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SONG_COLUMNS}
             FROM songs
             ORDER BY level, title COLLATE NOCASE, id"
        ))
        .context("failed to prepare all songs query")?;

    let songs = stmt
        .query_map([], song_from_row)
        .context("failed to iterate songs")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect songs")?;

    Ok(songs)
}

pub fn fetch_song(conn: &Connection, id: i64) -> Result<Option<Song>> {
    conn.query_row(
        &format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?1"),
        params![id],
        song_from_row,
    )
    .optional()
    .context("failed to load song")
}

/// Insert a brand new song. The caller is expected to have settled the color
/// already. We echo the hydrated struct so the UI can update without a
/// re-query.
pub fn create_song(conn: &Connection, song: &NewSong) -> Result<Song> {
    conn.execute(
        "INSERT INTO songs (title, artist, chart, link, level, is_favorite, is_blacklisted, color)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            song.title,
            song.artist,
            song.chart,
            song.link,
            song.level,
            song.is_favorite,
            song.is_blacklisted,
            song.color,
        ],
    )
    .context("failed to insert song")?;

    let id = conn.last_insert_rowid();
    Ok(Song {
        id,
        title: song.title.clone(),
        artist: song.artist.clone(),
        chart: song.chart.clone(),
        link: song.link.clone(),
        level: song.level,
        is_favorite: song.is_favorite,
        is_blacklisted: song.is_blacklisted,
        color: song.color.clone(),
    })
}

/// Overwrite every stored field of `song`, keyed by its id.
pub fn update_song(conn: &Connection, song: &Song) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE songs
             SET title = ?1, artist = ?2, chart = ?3, link = ?4, level = ?5,
                 is_favorite = ?6, is_blacklisted = ?7, color = ?8
             WHERE id = ?9",
            params![
                song.title,
                song.artist,
                song.chart,
                song.link,
                song.level,
                song.is_favorite,
                song.is_blacklisted,
                song.color,
                song.id,
            ],
        )
        .context("failed to update song")?;

    expect_one_row(updated)
}

pub fn delete_song(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM songs WHERE id = ?1", params![id])
        .context("failed to delete song")?;

    expect_one_row(deleted)
}

/// Flip the favorite flag in place.
pub fn toggle_favorite(conn: &Connection, id: i64) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE songs SET is_favorite = NOT is_favorite WHERE id = ?1",
            params![id],
        )
        .context("failed to toggle favorite")?;

    expect_one_row(updated)
}

/// Flip the blacklist flag in place.
pub fn toggle_blacklist(conn: &Connection, id: i64) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE songs SET is_blacklisted = NOT is_blacklisted WHERE id = ?1",
            params![id],
        )
        .context("failed to toggle blacklist")?;

    expect_one_row(updated)
}

fn expect_one_row(changed: usize) -> Result<()> {
    if changed == 0 {
        Err(anyhow!("Song not found"))
    } else {
        Ok(())
    }
}
