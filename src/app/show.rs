//! Show use cases: list and create.

use crate::app::form::ShowForm;
use crate::domain::format_start_time;
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShowDto {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

const SHOW_SELECT: &str = "SELECT s.id, s.venue_id, v.name, s.artist_id, a.name, a.image_link, s.start_time
     FROM shows s
     JOIN venues v ON v.id = s.venue_id
     JOIN artists a ON a.id = s.artist_id";

fn map_show(r: &rusqlite::Row<'_>) -> rusqlite::Result<ShowDto> {
    let start_time: NaiveDateTime = r.get(6)?;
    Ok(ShowDto {
        id: r.get(0)?,
        venue_id: r.get(1)?,
        venue_name: r.get(2)?,
        artist_id: r.get(3)?,
        artist_name: r.get(4)?,
        artist_image_link: r.get(5)?,
        start_time: format_start_time(&start_time),
    })
}

/// Every show, past and upcoming, ordered by start time.
pub fn show_list(pool: &DbPool) -> Result<Vec<ShowDto>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn.prepare(&format!("{SHOW_SELECT} ORDER BY s.start_time, s.id"))?;
    let rows = stmt.query_map([], map_show)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn show_get(pool: &DbPool, id: i64) -> Result<ShowDto, AppError> {
    let conn = get_connection(pool);
    conn.query_row(&format!("{SHOW_SELECT} WHERE s.id = ?1"), [id], map_show)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("show {}", id)))
}

/// Book an artist at a venue. Both must already exist.
pub fn show_create(pool: &DbPool, form: ShowForm) -> Result<ShowDto, AppError> {
    let new_show = form.parse()?;

    let id = {
        let conn = get_connection(pool);
        let tx = conn.unchecked_transaction()?;

        let artist_exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?1)",
            [new_show.artist_id],
            |r| r.get(0),
        )?;
        if !artist_exists {
            return Err(AppError::Validation(format!(
                "artist_id: artist {} does not exist",
                new_show.artist_id
            )));
        }
        let venue_exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?1)",
            [new_show.venue_id],
            |r| r.get(0),
        )?;
        if !venue_exists {
            return Err(AppError::Validation(format!(
                "venue_id: venue {} does not exist",
                new_show.venue_id
            )));
        }

        tx.execute(
            "INSERT INTO shows (start_time, artist_id, venue_id) VALUES (?1, ?2, ?3)",
            params![new_show.start_time, new_show.artist_id, new_show.venue_id],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        id
    }; // release conn before calling show_get to avoid deadlock

    show_get(pool, id)
}
