//! Artist use cases: list, search, detail, create, update, delete.

use crate::app::form::ArtistForm;
use crate::app::listing::{split_by_timing, ListingSummaryDto, SearchResultsDto};
use crate::domain::{format_start_time, join_genres, now, split_genres};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct ArtistShowDto {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetailDto {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShowDto>,
    pub upcoming_shows: Vec<ArtistShowDto>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ArtistEditDto {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

const UPCOMING_COUNT: &str =
    "(SELECT COUNT(*) FROM shows s WHERE s.artist_id = a.id AND s.start_time > ?1)";

pub fn artist_list(pool: &DbPool) -> Result<Vec<ListingSummaryDto>, AppError> {
    let now = now();
    let conn = get_connection(pool);
    let mut stmt = conn.prepare(&format!(
        "SELECT a.id, a.name, {UPCOMING_COUNT} FROM artists a ORDER BY a.id"
    ))?;
    let rows = stmt.query_map([now], |r| {
        Ok(ListingSummaryDto {
            id: r.get(0)?,
            name: r.get(1)?,
            num_upcoming_shows: r.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn artist_search(pool: &DbPool, term: &str) -> Result<SearchResultsDto, AppError> {
    let now = now();
    let conn = get_connection(pool);
    let mut stmt = conn.prepare(&format!(
        "SELECT a.id, a.name, {UPCOMING_COUNT} FROM artists a WHERE instr(casefold(a.name), casefold(?2)) > 0 ORDER BY a.id"
    ))?;
    let rows = stmt.query_map(params![now, term.trim()], |r| {
        Ok(ListingSummaryDto {
            id: r.get(0)?,
            name: r.get(1)?,
            num_upcoming_shows: r.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(SearchResultsDto::new(out))
}

/// Entity row and its shows, read under one lock.
pub fn artist_get(pool: &DbPool, id: i64) -> Result<ArtistDetailDto, AppError> {
    let conn = get_connection(pool);
    let edit = read_artist(&conn, id)?;
    let mut stmt = conn.prepare(
        "SELECT s.start_time, s.venue_id, v.name, v.image_link
         FROM shows s
         JOIN venues v ON v.id = s.venue_id
         WHERE s.artist_id = ?1
         ORDER BY s.start_time, s.id",
    )?;
    let rows = stmt.query_map([id], |r| {
        let start_time: NaiveDateTime = r.get(0)?;
        Ok((
            start_time,
            ArtistShowDto {
                venue_id: r.get(1)?,
                venue_name: r.get(2)?,
                venue_image_link: r.get(3)?,
                start_time: format_start_time(&start_time),
            },
        ))
    })?;
    let mut shows = Vec::new();
    for r in rows {
        shows.push(r?);
    }
    let (past_shows, upcoming_shows) = split_by_timing(shows, now());

    Ok(ArtistDetailDto {
        id: edit.id,
        name: edit.name,
        genres: edit.genres,
        city: edit.city,
        state: edit.state,
        phone: edit.phone,
        website: edit.website_link,
        facebook_link: edit.facebook_link,
        seeking_venue: edit.seeking_venue,
        seeking_description: edit.seeking_description,
        image_link: edit.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

pub fn artist_edit_form(pool: &DbPool, id: i64) -> Result<ArtistEditDto, AppError> {
    let conn = get_connection(pool);
    read_artist(&conn, id)
}

fn read_artist(conn: &Connection, id: i64) -> Result<ArtistEditDto, AppError> {
    conn.query_row(
        "SELECT id, name, genres, city, state, phone, website_link, facebook_link, seeking_venue, seeking_description, image_link FROM artists WHERE id = ?1",
        [id],
        |r| {
            Ok(ArtistEditDto {
                id: r.get(0)?,
                name: r.get(1)?,
                genres: split_genres(&r.get::<_, String>(2)?),
                city: r.get(3)?,
                state: r.get(4)?,
                phone: r.get(5)?,
                website_link: r.get(6)?,
                facebook_link: r.get(7)?,
                seeking_venue: r.get::<_, i32>(8)? != 0,
                seeking_description: r.get(9)?,
                image_link: r.get(10)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("artist {}", id)))
}

pub fn artist_create(pool: &DbPool, form: ArtistForm) -> Result<ArtistDetailDto, AppError> {
    form.validate()?;

    let id = {
        let conn = get_connection(pool);
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO artists (name, city, state, phone, genres, image_link, website_link, facebook_link, seeking_venue, seeking_description) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                form.name,
                form.city,
                form.state,
                form.phone,
                join_genres(&form.genres),
                form.image_link,
                form.website_link,
                form.facebook_link,
                form.seeking_venue,
                form.seeking_description,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        id
    }; // release conn before calling artist_get to avoid deadlock

    log::info!("artist {} listed as {}", form.name, id);
    artist_get(pool, id)
}

pub fn artist_update(
    pool: &DbPool,
    id: i64,
    form: ArtistForm,
) -> Result<ArtistDetailDto, AppError> {
    form.validate()?;

    {
        let conn = get_connection(pool);
        let tx = conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE artists SET name = ?1, city = ?2, state = ?3, phone = ?4, genres = ?5, image_link = ?6, website_link = ?7, facebook_link = ?8, seeking_venue = ?9, seeking_description = ?10 WHERE id = ?11",
            params![
                form.name,
                form.city,
                form.state,
                form.phone,
                join_genres(&form.genres),
                form.image_link,
                form.website_link,
                form.facebook_link,
                form.seeking_venue,
                form.seeking_description,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::NotFound(format!("artist {}", id)));
        }
        tx.commit()?;
    } // release conn before calling artist_get to avoid deadlock

    artist_get(pool, id)
}

pub fn artist_delete(pool: &DbPool, id: i64) -> Result<String, AppError> {
    let conn = get_connection(pool);
    let tx = conn.unchecked_transaction()?;

    let name: String = tx
        .query_row("SELECT name FROM artists WHERE id = ?1", [id], |r| r.get(0))
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("artist {}", id)))?;

    let shows: i64 = tx.query_row(
        "SELECT COUNT(*) FROM shows WHERE artist_id = ?1",
        [id],
        |r| r.get(0),
    )?;
    if shows > 0 {
        return Err(AppError::Conflict(format!(
            "artist {} still has {} show(s)",
            name, shows
        )));
    }

    tx.execute("DELETE FROM artists WHERE id = ?1", [id])?;
    tx.commit()?;
    log::info!("artist {} ({}) deleted", name, id);
    Ok(name)
}
