//! Venue use cases: areas, search, detail, create, update, delete.

use crate::app::form::VenueForm;
use crate::app::listing::{split_by_timing, ListingSummaryDto, SearchResultsDto};
use crate::domain::{format_start_time, join_genres, now, split_genres};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use validator::Validate;

/// Venues sharing one (city, state) pair.
#[derive(Debug, Serialize)]
pub struct VenueAreaDto {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummaryDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueShowDto {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct VenueDetailDto {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShowDto>,
    pub upcoming_shows: Vec<VenueShowDto>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Stored values used to prefill the edit form.
#[derive(Debug, Serialize)]
pub struct VenueEditDto {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

const UPCOMING_COUNT: &str =
    "(SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.start_time > ?1)";

pub fn venue_areas(pool: &DbPool) -> Result<Vec<VenueAreaDto>, AppError> {
    let now = now();
    let conn = get_connection(pool);

    let mut stmt =
        conn.prepare("SELECT DISTINCT city, state FROM venues ORDER BY state, city")?;
    let pairs = stmt
        .query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(&format!(
        "SELECT v.id, v.name, {UPCOMING_COUNT} FROM venues v WHERE v.city = ?2 AND v.state = ?3 ORDER BY v.id"
    ))?;
    let mut out = Vec::with_capacity(pairs.len());
    for (city, state) in pairs {
        let rows = stmt.query_map(params![now, &city, &state], |r| {
            Ok(ListingSummaryDto {
                id: r.get(0)?,
                name: r.get(1)?,
                num_upcoming_shows: r.get(2)?,
            })
        })?;
        let mut venues = Vec::new();
        for r in rows {
            venues.push(r?);
        }
        out.push(VenueAreaDto {
            city,
            state,
            venues,
        });
    }
    Ok(out)
}

/// Case-insensitive substring search on venue name.
pub fn venue_search(pool: &DbPool, term: &str) -> Result<SearchResultsDto, AppError> {
    let now = now();
    let conn = get_connection(pool);
    let mut stmt = conn.prepare(&format!(
        "SELECT v.id, v.name, {UPCOMING_COUNT} FROM venues v WHERE instr(casefold(v.name), casefold(?2)) > 0 ORDER BY v.id"
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
pub fn venue_get(pool: &DbPool, id: i64) -> Result<VenueDetailDto, AppError> {
    let conn = get_connection(pool);
    let edit = read_venue(&conn, id)?;
    let mut stmt = conn.prepare(
        "SELECT s.start_time, s.artist_id, a.name, a.image_link
         FROM shows s
         JOIN artists a ON a.id = s.artist_id
         WHERE s.venue_id = ?1
         ORDER BY s.start_time, s.id",
    )?;
    let rows = stmt.query_map([id], |r| {
        let start_time: NaiveDateTime = r.get(0)?;
        Ok((
            start_time,
            VenueShowDto {
                artist_id: r.get(1)?,
                artist_name: r.get(2)?,
                artist_image_link: r.get(3)?,
                start_time: format_start_time(&start_time),
            },
        ))
    })?;
    let mut shows = Vec::new();
    for r in rows {
        shows.push(r?);
    }
    let (past_shows, upcoming_shows) = split_by_timing(shows, now());

    Ok(VenueDetailDto {
        id: edit.id,
        name: edit.name,
        genres: edit.genres,
        address: edit.address,
        city: edit.city,
        state: edit.state,
        phone: edit.phone,
        website: edit.website_link,
        facebook_link: edit.facebook_link,
        seeking_talent: edit.seeking_talent,
        seeking_description: edit.seeking_description,
        image_link: edit.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

pub fn venue_edit_form(pool: &DbPool, id: i64) -> Result<VenueEditDto, AppError> {
    let conn = get_connection(pool);
    read_venue(&conn, id)
}

fn read_venue(conn: &Connection, id: i64) -> Result<VenueEditDto, AppError> {
    conn.query_row(
        "SELECT id, name, genres, address, city, state, phone, website_link, facebook_link, seeking_talent, seeking_description, image_link FROM venues WHERE id = ?1",
        [id],
        |r| {
            Ok(VenueEditDto {
                id: r.get(0)?,
                name: r.get(1)?,
                genres: split_genres(&r.get::<_, String>(2)?),
                address: r.get(3)?,
                city: r.get(4)?,
                state: r.get(5)?,
                phone: r.get(6)?,
                website_link: r.get(7)?,
                facebook_link: r.get(8)?,
                seeking_talent: r.get::<_, i32>(9)? != 0,
                seeking_description: r.get(10)?,
                image_link: r.get(11)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("venue {}", id)))
}

pub fn venue_create(pool: &DbPool, form: VenueForm) -> Result<VenueDetailDto, AppError> {
    form.validate()?;

    let id = {
        let conn = get_connection(pool);
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO venues (name, city, state, address, phone, image_link, genres, website_link, facebook_link, seeking_talent, seeking_description) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                form.name,
                form.city,
                form.state,
                form.address,
                form.phone,
                form.image_link,
                join_genres(&form.genres),
                form.website_link,
                form.facebook_link,
                form.seeking_talent,
                form.seeking_description,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        id
    }; // release conn before calling venue_get to avoid deadlock

    log::info!("venue {} listed as {}", form.name, id);
    venue_get(pool, id)
}

/// Replace every editable field of an existing venue.
pub fn venue_update(pool: &DbPool, id: i64, form: VenueForm) -> Result<VenueDetailDto, AppError> {
    form.validate()?;

    {
        let conn = get_connection(pool);
        let tx = conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE venues SET name = ?1, city = ?2, state = ?3, address = ?4, phone = ?5, image_link = ?6, genres = ?7, website_link = ?8, facebook_link = ?9, seeking_talent = ?10, seeking_description = ?11 WHERE id = ?12",
            params![
                form.name,
                form.city,
                form.state,
                form.address,
                form.phone,
                form.image_link,
                join_genres(&form.genres),
                form.website_link,
                form.facebook_link,
                form.seeking_talent,
                form.seeking_description,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::NotFound(format!("venue {}", id)));
        }
        tx.commit()?;
    } // release conn before calling venue_get to avoid deadlock

    venue_get(pool, id)
}

/// Delete a venue and return its name. Refused while any show still references it.
pub fn venue_delete(pool: &DbPool, id: i64) -> Result<String, AppError> {
    let conn = get_connection(pool);
    let tx = conn.unchecked_transaction()?;

    let name: String = tx
        .query_row("SELECT name FROM venues WHERE id = ?1", [id], |r| r.get(0))
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("venue {}", id)))?;

    let shows: i64 = tx.query_row(
        "SELECT COUNT(*) FROM shows WHERE venue_id = ?1",
        [id],
        |r| r.get(0),
    )?;
    if shows > 0 {
        return Err(AppError::Conflict(format!(
            "venue {} still has {} show(s)",
            name, shows
        )));
    }

    tx.execute("DELETE FROM venues WHERE id = ?1", [id])?;
    tx.commit()?;
    log::info!("venue {} ({}) deleted", name, id);
    Ok(name)
}
