//! Show booking and listing integration tests

use app_lib::app::{
    artist_create, artist_get, show_create, show_list, venue_create, venue_get, ArtistForm,
    ShowForm, VenueForm,
};
use app_lib::infra::db::init_test_db;
use app_lib::infra::DbPool;

// ──────────────────────── Helper ────────────────────────

fn seed_pair(pool: &DbPool) -> (i64, i64) {
    let artist = artist_create(
        pool,
        ArtistForm {
            name: "Matt Quevado".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            genres: vec!["Jazz".to_string()],
            image_link: Some("https://images.example.com/matt.jpg".to_string()),
            ..ArtistForm::default()
        },
    )
    .unwrap()
    .id;
    let venue = venue_create(
        pool,
        VenueForm {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            genres: vec!["Jazz".to_string()],
            ..VenueForm::default()
        },
    )
    .unwrap()
    .id;
    (artist, venue)
}

fn form(artist_id: i64, venue_id: i64, start_time: &str) -> ShowForm {
    ShowForm {
        artist_id: artist_id.to_string(),
        venue_id: venue_id.to_string(),
        start_time: start_time.to_string(),
    }
}

// ══════════════════════════════════════════════════════════
//  show_create
// ══════════════════════════════════════════════════════════

#[test]
fn create_show_returns_joined_fields() {
    let pool = init_test_db();
    let (artist, venue) = seed_pair(&pool);
    let show = show_create(&pool, form(artist, venue, "2035-04-01 20:00:00")).unwrap();

    assert_eq!(show.artist_id, artist);
    assert_eq!(show.venue_id, venue);
    assert_eq!(show.artist_name, "Matt Quevado");
    assert_eq!(show.venue_name, "Park Square Live Music & Coffee");
    assert_eq!(
        show.artist_image_link.as_deref(),
        Some("https://images.example.com/matt.jpg")
    );
    assert!(show.start_time.starts_with("2035-04-01T20:00:00"));
}

#[test]
fn create_show_accepts_datetime_local_input() {
    let pool = init_test_db();
    let (artist, venue) = seed_pair(&pool);
    let show = show_create(&pool, form(artist, venue, "2035-04-01T20:30")).unwrap();
    assert!(show.start_time.starts_with("2035-04-01T20:30:00"));
}

#[test]
fn create_show_unknown_artist_rejected() {
    let pool = init_test_db();
    let (_, venue) = seed_pair(&pool);
    let err = show_create(&pool, form(999, venue, "2035-04-01 20:00:00")).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(err.to_string().contains("artist_id"));
    assert!(show_list(&pool).unwrap().is_empty());
}

#[test]
fn create_show_unknown_venue_rejected() {
    let pool = init_test_db();
    let (artist, _) = seed_pair(&pool);
    let err = show_create(&pool, form(artist, 999, "2035-04-01 20:00:00")).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(err.to_string().contains("venue_id"));
}

#[test]
fn create_show_bad_start_time_rejected() {
    let pool = init_test_db();
    let (artist, venue) = seed_pair(&pool);
    let err = show_create(&pool, form(artist, venue, "next tuesday")).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(err.to_string().contains("start_time"));
}

#[test]
fn create_show_non_numeric_ids_rejected() {
    let pool = init_test_db();
    let err = show_create(
        &pool,
        ShowForm {
            artist_id: "one".to_string(),
            venue_id: String::new(),
            start_time: "2035-04-01 20:00:00".to_string(),
        },
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("artist_id"));
    assert!(msg.contains("venue_id"));
}

// ══════════════════════════════════════════════════════════
//  show_list
// ══════════════════════════════════════════════════════════

#[test]
fn list_shows_ordered_by_start_time() {
    let pool = init_test_db();
    let (artist, venue) = seed_pair(&pool);
    show_create(&pool, form(artist, venue, "2035-06-15 21:00:00")).unwrap();
    show_create(&pool, form(artist, venue, "2019-05-21 21:30:00")).unwrap();
    show_create(&pool, form(artist, venue, "2035-01-01 09:00:00")).unwrap();

    let shows = show_list(&pool).unwrap();
    let starts: Vec<&str> = shows.iter().map(|s| &s.start_time[..10]).collect();
    assert_eq!(starts, vec!["2019-05-21", "2035-01-01", "2035-06-15"]);
}

#[test]
fn list_includes_past_shows() {
    let pool = init_test_db();
    let (artist, venue) = seed_pair(&pool);
    show_create(&pool, form(artist, venue, "2019-05-21 21:30:00")).unwrap();
    assert_eq!(show_list(&pool).unwrap().len(), 1);
}

// ══════════════════════════════════════════════════════════
//  Show visibility on venue and artist pages
// ══════════════════════════════════════════════════════════

#[test]
fn past_show_is_past_on_both_sides() {
    let pool = init_test_db();
    let (artist, venue) = seed_pair(&pool);
    show_create(&pool, form(artist, venue, "2019-05-21 21:30:00")).unwrap();

    let v = venue_get(&pool, venue).unwrap();
    assert_eq!(v.past_shows_count, 1);
    assert_eq!(v.upcoming_shows_count, 0);
    assert_eq!(v.past_shows[0].artist_name, "Matt Quevado");

    let a = artist_get(&pool, artist).unwrap();
    assert_eq!(a.past_shows_count, 1);
    assert_eq!(a.upcoming_shows_count, 0);
    assert_eq!(a.past_shows[0].venue_name, "Park Square Live Music & Coffee");
}

#[test]
fn upcoming_show_is_upcoming_on_both_sides() {
    let pool = init_test_db();
    let (artist, venue) = seed_pair(&pool);
    show_create(&pool, form(artist, venue, "2035-04-01 20:00:00")).unwrap();

    assert_eq!(venue_get(&pool, venue).unwrap().upcoming_shows_count, 1);
    assert_eq!(artist_get(&pool, artist).unwrap().upcoming_shows_count, 1);
}
