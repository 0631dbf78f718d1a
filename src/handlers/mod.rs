//! HTTP handlers (view-model boundary).

pub mod artist;
pub mod page;
pub mod show;
pub mod venue;

use crate::error::AppError;
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

/// `search_term` field of the search forms.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub success: bool,
}

/// Run a use case on the blocking pool; SQLite calls must not stall the workers.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Db(e.to_string()))?
}

#[derive(Debug, Serialize)]
struct Home {}

#[get("/")]
async fn index(req: HttpRequest) -> impl Responder {
    page::render(&req, StatusCode::OK, Home {})
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(r#"{"status": "Ok"}"#)
}

/// Register every route. Literal paths come before `{id}` paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(health)
        .service(venue::list_venues)
        .service(venue::search_venues)
        .service(venue::create_venue_form)
        .service(venue::create_venue_submission)
        .service(venue::show_venue)
        .service(venue::edit_venue)
        .service(venue::edit_venue_submission)
        .service(venue::delete_venue)
        .service(artist::list_artists)
        .service(artist::search_artists)
        .service(artist::create_artist_form)
        .service(artist::create_artist_submission)
        .service(artist::show_artist)
        .service(artist::edit_artist)
        .service(artist::edit_artist_submission)
        .service(artist::delete_artist)
        .service(show::list_shows)
        .service(show::create_show_form)
        .service(show::create_show_submission);
}
