use crate::app::{
    artist_create, artist_delete, artist_edit_form, artist_get, artist_list, artist_search,
    artist_update, ArtistDetailDto, ArtistEditDto, ArtistForm, FormChoices, FormFields,
    ListingSummaryDto, SearchResultsDto,
};
use crate::error::AppError;
use crate::handlers::page::{render, render_with_flash, Flash};
use crate::handlers::{blocking, DeleteResult, SearchForm};
use crate::infra::DbPool;
use actix_web::http::{header, StatusCode};
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ArtistsPage {
    pub artists: Vec<ListingSummaryDto>,
}

#[derive(Debug, Serialize)]
pub struct ArtistSearchPage {
    pub results: SearchResultsDto,
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistPage {
    pub artist: ArtistDetailDto,
}

#[derive(Debug, Serialize)]
pub struct NewArtistPage {
    pub form: ArtistForm,
    pub choices: FormChoices,
}

#[derive(Debug, Serialize)]
pub struct EditArtistPage {
    pub artist: ArtistEditDto,
    pub choices: FormChoices,
}

/// Body of a rejected create submission; the form is echoed for redisplay.
#[derive(Debug, Serialize)]
pub struct ArtistRejected {
    pub error: crate::error::AppErrorDto,
    pub form: ArtistForm,
}

#[get("/artists")]
pub async fn list_artists(
    req: HttpRequest,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let artists = blocking(move || artist_list(&pool)).await?;
    Ok(render(&req, StatusCode::OK, ArtistsPage { artists }))
}

#[post("/artists/search")]
pub async fn search_artists(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, AppError> {
    let search_term = form.into_inner().search_term;
    let term = search_term.clone();
    let results = blocking(move || artist_search(&pool, &term)).await?;
    Ok(render(
        &req,
        StatusCode::OK,
        ArtistSearchPage {
            results,
            search_term,
        },
    ))
}

#[get("/artists/create")]
pub async fn create_artist_form(req: HttpRequest) -> HttpResponse {
    render(
        &req,
        StatusCode::OK,
        NewArtistPage {
            form: ArtistForm::default(),
            choices: FormChoices::load(),
        },
    )
}

#[post("/artists/create")]
pub async fn create_artist_submission(
    pool: web::Data<DbPool>,
    body: web::Form<Vec<(String, String)>>,
) -> HttpResponse {
    let form = ArtistForm::from_fields(&FormFields::from_pairs(body.into_inner()));
    let echo = form.clone();
    let name = form.name.clone();

    match blocking(move || artist_create(&pool, form)).await {
        Ok(artist) => render_with_flash(
            StatusCode::CREATED,
            Flash::success(format!("Artist {} was successfully listed!", name)),
            ArtistPage { artist },
        ),
        Err(e) => {
            match &e {
                AppError::Validation(msg) => log::warn!("artist {} rejected: {}", name, msg),
                other => log::error!("artist {} could not be listed: {}", name, other),
            }
            render_with_flash(
                e.status_code(),
                Flash::error(format!(
                    "An error occurred. Artist {} could not be listed.",
                    name
                )),
                ArtistRejected {
                    error: e.to_serde(),
                    form: echo,
                },
            )
        }
    }
}

#[get("/artists/{id}")]
pub async fn show_artist(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let artist = blocking(move || artist_get(&pool, id)).await?;
    Ok(render(&req, StatusCode::OK, ArtistPage { artist }))
}

#[get("/artists/{id}/edit")]
pub async fn edit_artist(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let artist = blocking(move || artist_edit_form(&pool, id)).await?;
    Ok(render(
        &req,
        StatusCode::OK,
        EditArtistPage {
            artist,
            choices: FormChoices::load(),
        },
    ))
}

/// Always redirects back to the artist page, carrying the outcome as a flash.
#[post("/artists/{id}/edit")]
pub async fn edit_artist_submission(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    body: web::Form<Vec<(String, String)>>,
) -> HttpResponse {
    let id = path.into_inner();
    let form = ArtistForm::from_fields(&FormFields::from_pairs(body.into_inner()));
    let name = form.name.clone();

    let flash = match blocking(move || artist_update(&pool, id, form)).await {
        Ok(_) => Flash::success(format!("Artist {} was successfully edited!", name)),
        Err(e) => {
            log::warn!("artist {} could not be edited: {}", id, e);
            Flash::error(format!(
                "An error occurred. Artist {} could not be edited.",
                name
            ))
        }
    };

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/artists/{}", id)))
        .append_header(flash.set_cookie())
        .finish()
}

#[delete("/artists/{id}")]
pub async fn delete_artist(pool: web::Data<DbPool>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let (success, flash) = match blocking(move || artist_delete(&pool, id)).await {
        Ok(name) => (
            true,
            Flash::success(format!("Artist {} was deleted.", name)),
        ),
        Err(e) => {
            log::warn!("artist {} could not be deleted: {}", id, e);
            (
                false,
                Flash::error(format!(
                    "An error occurred. Artist {} could not be deleted.",
                    id
                )),
            )
        }
    };

    HttpResponse::Ok()
        .append_header(flash.set_cookie())
        .json(DeleteResult { success })
}
