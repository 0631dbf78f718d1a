use crate::app::{
    venue_areas, venue_create, venue_delete, venue_edit_form, venue_get, venue_search,
    venue_update, FormChoices, FormFields, SearchResultsDto, VenueAreaDto, VenueDetailDto,
    VenueEditDto, VenueForm,
};
use crate::error::AppError;
use crate::handlers::page::{render, render_with_flash, Flash};
use crate::handlers::{blocking, DeleteResult, SearchForm};
use crate::infra::DbPool;
use actix_web::http::{header, StatusCode};
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VenuesPage {
    pub areas: Vec<VenueAreaDto>,
}

#[derive(Debug, Serialize)]
pub struct VenueSearchPage {
    pub results: SearchResultsDto,
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct VenuePage {
    pub venue: VenueDetailDto,
}

#[derive(Debug, Serialize)]
pub struct NewVenuePage {
    pub form: VenueForm,
    pub choices: FormChoices,
}

#[derive(Debug, Serialize)]
pub struct EditVenuePage {
    pub venue: VenueEditDto,
    pub choices: FormChoices,
}

/// Body of a rejected create submission; the form is echoed for redisplay.
#[derive(Debug, Serialize)]
pub struct VenueRejected {
    pub error: crate::error::AppErrorDto,
    pub form: VenueForm,
}

#[get("/venues")]
pub async fn list_venues(
    req: HttpRequest,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let areas = blocking(move || venue_areas(&pool)).await?;
    Ok(render(&req, StatusCode::OK, VenuesPage { areas }))
}

#[post("/venues/search")]
pub async fn search_venues(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, AppError> {
    let search_term = form.into_inner().search_term;
    let term = search_term.clone();
    let results = blocking(move || venue_search(&pool, &term)).await?;
    Ok(render(
        &req,
        StatusCode::OK,
        VenueSearchPage {
            results,
            search_term,
        },
    ))
}

#[get("/venues/create")]
pub async fn create_venue_form(req: HttpRequest) -> HttpResponse {
    render(
        &req,
        StatusCode::OK,
        NewVenuePage {
            form: VenueForm::default(),
            choices: FormChoices::load(),
        },
    )
}

#[post("/venues/create")]
pub async fn create_venue_submission(
    pool: web::Data<DbPool>,
    body: web::Form<Vec<(String, String)>>,
) -> HttpResponse {
    let form = VenueForm::from_fields(&FormFields::from_pairs(body.into_inner()));
    let echo = form.clone();
    let name = form.name.clone();

    match blocking(move || venue_create(&pool, form)).await {
        Ok(venue) => render_with_flash(
            StatusCode::CREATED,
            Flash::success(format!("Venue {} was successfully listed!", name)),
            VenuePage { venue },
        ),
        Err(e) => {
            match &e {
                AppError::Validation(msg) => log::warn!("venue {} rejected: {}", name, msg),
                other => log::error!("venue {} could not be listed: {}", name, other),
            }
            render_with_flash(
                e.status_code(),
                Flash::error(format!(
                    "An error occurred. Venue {} could not be listed.",
                    name
                )),
                VenueRejected {
                    error: e.to_serde(),
                    form: echo,
                },
            )
        }
    }
}

#[get("/venues/{id}")]
pub async fn show_venue(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let venue = blocking(move || venue_get(&pool, id)).await?;
    Ok(render(&req, StatusCode::OK, VenuePage { venue }))
}

#[get("/venues/{id}/edit")]
pub async fn edit_venue(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let venue = blocking(move || venue_edit_form(&pool, id)).await?;
    Ok(render(
        &req,
        StatusCode::OK,
        EditVenuePage {
            venue,
            choices: FormChoices::load(),
        },
    ))
}

/// Always redirects back to the venue page, carrying the outcome as a flash.
#[post("/venues/{id}/edit")]
pub async fn edit_venue_submission(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    body: web::Form<Vec<(String, String)>>,
) -> HttpResponse {
    let id = path.into_inner();
    let form = VenueForm::from_fields(&FormFields::from_pairs(body.into_inner()));
    let name = form.name.clone();

    let flash = match blocking(move || venue_update(&pool, id, form)).await {
        Ok(_) => Flash::success(format!("Venue {} was successfully edited!", name)),
        Err(e) => {
            log::warn!("venue {} could not be edited: {}", id, e);
            Flash::error(format!(
                "An error occurred. Venue {} could not be edited.",
                name
            ))
        }
    };

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/venues/{}", id)))
        .append_header(flash.set_cookie())
        .finish()
}

#[delete("/venues/{id}")]
pub async fn delete_venue(pool: web::Data<DbPool>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let (success, flash) = match blocking(move || venue_delete(&pool, id)).await {
        Ok(name) => (
            true,
            Flash::success(format!("Venue {} was deleted.", name)),
        ),
        Err(e) => {
            log::warn!("venue {} could not be deleted: {}", id, e);
            (
                false,
                Flash::error(format!(
                    "An error occurred. Venue {} could not be deleted.",
                    id
                )),
            )
        }
    };

    HttpResponse::Ok()
        .append_header(flash.set_cookie())
        .json(DeleteResult { success })
}
