//! Show listing and booking.

use crate::app::{show_create, show_list, FormFields, ShowDto, ShowForm};
use crate::error::AppError;
use crate::handlers::blocking;
use crate::handlers::page::{render, render_with_flash, Flash};
use crate::infra::DbPool;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShowsPage {
    pub shows: Vec<ShowDto>,
}

#[derive(Debug, Serialize)]
pub struct NewShowPage {
    pub form: ShowForm,
}

#[derive(Debug, Serialize)]
pub struct ShowPage {
    pub show: ShowDto,
}

#[derive(Debug, Serialize)]
pub struct ShowRejected {
    pub error: crate::error::AppErrorDto,
    pub form: ShowForm,
}

#[get("/shows")]
pub async fn list_shows(
    req: HttpRequest,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let shows = blocking(move || show_list(&pool)).await?;
    Ok(render(&req, StatusCode::OK, ShowsPage { shows }))
}

#[get("/shows/create")]
pub async fn create_show_form(req: HttpRequest) -> HttpResponse {
    let form = ShowForm {
        start_time: crate::domain::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ..ShowForm::default()
    };
    render(&req, StatusCode::OK, NewShowPage { form })
}

#[post("/shows/create")]
pub async fn create_show_submission(
    pool: web::Data<DbPool>,
    body: web::Form<Vec<(String, String)>>,
) -> HttpResponse {
    let form = ShowForm::from_fields(&FormFields::from_pairs(body.into_inner()));
    let echo = form.clone();

    match blocking(move || show_create(&pool, form)).await {
        Ok(show) => render_with_flash(
            StatusCode::CREATED,
            Flash::success("Show was successfully listed!"),
            ShowPage { show },
        ),
        Err(e) => {
            match &e {
                AppError::Validation(msg) => log::warn!("show rejected: {}", msg),
                other => log::error!("show could not be listed: {}", other),
            }
            render_with_flash(
                e.status_code(),
                Flash::error("An error occurred. Show could not be listed."),
                ShowRejected {
                    error: e.to_serde(),
                    form: echo,
                },
            )
        }
    }
}
