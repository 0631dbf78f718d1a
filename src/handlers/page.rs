//! Page envelope and one-shot flash messages.
//!
//! A flash is stored in a cookie by the response that produces it and
//! consumed (then cleared) by the next page that is rendered.

use actix_web::cookie::Cookie;
use actix_web::http::header::{self, HeaderName};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::Serialize;

pub const FLASH_COOKIE: &str = "fyyur_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    fn to_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(
            FLASH_COOKIE,
            format!("{}:{}", self.level.as_str(), self.message),
        );
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie
    }

    /// `Set-Cookie` header with the value percent-encoded. Messages carry user
    /// supplied names, which may contain `;` or `=`.
    pub fn set_cookie(&self) -> (HeaderName, String) {
        (header::SET_COOKIE, self.to_cookie().encoded().to_string())
    }

    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let (level, message) = value.split_once(':')?;
        let level = match level {
            "success" => FlashLevel::Success,
            "error" => FlashLevel::Error,
            _ => return None,
        };
        Some(Self {
            level,
            message: message.to_string(),
        })
    }

    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        req.cookie(FLASH_COOKIE)
            .and_then(|c| Self::from_cookie_value(c.value()))
    }
}

fn flash_removal() -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// What a template would receive: the view model plus any pending flash.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    #[serde(flatten)]
    pub body: T,
}

/// Render a page, consuming the flash carried by the request.
pub fn render<T: Serialize>(req: &HttpRequest, status: StatusCode, body: T) -> HttpResponse {
    let flash = Flash::from_request(req);
    let mut builder = HttpResponseBuilder::new(status);
    if flash.is_some() {
        builder.cookie(flash_removal());
    }
    builder.json(Page { flash, body })
}

/// Render a page with a flash produced by this very request.
pub fn render_with_flash<T: Serialize>(status: StatusCode, flash: Flash, body: T) -> HttpResponse {
    HttpResponseBuilder::new(status).json(Page {
        flash: Some(flash),
        body,
    })
}
