//! Form submissions: URL-encoded pairs into typed, validated forms.

use crate::domain::{parse_start_time, Genre, UsState};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Optional `+`, optional country code 1, optional parentheses around the area
/// code, optional space/dot/hyphen separators between the digit blocks.
static US_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+)?(1)?[\s.-]?(\()?([0-9]{3})(\))?[\s.-]?([0-9]{3})[\s.-]?([0-9]{4})$")
        .unwrap_or_else(|e| panic!("phone pattern: {e}"))
});

/// Raw submission as ordered key/value pairs. Keys may repeat.
#[derive(Debug, Default, Clone)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `key`, untouched.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed value, empty when missing.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// Trimmed value; missing and blank are both `None`.
    pub fn optional(&self, key: &str) -> Option<String> {
        Some(self.text(key)).filter(|v| !v.is_empty())
    }

    /// Every non-blank value submitted under `key`, in order.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Checkbox semantics: a box is ticked iff its field was submitted at all.
    pub fn has(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if US_PHONE.is_match(phone) {
        Ok(())
    } else {
        Err(field_error(
            "phone",
            "Hmm, that doesn't look like a US phone number. Try again!",
        ))
    }
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if state.is_empty() {
        return Err(field_error("required", "state is required"));
    }
    match UsState::from_str(state) {
        Some(_) => Ok(()),
        None => Err(field_error("state", format!("unknown state '{state}'"))),
    }
}

fn validate_genres(genres: &[String]) -> Result<(), ValidationError> {
    match genres.iter().find(|g| Genre::from_str(g).is_none()) {
        None => Ok(()),
        Some(bad) => Err(field_error("genre", format!("unknown genre '{bad}'"))),
    }
}

fn validate_id(id: &str) -> Result<(), ValidationError> {
    match id.parse::<i64>() {
        Ok(n) if n > 0 => Ok(()),
        _ if id.is_empty() => Err(field_error("required", "is required")),
        _ => Err(field_error("id", "must be a positive integer")),
    }
}

fn validate_start_time(start_time: &str) -> Result<(), ValidationError> {
    if parse_start_time(start_time).is_some() {
        Ok(())
    } else {
        Err(field_error(
            "start_time",
            "expected YYYY-MM-DD HH:MM[:SS]",
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct VenueForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    pub image_link: Option<String>,
    #[validate(
        length(min = 1, message = "choose at least one genre"),
        custom(function = "validate_genres")
    )]
    pub genres: Vec<String>,
    #[validate(url(message = "facebook_link must be a valid URL"))]
    pub facebook_link: Option<String>,
    #[validate(url(message = "website_link must be a valid URL"))]
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            address: fields.text("address"),
            phone: fields.optional("phone"),
            image_link: fields.optional("image_link"),
            genres: fields.all("genres"),
            facebook_link: fields.optional("facebook_link"),
            website_link: fields.optional("website_link"),
            seeking_talent: fields.has("seeking_talent"),
            seeking_description: fields.optional("seeking_description"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ArtistForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    pub image_link: Option<String>,
    #[validate(
        length(min = 1, message = "choose at least one genre"),
        custom(function = "validate_genres")
    )]
    pub genres: Vec<String>,
    #[validate(url(message = "facebook_link must be a valid URL"))]
    pub facebook_link: Option<String>,
    #[validate(url(message = "website_link must be a valid URL"))]
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            phone: fields.optional("phone"),
            image_link: fields.optional("image_link"),
            genres: fields.all("genres"),
            facebook_link: fields.optional("facebook_link"),
            website_link: fields.optional("website_link"),
            seeking_venue: fields.has("seeking_venue"),
            seeking_description: fields.optional("seeking_description"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ShowForm {
    #[validate(custom(function = "validate_id"))]
    pub artist_id: String,
    #[validate(custom(function = "validate_id"))]
    pub venue_id: String,
    #[validate(custom(function = "validate_start_time"))]
    pub start_time: String,
}

/// A show submission that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            artist_id: fields.text("artist_id"),
            venue_id: fields.text("venue_id"),
            start_time: fields.text("start_time"),
        }
    }

    /// Validate and convert in one step.
    pub fn parse(&self) -> Result<NewShow, crate::error::AppError> {
        self.validate()?;
        match (
            self.artist_id.parse(),
            self.venue_id.parse(),
            parse_start_time(&self.start_time),
        ) {
            (Ok(artist_id), Ok(venue_id), Some(start_time)) => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(crate::error::AppError::Validation(
                "malformed show submission".into(),
            )),
        }
    }
}

/// Choice lists for the state and genre selects.
#[derive(Debug, Serialize)]
pub struct FormChoices {
    pub states: Vec<&'static str>,
    pub genres: Vec<&'static str>,
}

impl FormChoices {
    pub fn load() -> Self {
        Self {
            states: UsState::all().iter().map(UsState::as_str).collect(),
            genres: Genre::all().iter().map(Genre::as_str).collect(),
        }
    }
}
