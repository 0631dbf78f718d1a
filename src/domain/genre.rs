//! Music genres accepted on venue and artist listings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    HipHop,
    HeavyMetal,
    Instrumental,
    Jazz,
    MusicalTheatre,
    Pop,
    Punk,
    RnB,
    Reggae,
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    /// Label used both in storage and in form choices.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alternative => "Alternative",
            Self::Blues => "Blues",
            Self::Classical => "Classical",
            Self::Country => "Country",
            Self::Electronic => "Electronic",
            Self::Folk => "Folk",
            Self::Funk => "Funk",
            Self::HipHop => "Hip-Hop",
            Self::HeavyMetal => "Heavy Metal",
            Self::Instrumental => "Instrumental",
            Self::Jazz => "Jazz",
            Self::MusicalTheatre => "Musical Theatre",
            Self::Pop => "Pop",
            Self::Punk => "Punk",
            Self::RnB => "R&B",
            Self::Reggae => "Reggae",
            Self::RockNRoll => "Rock n Roll",
            Self::Soul => "Soul",
            Self::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|g| g.as_str() == s)
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Alternative,
            Self::Blues,
            Self::Classical,
            Self::Country,
            Self::Electronic,
            Self::Folk,
            Self::Funk,
            Self::HipHop,
            Self::HeavyMetal,
            Self::Instrumental,
            Self::Jazz,
            Self::MusicalTheatre,
            Self::Pop,
            Self::Punk,
            Self::RnB,
            Self::Reggae,
            Self::RockNRoll,
            Self::Soul,
            Self::Other,
        ]
    }
}

/// Storage form: labels joined with `,`.
pub fn join_genres(genres: &[String]) -> String {
    genres.join(",")
}

/// Inverse of [`join_genres`]. Also accepts the `{a,b}` array literal
/// that older rows were written with.
pub fn split_genres(stored: &str) -> Vec<String> {
    stored
        .trim_matches(|c| c == '{' || c == '}')
        .split(',')
        .map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
