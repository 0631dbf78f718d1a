//! US state codes accepted as a listing's state.

use serde::Serialize;

static CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UsState(&'static str);

impl UsState {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Exact, case-sensitive match on the two-letter code.
    pub fn from_str(s: &str) -> Option<Self> {
        CODES.iter().find(|c| **c == s).map(|c| Self(*c))
    }

    pub fn all() -> Vec<Self> {
        CODES.iter().map(|c| Self(*c)).collect()
    }
}
