//! View-model pieces shared by the venue and artist pages.

use crate::domain::ShowTiming;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of a listing or search page.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSummaryDto {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResultsDto {
    pub count: usize,
    pub data: Vec<ListingSummaryDto>,
}

impl SearchResultsDto {
    pub fn new(data: Vec<ListingSummaryDto>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Split `(start_time, item)` rows into `(past, upcoming)`, preserving order.
pub(crate) fn split_by_timing<T>(
    rows: Vec<(NaiveDateTime, T)>,
    now: NaiveDateTime,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (start_time, item) in rows {
        match ShowTiming::classify(start_time, now) {
            ShowTiming::Past => past.push(item),
            ShowTiming::Upcoming => upcoming.push(item),
            ShowTiming::Starting => {}
        }
    }
    (past, upcoming)
}
