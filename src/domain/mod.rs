//! Reference data and derived show timing.

pub mod genre;
pub mod show_time;
pub mod us_state;

pub use genre::{join_genres, split_genres, Genre};
pub use show_time::{format_start_time, now, parse_start_time, ShowTiming};
pub use us_state::UsState;
