//! Application use cases and transactions.

mod artist;
mod form;
mod listing;
mod show;
mod venue;

pub use artist::{
    artist_create, artist_delete, artist_edit_form, artist_get, artist_list, artist_search,
    artist_update, ArtistDetailDto, ArtistEditDto, ArtistShowDto,
};
pub use form::{ArtistForm, FormChoices, FormFields, NewShow, ShowForm, VenueForm};
pub use listing::{ListingSummaryDto, SearchResultsDto};
pub use show::{show_create, show_get, show_list, ShowDto};
pub use venue::{
    venue_areas, venue_create, venue_delete, venue_edit_form, venue_get, venue_search,
    venue_update, VenueAreaDto, VenueDetailDto, VenueEditDto, VenueShowDto,
};
