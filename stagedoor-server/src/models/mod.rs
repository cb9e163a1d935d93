//! Domain models and validation
//!
//! Raw form input arrives as `*FormInput` structs (everything optional,
//! straight from the decoded body) and is validated into `New*` values
//! before any SQL runs. Row/projection types returned by the repositories
//! also live here.

pub mod artist;
pub mod show;
pub mod validation;
pub mod venue;

pub use artist::{Artist, ArtistFormInput, ArtistSummary, NewArtist};
pub use show::{parse_start_time, ArtistShow, NewShow, ShowFormInput, ShowListing, VenueShow};
pub use validation::ValidationError;
pub use venue::{
    group_by_city, CityGroup, NewVenue, Venue, VenueFormInput, VenueListingRow, VenueSummary,
};
