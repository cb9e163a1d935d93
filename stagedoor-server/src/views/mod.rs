//! Askama templates and the view models they render
//!
//! Projection types here hold display-ready strings: optional links are
//! flattened to empty strings and timestamps are preformatted, so the
//! templates stay free of Option handling.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::models::{
    Artist, ArtistShow, ArtistSummary, CityGroup, ShowListing, Venue, VenueShow, VenueSummary,
};

/// Display format for show start times, e.g. "Sat Jun 15, 2035 8:00PM"
pub fn format_start_time(t: DateTime<Utc>) -> String {
    t.format("%a %b %-d, %Y %-I:%M%p").to_string()
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub title: String,
    pub message: String,
}

// ---------------------------------------------------------------------
// Venues

#[derive(Template)]
#[template(path = "venues.html")]
pub struct VenuesTemplate {
    pub areas: Vec<CityGroup>,
}

#[derive(Template)]
#[template(path = "search_venues.html")]
pub struct SearchVenuesTemplate {
    pub term: String,
    pub count: usize,
    pub results: Vec<VenueSummary>,
}

/// Venue projected for display
pub struct VenueView {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub facebook_link: String,
    pub looking_for_talent: bool,
    pub seeking_description: String,
    pub image_link: String,
}

impl From<Venue> for VenueView {
    fn from(v: Venue) -> Self {
        Self {
            id: v.id,
            name: v.name,
            genres: v.genres,
            address: v.address,
            city: v.city,
            state: v.state,
            phone: v.phone,
            website_link: v.website_link.unwrap_or_default(),
            facebook_link: v.facebook_link.unwrap_or_default(),
            looking_for_talent: v.looking_for_talent,
            seeking_description: v.seeking_description,
            image_link: v.image_link,
        }
    }
}

/// Show row on a venue page
pub struct ArtistShowView {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<ArtistShow> for ArtistShowView {
    fn from(s: ArtistShow) -> Self {
        Self {
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: format_start_time(s.start_time),
        }
    }
}

#[derive(Template)]
#[template(path = "venue_detail.html")]
pub struct VenueDetailTemplate {
    pub venue: VenueView,
    pub past_shows: Vec<ArtistShowView>,
    pub upcoming_shows: Vec<ArtistShowView>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Template)]
#[template(path = "venue_form.html")]
pub struct VenueFormTemplate {
    pub title: String,
    pub action: String,
    pub venue: VenueView,
}

impl VenueFormTemplate {
    /// Empty form for the create page.
    pub fn new_venue() -> Self {
        Self {
            title: "List a new venue".into(),
            action: "/venues/create".into(),
            venue: VenueView {
                id: 0,
                name: String::new(),
                genres: Vec::new(),
                address: String::new(),
                city: String::new(),
                state: String::new(),
                phone: String::new(),
                website_link: String::new(),
                facebook_link: String::new(),
                looking_for_talent: false,
                seeking_description: String::new(),
                image_link: String::new(),
            },
        }
    }

    /// Prefilled form for the edit page.
    pub fn edit_venue(venue: Venue) -> Self {
        Self {
            title: format!("Edit venue {}", venue.name),
            action: format!("/venues/{}/edit", venue.id),
            venue: venue.into(),
        }
    }
}

// ---------------------------------------------------------------------
// Artists

#[derive(Template)]
#[template(path = "artists.html")]
pub struct ArtistsTemplate {
    pub artists: Vec<Artist>,
}

#[derive(Template)]
#[template(path = "search_artists.html")]
pub struct SearchArtistsTemplate {
    pub term: String,
    pub count: usize,
    pub results: Vec<ArtistSummary>,
}

/// Artist projected for display
pub struct ArtistView {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub facebook_link: String,
    pub looking_for_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
}

impl From<Artist> for ArtistView {
    fn from(a: Artist) -> Self {
        Self {
            id: a.id,
            name: a.name,
            genres: a.genres,
            city: a.city,
            state: a.state,
            phone: a.phone,
            website_link: a.website_link.unwrap_or_default(),
            facebook_link: a.facebook_link.unwrap_or_default(),
            looking_for_venue: a.looking_for_venue,
            seeking_description: a.seeking_description,
            image_link: a.image_link,
        }
    }
}

/// Show row on an artist page
pub struct VenueShowView {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

impl From<VenueShow> for VenueShowView {
    fn from(s: VenueShow) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            venue_image_link: s.venue_image_link,
            start_time: format_start_time(s.start_time),
        }
    }
}

#[derive(Template)]
#[template(path = "artist_detail.html")]
pub struct ArtistDetailTemplate {
    pub artist: ArtistView,
    pub past_shows: Vec<VenueShowView>,
    pub upcoming_shows: Vec<VenueShowView>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Template)]
#[template(path = "artist_form.html")]
pub struct ArtistFormTemplate {
    pub title: String,
    pub action: String,
    pub artist: ArtistView,
}

impl ArtistFormTemplate {
    pub fn new_artist() -> Self {
        Self {
            title: "List a new artist".into(),
            action: "/artists/create".into(),
            artist: ArtistView {
                id: 0,
                name: String::new(),
                genres: Vec::new(),
                city: String::new(),
                state: String::new(),
                phone: String::new(),
                website_link: String::new(),
                facebook_link: String::new(),
                looking_for_venue: false,
                seeking_description: String::new(),
                image_link: String::new(),
            },
        }
    }

    pub fn edit_artist(artist: Artist) -> Self {
        Self {
            title: format!("Edit artist {}", artist.name),
            action: format!("/artists/{}/edit", artist.id),
            artist: artist.into(),
        }
    }
}

// ---------------------------------------------------------------------
// Shows

/// Row on the shows index
pub struct ShowListingView {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<ShowListing> for ShowListingView {
    fn from(s: ShowListing) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: format_start_time(s.start_time),
        }
    }
}

#[derive(Template)]
#[template(path = "shows.html")]
pub struct ShowsTemplate {
    pub shows: Vec<ShowListingView>,
}

#[derive(Template)]
#[template(path = "show_form.html")]
pub struct ShowFormTemplate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_time_display_format() {
        let t = "2035-06-16T20:05:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(format_start_time(t), "Sat Jun 16, 2035 8:05PM");
    }

    #[test]
    fn venues_template_renders_groups() {
        let html = VenuesTemplate {
            areas: vec![CityGroup {
                city: "San Francisco".into(),
                state: "CA".into(),
                venues: vec![VenueSummary {
                    id: 1,
                    name: "The Musical Hop".into(),
                    num_upcoming_shows: 2,
                }],
            }],
        }
        .render()
        .expect("template renders");
        assert!(html.contains("San Francisco"));
        assert!(html.contains("The Musical Hop"));
        assert!(html.contains("/venues/1"));
    }

    #[test]
    fn search_template_shows_count_and_term() {
        let html = SearchVenuesTemplate {
            term: "hop".into(),
            count: 1,
            results: vec![VenueSummary {
                id: 1,
                name: "The Musical Hop".into(),
                num_upcoming_shows: 0,
            }],
        }
        .render()
        .expect("template renders");
        assert!(html.contains("hop"));
        assert!(html.contains("1 result"));
    }

    #[test]
    fn error_template_renders() {
        let html = ErrorTemplate {
            status: 404,
            title: "Not Found".into(),
            message: "venue '99' not found".into(),
        }
        .render()
        .expect("template renders");
        assert!(html.contains("404"));
        assert!(html.contains("venue &#x27;99&#x27; not found") || html.contains("venue '99' not found"));
    }

    #[test]
    fn empty_venue_form_renders() {
        let html = VenueFormTemplate::new_venue().render().expect("template renders");
        assert!(html.contains("/venues/create"));
    }
}
