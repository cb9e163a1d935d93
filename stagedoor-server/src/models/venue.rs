//! Venue domain types and the city/state grouping used by the index page

use std::collections::BTreeMap;

use sqlx::FromRow;

use super::validation::{self, ValidationError};

/// Placeholder shown until a venue writes its own seeking blurb
pub const DEFAULT_VENUE_SEEKING_DESCRIPTION: &str =
    "Please update your talent seeking description here.";

/// Venue row as stored
#[derive(Debug, Clone, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub looking_for_talent: bool,
    pub seeking_description: String,
}

/// Raw venue form fields, straight from the decoded body
#[derive(Debug, Default, Clone)]
pub struct VenueFormInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub looking_for_talent: bool,
    pub seeking_description: Option<String>,
}

/// Validated venue fields, ready to insert or to fully replace a row
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub looking_for_talent: bool,
    pub seeking_description: String,
}

impl NewVenue {
    /// Validate raw form input into an insertable venue.
    ///
    /// Required: name, city, state, address, phone, image_link, and at
    /// least one genre. A blank seeking description falls back to the
    /// placeholder the schema also defaults to.
    pub fn validate(input: VenueFormInput) -> Result<Self, ValidationError> {
        let genres = validate_genres(input.genres)?;
        Ok(Self {
            name: validation::required("name", input.name, 120)?,
            city: validation::required("city", input.city, 120)?,
            state: validation::required("state", input.state, 120)?,
            address: validation::required("address", input.address, 120)?,
            phone: validation::required("phone", input.phone, 120)?,
            image_link: validation::required("image_link", input.image_link, 500)?,
            facebook_link: validation::optional("facebook_link", input.facebook_link, 120)?,
            website_link: validation::optional("website_link", input.website_link, 120)?,
            genres,
            looking_for_talent: input.looking_for_talent,
            seeking_description: validation::optional(
                "seeking_description",
                input.seeking_description,
                500,
            )?
            .unwrap_or_else(|| DEFAULT_VENUE_SEEKING_DESCRIPTION.to_owned()),
        })
    }
}

/// Validate a genre list: drop blanks, require at least one entry.
pub(crate) fn validate_genres(genres: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let genres: Vec<String> = genres
        .into_iter()
        .map(|g| g.trim().to_owned())
        .filter(|g| !g.is_empty())
        .collect();
    if genres.is_empty() {
        return Err(ValidationError::Empty { field: "genres" });
    }
    for genre in &genres {
        if genre.chars().count() > 120 {
            return Err(ValidationError::TooLong { field: "genres", max: 120 });
        }
    }
    Ok(genres)
}

/// Venue entry on the index and search pages
#[derive(Debug, Clone, FromRow)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Index row carrying the locale alongside the summary
#[derive(Debug, Clone, FromRow)]
pub struct VenueListingRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing a (city, state) pair
#[derive(Debug, Clone)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Group venues by (city, state).
///
/// Keyed map rather than a previous-group comparison, so the result does
/// not depend on the ordering of the input rows. Groups come back sorted
/// by city then state.
pub fn group_by_city(rows: Vec<VenueListingRow>) -> Vec<CityGroup> {
    let mut groups: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.city, row.state))
            .or_default()
            .push(VenueSummary {
                id: row.id,
                name: row.name,
                num_upcoming_shows: row.num_upcoming_shows,
            });
    }
    groups
        .into_iter()
        .map(|((city, state), venues)| CityGroup { city, state, venues })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, city: &str, state: &str) -> VenueListingRow {
        VenueListingRow {
            id,
            name: name.into(),
            city: city.into(),
            state: state.into(),
            num_upcoming_shows: 0,
        }
    }

    fn input(name: &str) -> VenueFormInput {
        VenueFormInput {
            name: Some(name.into()),
            city: Some("San Francisco".into()),
            state: Some("CA".into()),
            address: Some("1015 Folsom Street".into()),
            phone: Some("123-123-1234".into()),
            image_link: Some("https://example.com/venue.jpg".into()),
            genres: vec!["Jazz".into(), "Folk".into()],
            ..Default::default()
        }
    }

    #[test]
    fn grouping_is_order_independent() {
        // Same-city rows separated by another city must still merge
        let interleaved = vec![
            row(1, "The Musical Hop", "San Francisco", "CA"),
            row(2, "The Dueling Pianos Bar", "New York", "NY"),
            row(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
        ];
        let groups = group_by_city(interleaved);
        assert_eq!(groups.len(), 2);

        let sf = groups.iter().find(|g| g.city == "San Francisco").unwrap();
        assert_eq!(sf.state, "CA");
        assert_eq!(sf.venues.len(), 2);
    }

    #[test]
    fn same_city_different_state_stays_split() {
        let groups = group_by_city(vec![
            row(1, "A", "Springfield", "IL"),
            row(2, "B", "Springfield", "MO"),
        ]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn validate_accepts_full_input() {
        let venue = NewVenue::validate(input("The Musical Hop")).unwrap();
        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.genres, vec!["Jazz".to_owned(), "Folk".to_owned()]);
        assert!(!venue.looking_for_talent);
        assert_eq!(venue.seeking_description, DEFAULT_VENUE_SEEKING_DESCRIPTION);
    }

    #[test]
    fn validate_rejects_missing_name() {
        let mut bad = input("x");
        bad.name = None;
        assert_eq!(
            NewVenue::validate(bad).unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
    }

    #[test]
    fn validate_requires_a_genre() {
        let mut bad = input("The Musical Hop");
        bad.genres = vec!["  ".into()];
        assert_eq!(
            NewVenue::validate(bad).unwrap_err(),
            ValidationError::Empty { field: "genres" }
        );
    }

    #[test]
    fn blank_optional_links_become_none() {
        let mut ok = input("The Musical Hop");
        ok.facebook_link = Some("".into());
        ok.website_link = Some(" https://musicalhop.com ".into());
        let venue = NewVenue::validate(ok).unwrap();
        assert_eq!(venue.facebook_link, None);
        assert_eq!(venue.website_link, Some("https://musicalhop.com".into()));
    }
}
