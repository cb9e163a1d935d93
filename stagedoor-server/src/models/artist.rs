//! Artist domain types

use sqlx::FromRow;

use super::validation::{self, ValidationError};
use super::venue::validate_genres;

/// Placeholder shown until an artist writes its own seeking blurb
pub const DEFAULT_ARTIST_SEEKING_DESCRIPTION: &str =
    "Please update your venue seeking description here.";

/// Artist row as stored
#[derive(Debug, Clone, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub looking_for_venue: bool,
    pub seeking_description: String,
}

/// Raw artist form fields, straight from the decoded body
#[derive(Debug, Default, Clone)]
pub struct ArtistFormInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub looking_for_venue: bool,
    pub seeking_description: Option<String>,
}

/// Validated artist fields, ready to insert or to fully replace a row
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub looking_for_venue: bool,
    pub seeking_description: String,
}

impl NewArtist {
    /// Validate raw form input into an insertable artist.
    pub fn validate(input: ArtistFormInput) -> Result<Self, ValidationError> {
        let genres = validate_genres(input.genres)?;
        Ok(Self {
            name: validation::required("name", input.name, 120)?,
            city: validation::required("city", input.city, 120)?,
            state: validation::required("state", input.state, 120)?,
            phone: validation::required("phone", input.phone, 120)?,
            image_link: validation::required("image_link", input.image_link, 500)?,
            facebook_link: validation::optional("facebook_link", input.facebook_link, 120)?,
            website_link: validation::optional("website_link", input.website_link, 120)?,
            genres,
            looking_for_venue: input.looking_for_venue,
            seeking_description: validation::optional(
                "seeking_description",
                input.seeking_description,
                500,
            )?
            .unwrap_or_else(|| DEFAULT_ARTIST_SEEKING_DESCRIPTION.to_owned()),
        })
    }
}

/// Artist entry on the index and search pages
#[derive(Debug, Clone, FromRow)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ArtistFormInput {
        ArtistFormInput {
            name: Some("Guns N Petals".into()),
            city: Some("San Francisco".into()),
            state: Some("CA".into()),
            phone: Some("326-123-5000".into()),
            image_link: Some("https://example.com/artist.jpg".into()),
            genres: vec!["Rock n Roll".into()],
            looking_for_venue: true,
            seeking_description: Some("Looking for shows to perform at!".into()),
            ..Default::default()
        }
    }

    #[test]
    fn validate_accepts_full_input() {
        let artist = NewArtist::validate(input()).unwrap();
        assert_eq!(artist.name, "Guns N Petals");
        assert!(artist.looking_for_venue);
        assert_eq!(artist.seeking_description, "Looking for shows to perform at!");
    }

    #[test]
    fn blank_description_falls_back_to_placeholder() {
        let mut raw = input();
        raw.seeking_description = None;
        let artist = NewArtist::validate(raw).unwrap();
        assert_eq!(artist.seeking_description, DEFAULT_ARTIST_SEEKING_DESCRIPTION);
    }

    #[test]
    fn validate_rejects_missing_phone() {
        let mut bad = input();
        bad.phone = Some("".into());
        assert_eq!(
            NewArtist::validate(bad).unwrap_err(),
            ValidationError::Empty { field: "phone" }
        );
    }
}
