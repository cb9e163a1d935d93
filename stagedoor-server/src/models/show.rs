//! Show domain types
//!
//! A show pairs one venue with one artist at a start time. Shows are
//! created through the listing form and never edited or deleted here, so
//! the only write type is [`NewShow`].

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

use super::validation::{self, ValidationError};

/// Raw show form fields
#[derive(Debug, Default, Clone)]
pub struct ShowFormInput {
    pub venue_id: Option<String>,
    pub artist_id: Option<String>,
    pub start_time: Option<String>,
}

/// Validated show, ready to insert
#[derive(Debug, Clone)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

impl NewShow {
    pub fn validate(input: ShowFormInput) -> Result<Self, ValidationError> {
        let raw_time = validation::required("start_time", input.start_time, 64)?;
        Ok(Self {
            venue_id: validation::required_id("venue_id", input.venue_id)?,
            artist_id: validation::required_id("artist_id", input.artist_id)?,
            start_time: parse_start_time(&raw_time)?,
        })
    }
}

/// Parse a submitted start time as UTC.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (the listing form's default) and the
/// HTML datetime-local shapes `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_start_time(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    for format in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(ValidationError::InvalidTimestamp {
        field: "start_time",
        value: value.to_owned(),
    })
}

/// Row on the shows index, joined to both parents
#[derive(Debug, Clone, FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Show on a venue page, projected to the performing artist
#[derive(Debug, Clone, FromRow)]
pub struct ArtistShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Show on an artist page, projected to the hosting venue
#[derive(Debug, Clone, FromRow)]
pub struct VenueShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_space_separated_timestamp() {
        let t = parse_start_time("2035-06-15 20:00:00").unwrap();
        assert_eq!(t.hour(), 20);
        assert_eq!(t.to_rfc3339(), "2035-06-15T20:00:00+00:00");
    }

    #[test]
    fn parses_datetime_local_shapes() {
        assert!(parse_start_time("2035-06-15T20:00").is_ok());
        assert!(parse_start_time("2035-06-15T20:00:30").is_ok());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(matches!(
            parse_start_time("next friday").unwrap_err(),
            ValidationError::InvalidTimestamp { .. }
        ));
    }

    #[test]
    fn validate_requires_all_fields() {
        let err = NewShow::validate(ShowFormInput {
            venue_id: Some("1".into()),
            artist_id: None,
            start_time: Some("2035-06-15 20:00:00".into()),
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "artist_id" });
    }

    #[test]
    fn validate_builds_show() {
        let show = NewShow::validate(ShowFormInput {
            venue_id: Some("3".into()),
            artist_id: Some("7".into()),
            start_time: Some("2035-06-15 20:00:00".into()),
        })
        .unwrap();
        assert_eq!(show.venue_id, 3);
        assert_eq!(show.artist_id, 7);
    }
}
