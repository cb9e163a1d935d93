//! Form body decoding
//!
//! The create/edit pages submit `application/x-www-form-urlencoded`
//! bodies. Decoding goes through `form_urlencoded` rather than a serde
//! extractor because genres arrive as repeated keys and the "looking for"
//! checkboxes are presence-only: a checkbox that appears in the
//! submission at all means true.

use crate::models::{ArtistFormInput, ShowFormInput, VenueFormInput};

/// Decoded form body as ordered key/value pairs
#[derive(Debug, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            pairs: form_urlencoded::parse(bytes).into_owned().collect(),
        }
    }

    /// First value for a key, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Whether the key appeared in the submission at all.
    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Genre values: repeated keys from a multi-select, each possibly
    /// itself comma separated (the plain text input joins with commas).
    pub fn genres(&self) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == "genres")
            .flat_map(|(_, v)| v.split(','))
            .map(|g| g.trim().to_owned())
            .filter(|g| !g.is_empty())
            .collect()
    }

    pub fn venue_input(&self) -> VenueFormInput {
        VenueFormInput {
            name: self.get("name"),
            city: self.get("city"),
            state: self.get("state"),
            address: self.get("address"),
            phone: self.get("phone"),
            image_link: self.get("image_link"),
            facebook_link: self.get("facebook_link"),
            website_link: self.get("website_link"),
            genres: self.genres(),
            looking_for_talent: self.has("looking_for_talent"),
            seeking_description: self.get("seeking_description"),
        }
    }

    pub fn artist_input(&self) -> ArtistFormInput {
        ArtistFormInput {
            name: self.get("name"),
            city: self.get("city"),
            state: self.get("state"),
            phone: self.get("phone"),
            image_link: self.get("image_link"),
            facebook_link: self.get("facebook_link"),
            website_link: self.get("website_link"),
            genres: self.genres(),
            looking_for_venue: self.has("looking_for_venue"),
            seeking_description: self.get("seeking_description"),
        }
    }

    pub fn show_input(&self) -> ShowFormInput {
        ShowFormInput {
            venue_id: self.get("venue_id"),
            artist_id: self.get("artist_id"),
            start_time: self.get("start_time"),
        }
    }
}
