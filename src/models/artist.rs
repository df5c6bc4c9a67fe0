//! Artist model.

use serde::{Deserialize, Serialize};

/// How many genres the artist panel shows.
pub const DISPLAYED_GENRES: usize = 3;

/// An artist as resolved from a search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// Spotify artist ID.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Follower count.
    pub followers_total: u64,

    /// Popularity score, 0 to 100.
    pub popularity: u8,

    /// Genre tags in catalog order. All are kept; only the first few are shown.
    #[serde(default)]
    pub genres: Vec<String>,

    /// First (largest) profile image, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Link to the artist page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl Artist {
    /// Create a new artist with ID and name.
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Genres surfaced to the artist panel.
    pub fn top_genres(&self) -> &[String] {
        &self.genres[..self.genres.len().min(DISPLAYED_GENRES)]
    }
}
