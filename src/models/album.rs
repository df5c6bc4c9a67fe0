//! Album model.

use serde::{Deserialize, Serialize};

use super::common::ReleaseDate;

/// An album in an artist's discography.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Album {
    /// Spotify album ID.
    pub id: String,

    /// Album title.
    pub name: String,

    /// Release date; precision varies per album.
    pub release_date: ReleaseDate,

    /// Number of tracks.
    pub total_tracks: u32,

    /// First (largest) cover image, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Link to the album page in the catalog.
    pub external_url: String,
}

impl Album {
    /// Create a new album with ID and name.
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Singular or plural track count label.
    pub fn tracks_label(&self) -> String {
        match self.total_tracks {
            1 => "1 track".to_string(),
            n => format!("{} tracks", n),
        }
    }
}
