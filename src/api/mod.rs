//! API clients for Spotify.
//!
//! This module provides:
//! - [`TokenProvider`]: client-credentials token acquisition
//! - [`SpotifyApi`]: artist search and album listing
//! - [`CatalogApi`]: the seam the search session talks through

pub mod auth;
pub mod catalog;
#[cfg(test)]
pub(crate) mod test_server;

pub use auth::{Token, TokenProvider};
pub use catalog::SpotifyApi;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::error::Result;
use crate::models::{Album, Artist};

/// Remote operations a search session depends on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Exchange client credentials for a bearer token.
    async fn acquire_token(&self, credentials: &Credentials) -> Result<Token>;

    /// Resolve free text to the best-matching artist.
    async fn find_artist(&self, query: &str, token: &Token) -> Result<Artist>;

    /// List an artist's albums, one page only.
    async fn list_albums(&self, artist_id: &str, token: &Token) -> Result<Vec<Album>>;
}
