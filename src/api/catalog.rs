//! Spotify Web API client.
//!
//! Covers the two catalog calls the finder needs: artist search and the
//! artist-albums listing. Both require a bearer token from
//! [`TokenProvider`].

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, error, info};

use super::auth::{Token, TokenProvider};
use super::CatalogApi;
use crate::config::{Config, Credentials};
use crate::converters;
use crate::error::{FinderError, Result};
use crate::models::{Album, Artist};

/// Album groups requested from the albums endpoint.
const ALBUM_GROUPS: &str = "album";

/// Spotify Web API client.
///
/// # Example
///
/// ```rust,no_run
/// use artist_finder::{Config, Credentials, SpotifyApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::new(Credentials::new("client-id", "client-secret"));
///     let api = SpotifyApi::new(&config)?;
///     let token = api.token_provider().acquire(&config.credentials).await?;
///     let artist = api.search_artist("Radiohead", &token).await?;
///     println!("{} ({} followers)", artist.name, artist.followers_total);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyApi {
    client: Client,
    tokens: TokenProvider,
    config: Config,
}

impl SpotifyApi {
    /// Create a new client for the endpoints named in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("artist-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FinderError::Config(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            tokens: TokenProvider::new(client.clone(), config.token_url()),
            client,
            config: config.clone(),
        })
    }

    pub fn token_provider(&self) -> &TokenProvider {
        &self.tokens
    }

    /// Web API URL for `segments`, each one percent-encoded as a single
    /// path segment.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            FinderError::Config(format!("Invalid API URL {}: {}", self.config.api_base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                FinderError::Config(format!("API URL {} cannot take a path", self.config.api_base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make an authenticated GET request with query parameters.
    async fn get_api_with_params(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
        token: &Token,
    ) -> Result<Value> {
        let url = self.endpoint_url(segments)?;
        debug!("GET {} with params: {:?}", url, params);

        let response = self
            .client
            .get(url)
            .query(params)
            .bearer_auth(token.value())
            .send()
            .await?;
        let data: Value = response.json().await?;

        if let Some(err) = converters::api_error(&data) {
            error!("Spotify API error: {}", err);
            return Err(err);
        }

        Ok(data)
    }

    /// Search for an artist and return the best match.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank query (no request is made), `NotFound` when
    /// the search comes back empty.
    pub async fn search_artist(&self, query: &str, token: &Token) -> Result<Artist> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FinderError::Validation("search query is blank".to_string()));
        }

        let response = self
            .get_api_with_params(&["v1", "search"], &[("q", query), ("type", "artist")], token)
            .await?;

        let artist = converters::parse_search_response(&response, query)?;
        info!("Resolved '{}' to {} ({})", query, artist.name, artist.id);
        Ok(artist)
    }

    /// Get one page of an artist's albums.
    ///
    /// Singles, compilations and appearances are excluded. Albums past the
    /// configured limit are not fetched.
    pub async fn get_artist_albums(&self, artist_id: &str, token: &Token) -> Result<Vec<Album>> {
        let limit = self.config.album_limit.to_string();
        let response = self
            .get_api_with_params(
                &["v1", "artists", artist_id, "albums"],
                &[
                    ("include_groups", ALBUM_GROUPS),
                    ("market", self.config.market.as_str()),
                    ("limit", limit.as_str()),
                ],
                token,
            )
            .await?;

        let albums = converters::parse_albums_page(&response);
        debug!("Fetched {} albums for artist {}", albums.len(), artist_id);
        Ok(albums)
    }
}

#[async_trait]
impl CatalogApi for SpotifyApi {
    async fn acquire_token(&self, credentials: &Credentials) -> Result<Token> {
        self.tokens.acquire(credentials).await
    }

    async fn find_artist(&self, query: &str, token: &Token) -> Result<Artist> {
        self.search_artist(query, token).await
    }

    async fn list_albums(&self, artist_id: &str, token: &Token) -> Result<Vec<Album>> {
        self.get_artist_albums(artist_id, token).await
    }
}
