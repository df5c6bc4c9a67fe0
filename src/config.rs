//! Session configuration.
//!
//! Everything the session needs from the outside world is carried in a
//! [`Config`] value. The library never reads the environment itself; the
//! CLI builds a `Config` from its arguments.

use std::fmt;

/// Spotify accounts service.
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Spotify Web API.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Market used to filter album availability.
pub const DEFAULT_MARKET: &str = "US";

/// Largest page the albums endpoint accepts.
pub const MAX_ALBUM_LIMIT: u32 = 50;

/// Client-credentials pair for the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new<S1: Into<String>, S2: Into<String>>(client_id: S1, client_secret: S2) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both halves are present.
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for a [`SearchSession`](crate::SearchSession).
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// Base URL of the accounts service (token endpoint).
    pub accounts_url: String,
    /// Base URL of the Web API (search and albums endpoints).
    pub api_base_url: String,
    /// Market code passed to the albums endpoint.
    pub market: String,
    /// Page size for the albums endpoint, clamped to 1..=50.
    pub album_limit: u32,
}

impl Config {
    /// Create a configuration pointing at the public Spotify endpoints.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            market: DEFAULT_MARKET.to_string(),
            album_limit: MAX_ALBUM_LIMIT,
        }
    }

    pub fn with_accounts_url<S: Into<String>>(mut self, url: S) -> Self {
        self.accounts_url = url.into();
        self
    }

    pub fn with_api_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_market<S: Into<String>>(mut self, market: S) -> Self {
        self.market = market.into();
        self
    }

    pub fn with_album_limit(mut self, limit: u32) -> Self {
        self.album_limit = limit.clamp(1, MAX_ALBUM_LIMIT);
        self
    }

    /// Full URL of the token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url.trim_end_matches('/'))
    }
}
