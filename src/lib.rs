//! # Artist Finder
//!
//! Look up an artist on Spotify and list their albums.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through [`SearchSession`]:
//!
//! ```rust,no_run
//! use artist_finder::{render, Config, Credentials, SearchSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new(Credentials::new("client-id", "client-secret"));
//!     let session = SearchSession::connect(&config)?;
//!
//!     // Acquire the client-credentials token (once per session)
//!     session.start().await;
//!
//!     // Resolve the artist, then their albums
//!     session.search("Massive Attack").await;
//!     println!("{}", render::render(&session.snapshot(), 80));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Low-Level APIs
//!
//! - [`SpotifyApi`] - search and album listing against the Web API
//! - [`TokenProvider`] - client-credentials token requests
//! - [`converters`] - JSON to model conversion

pub mod api;
pub mod config;
pub mod converters;
pub mod error;
pub mod models;
pub mod render;
mod session;

// Main interface (recommended)
pub use session::{
    RejectReason, SearchOutcome, SearchSession, SearchState, SessionState, TokenStatus,
};

// Low-level APIs
pub use api::{CatalogApi, SpotifyApi, Token, TokenProvider};
pub use config::{Config, Credentials};
pub use error::{ErrorKind, FinderError};
pub use models::{Album, Artist, ReleaseDate};
