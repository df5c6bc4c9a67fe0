//! Data models for Spotify catalog responses.
//!
//! This module contains the artist and album records the session
//! displays, plus the shared release date type.

pub mod album;
pub mod artist;
pub mod common;

// Re-exports for convenience
pub use album::Album;
pub use artist::Artist;
pub use common::{DatePrecision, ReleaseDate};
