//! JSON to model converters.
//!
//! This module turns raw Spotify Web API JSON responses into typed model
//! structures. Missing optional fields degrade to defaults; missing
//! identifiers are errors.

use serde_json::Value;

use crate::error::{FinderError, Result};
use crate::models::{Album, Artist, ReleaseDate};

/// Get string from JSON, returning empty string if not found.
fn get_str(json: &Value, key: &str) -> String {
    json.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Get a non-empty string from JSON.
fn get_nonempty_str(json: &Value, key: &str) -> Option<String> {
    json.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Get u32 from JSON.
fn get_u32(json: &Value, key: &str) -> u32 {
    json.get(key)
        .and_then(|v| v.as_u64())
        .map(|n| n.min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

/// URL of the first image in an `images` array.
///
/// The catalog orders images widest first.
pub fn first_image_url(json: &Value) -> Option<String> {
    json.get("images")
        .and_then(|i| i.as_array())
        .and_then(|arr| arr.first())
        .and_then(|img| get_nonempty_str(img, "url"))
}

/// The catalog page link from `external_urls.spotify`.
fn external_url(json: &Value) -> Option<String> {
    json.get("external_urls")
        .and_then(|u| get_nonempty_str(u, "spotify"))
}

/// Extract genre tags in catalog order.
fn extract_genres(json: &Value) -> Vec<String> {
    json.get("genres")
        .and_then(|g| g.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|g| g.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Error carried in an API response body, if any.
///
/// The Web API answers failures with `{"error": {"status", "message"}}`;
/// the accounts service uses `{"error": "...", "error_description": "..."}`.
pub fn api_error(json: &Value) -> Option<FinderError> {
    let error = json.get("error")?;

    if let Some(code) = error.as_str() {
        let message = json
            .get("error_description")
            .and_then(|d| d.as_str())
            .unwrap_or(code);
        return Some(FinderError::Auth(message.to_string()));
    }

    let status = error
        .get("status")
        .and_then(|s| s.as_u64())
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(0);
    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown error")
        .to_string();

    Some(FinderError::Api { status, message })
}

/// Pull the bearer token out of a token endpoint response.
pub fn parse_access_token(json: &Value) -> Result<String> {
    match get_nonempty_str(json, "access_token") {
        Some(token) => Ok(token),
        None => {
            let detail = json
                .get("error_description")
                .or_else(|| json.get("error"))
                .and_then(|d| d.as_str())
                .unwrap_or("no access_token in response");
            Err(FinderError::Auth(format!("missing token: {}", detail)))
        }
    }
}

/// Parse a full artist record.
pub fn parse_artist(json: &Value) -> Result<Artist> {
    let id = get_nonempty_str(json, "id")
        .ok_or_else(|| FinderError::Parse(serde::de::Error::missing_field("id")))?;

    let followers_total = json
        .get("followers")
        .and_then(|f| f.get("total"))
        .and_then(|t| t.as_u64())
        .unwrap_or(0);

    let popularity = json
        .get("popularity")
        .and_then(|p| p.as_u64())
        .unwrap_or(0)
        .min(100) as u8;

    Ok(Artist {
        id,
        name: get_str(json, "name"),
        followers_total,
        popularity,
        genres: extract_genres(json),
        image_url: first_image_url(json),
        external_url: external_url(json),
    })
}

/// Resolve the best match from a search response.
///
/// The first item of `artists.items` wins; an empty or missing list means
/// nothing matched `query`.
pub fn parse_search_response(json: &Value, query: &str) -> Result<Artist> {
    let first = json
        .get("artists")
        .and_then(|a| a.get("items"))
        .and_then(|i| i.as_array())
        .and_then(|items| items.first())
        .ok_or_else(|| FinderError::NotFound(query.to_string()))?;

    parse_artist(first)
}

/// Parse an album record.
pub fn parse_album(json: &Value) -> Result<Album> {
    let id = get_nonempty_str(json, "id")
        .ok_or_else(|| FinderError::Parse(serde::de::Error::missing_field("id")))?;

    Ok(Album {
        id,
        name: get_str(json, "name"),
        release_date: ReleaseDate::parse(&get_str(json, "release_date")),
        total_tracks: get_u32(json, "total_tracks"),
        image_url: first_image_url(json),
        external_url: external_url(json).unwrap_or_default(),
    })
}

/// Parse one page of the artist-albums endpoint.
///
/// A missing `items` array is an empty discography. Malformed records are
/// skipped.
pub fn parse_albums_page(json: &Value) -> Vec<Album> {
    json.get("items")
        .and_then(|i| i.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|a| parse_album(a).ok())
                .collect()
        })
        .unwrap_or_default()
}
