//! Plain-text rendering of a session for the terminal.
//!
//! Layout, top to bottom: status line, error banner, artist panel, album
//! card grid, then the numbered album links. Links are printed in full
//! below the grid so they are never truncated.

use crate::models::{Album, Artist};
use crate::session::{SessionState, TokenStatus};

/// Outer width of one album card, borders included.
pub const CARD_WIDTH: usize = 30;

/// Spaces between cards on the same row.
const CARD_GAP: usize = 2;

/// Terminal width assumed when none is configured.
pub const DEFAULT_WIDTH: usize = 80;

/// Display data for one album card.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumCard {
    /// 1-based position, used to tie the card to its link.
    pub index: usize,
    pub name: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub tracks_label: String,
    pub external_url: String,
}

/// Build card data for `albums`, in order.
pub fn album_cards(albums: &[Album]) -> Vec<AlbumCard> {
    albums
        .iter()
        .enumerate()
        .map(|(i, album)| AlbumCard {
            index: i + 1,
            name: album.name.clone(),
            release_date: album.release_date.to_string(),
            total_tracks: album.total_tracks,
            tracks_label: album.tracks_label(),
            external_url: album.external_url.clone(),
        })
        .collect()
}

/// Format a count with thousands separators: 1234567 -> "1,234,567".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Cut `text` to at most `width` characters, marking the cut with "...".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// How many cards fit side by side in `width` columns. Always at least one.
pub fn grid_columns(width: usize) -> usize {
    ((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1)
}

/// Status line above the results.
fn render_status(state: &SessionState) -> Option<String> {
    if state.view.is_loading() {
        return Some("Searching albums...".to_string());
    }
    match state.token {
        TokenStatus::Pending => Some("Connecting to Spotify...".to_string()),
        TokenStatus::Failed(_) => Some("Search is disabled for this session.".to_string()),
        TokenStatus::Ready(_) => None,
    }
}

/// Dismissible error banner.
pub fn render_banner(message: &str) -> String {
    format!("[!] {}  (type :dismiss to close)", message)
}

/// Artist summary panel.
pub fn render_artist(artist: &Artist) -> String {
    let mut lines = vec![format!("== {} ==", artist.name)];
    if let Some(url) = &artist.image_url {
        lines.push(format!("Image: {}", url));
    }
    lines.push(format!(
        "Followers: {}",
        format_count(artist.followers_total)
    ));
    lines.push(format!("Popularity: {}/100", artist.popularity));
    let genres = artist.top_genres();
    if !genres.is_empty() {
        lines.push(format!("Genres: {}", genres.join(", ")));
    }
    lines.join("\n")
}

/// Lines of a single card, each exactly `CARD_WIDTH` characters wide.
fn card_lines(card: &AlbumCard) -> Vec<String> {
    let inner = CARD_WIDTH - 4;
    let border = format!("+{}+", "-".repeat(CARD_WIDTH - 2));
    let row = |text: String| format!("| {:<inner$} |", truncate(&text, inner), inner = inner);

    vec![
        border.clone(),
        row(format!("[{}] {}", card.index, card.name)),
        row(format!("Released {}", card.release_date)),
        row(card.tracks_label.clone()),
        border,
    ]
}

/// Album cards laid out in as many columns as `width` allows, followed by
/// the full link of every album.
pub fn render_album_grid(albums: &[Album], width: usize) -> String {
    let cards = album_cards(albums);
    if cards.is_empty() {
        return String::new();
    }

    let gap = " ".repeat(CARD_GAP);
    let mut out = Vec::new();

    for row in cards.chunks(grid_columns(width)) {
        let rendered: Vec<Vec<String>> = row.iter().map(card_lines).collect();
        for line in 0..rendered[0].len() {
            let joined: Vec<&str> = rendered.iter().map(|c| c[line].as_str()).collect();
            out.push(joined.join(&gap));
        }
    }

    out.push(String::new());
    for card in &cards {
        out.push(format!("[{}] {}", card.index, card.external_url));
    }
    out.join("\n")
}

/// Render the whole session.
pub fn render(state: &SessionState, width: usize) -> String {
    let mut sections = Vec::new();

    if let Some(status) = render_status(state) {
        sections.push(status);
    }
    if let Some(message) = state.banner() {
        sections.push(render_banner(message));
    }
    if let Some(artist) = state.view.artist() {
        sections.push(render_artist(artist));
    }
    let grid = render_album_grid(state.view.albums(), width);
    if !grid.is_empty() {
        sections.push(grid);
    }

    sections.join("\n\n")
}
