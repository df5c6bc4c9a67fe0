//! Search session: token lifecycle plus the artist/album lookup state machine.
//!
//! A session acquires its token once via [`SearchSession::start`], then runs
//! user-triggered searches. Each search resolves an artist and then that
//! artist's albums, and settles into a [`SearchState`].
//!
//! Every search is stamped with a generation number. When a newer search has
//! started by the time an older one finishes, the older result is dropped and
//! reported as [`SearchOutcome::Stale`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::{CatalogApi, SpotifyApi, Token};
use crate::config::{Config, Credentials};
use crate::error::{ErrorKind, FinderError, Result};
use crate::models::{Album, Artist};

/// What the result area shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchState {
    /// Nothing to show.
    #[default]
    Idle,
    /// A search is in flight. Previous results are cleared.
    Loading,
    /// Artist and albums resolved.
    Success { artist: Artist, albums: Vec<Album> },
    /// Something failed. `artist` survives when only the album lookup failed.
    Error {
        kind: ErrorKind,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        artist: Option<Artist>,
        albums: Vec<Album>,
    },
}

impl SearchState {
    fn error(kind: ErrorKind) -> Self {
        Self::error_with(kind, None, Vec::new())
    }

    fn error_with(kind: ErrorKind, artist: Option<Artist>, albums: Vec<Album>) -> Self {
        SearchState::Error {
            kind,
            message: kind.message().to_string(),
            artist,
            albums,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            SearchState::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn artist(&self) -> Option<&Artist> {
        match self {
            SearchState::Success { artist, .. } => Some(artist),
            SearchState::Error { artist, .. } => artist.as_ref(),
            _ => None,
        }
    }

    pub fn albums(&self) -> &[Album] {
        match self {
            SearchState::Success { albums, .. } | SearchState::Error { albums, .. } => albums,
            _ => &[],
        }
    }
}

/// Progress of the one-time token acquisition.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TokenStatus {
    /// Not requested yet, or the request is in flight.
    #[default]
    Pending,
    Ready(Token),
    /// Acquisition failed; searching stays disabled for this session.
    Failed(ErrorKind),
}

impl TokenStatus {
    pub fn token(&self) -> Option<&Token> {
        match self {
            TokenStatus::Ready(token) => Some(token),
            _ => None,
        }
    }
}

/// Snapshot of everything the render layer needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Current contents of the search field.
    pub search_input: String,
    pub token: TokenStatus,
    pub view: SearchState,
    generation: u64,
}

impl SessionState {
    /// Generation of the most recently started search.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the search trigger is enabled.
    pub fn can_search(&self) -> bool {
        self.token.token().is_some() && !self.view.is_loading()
    }

    /// Error shown in the banner, if any.
    pub fn banner(&self) -> Option<&str> {
        self.view.error_message()
    }
}

/// Why a search was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No token yet, or token acquisition failed.
    NotReady,
    /// A search is already loading.
    Busy,
}

/// Result of a search request.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The search settled and its state was applied.
    Applied(SearchState),
    /// The search was not started.
    Rejected(RejectReason),
    /// A newer search started before this one finished; its result was dropped.
    Stale,
}

/// A search session over a catalog backend.
///
/// # Example
///
/// ```rust,no_run
/// use artist_finder::{Config, Credentials, SearchOutcome, SearchSession};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::new(Credentials::new("client-id", "client-secret"));
///     let session = SearchSession::connect(&config)?;
///     session.start().await;
///
///     if let SearchOutcome::Applied(state) = session.search("Radiohead").await {
///         println!("{} albums", state.albums().len());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SearchSession<C> {
    api: C,
    credentials: Credentials,
    started: AtomicBool,
    state: Mutex<SessionState>,
}

impl SearchSession<SpotifyApi> {
    /// Create a session against the Spotify endpoints in `config`.
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::new(SpotifyApi::new(config)?, config))
    }
}

impl<C: CatalogApi> SearchSession<C> {
    pub fn new(api: C, config: &Config) -> Self {
        Self {
            api,
            credentials: config.credentials.clone(),
            started: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn can_search(&self) -> bool {
        self.lock().can_search()
    }

    /// Acquire the session token.
    ///
    /// Only the first call talks to the accounts service; later calls return
    /// the status reached so far. A failure is terminal for the session.
    pub async fn start(&self) -> TokenStatus {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.lock().token.clone();
        }

        match self.api.acquire_token(&self.credentials).await {
            Ok(token) => {
                let mut state = self.lock();
                state.token = TokenStatus::Ready(token);
                state.token.clone()
            }
            Err(e) => {
                warn!("Token acquisition failed: {}", e);
                let kind = match e {
                    FinderError::Connection(_) => ErrorKind::Connection,
                    _ => ErrorKind::Auth,
                };
                let mut state = self.lock();
                state.token = TokenStatus::Failed(kind);
                if !state.view.is_loading() {
                    state.view = SearchState::error(kind);
                }
                state.token.clone()
            }
        }
    }

    /// Replace the contents of the search field.
    pub fn set_input<S: Into<String>>(&self, text: S) {
        self.lock().search_input = text.into();
    }

    /// Clear the error banner.
    ///
    /// Only the error goes away: an artist kept after a failed album lookup
    /// stays on screen, and loading is untouched.
    pub fn dismiss_error(&self) {
        let mut state = self.lock();
        state.view = match std::mem::take(&mut state.view) {
            SearchState::Error {
                artist: Some(artist),
                albums,
                ..
            } => SearchState::Success { artist, albums },
            SearchState::Error { artist: None, .. } => SearchState::Idle,
            other => other,
        };
    }

    /// Search for whatever is in the search field.
    ///
    /// Refused with [`RejectReason::Busy`] while another search is loading.
    pub async fn submit(&self) -> SearchOutcome {
        let query = {
            let state = self.lock();
            if state.view.is_loading() {
                return SearchOutcome::Rejected(RejectReason::Busy);
            }
            state.search_input.clone()
        };
        self.search_now(&query).await
    }

    /// Type `query` into the search field and submit it.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        self.set_input(query);
        self.submit().await
    }

    /// Run a search for `query` even if another one is still loading.
    ///
    /// The older search keeps running but its result is discarded.
    pub async fn search_now(&self, query: &str) -> SearchOutcome {
        let query = query.trim();

        let (token, generation) = {
            let mut state = self.lock();

            if query.is_empty() {
                // A blank query must not clobber a search that is still loading.
                if state.view.is_loading() {
                    return SearchOutcome::Rejected(RejectReason::Busy);
                }
                let kept_artist = state.view.artist().cloned();
                let kept_albums = state.view.albums().to_vec();
                state.view =
                    SearchState::error_with(ErrorKind::Validation, kept_artist, kept_albums);
                return SearchOutcome::Applied(state.view.clone());
            }

            let Some(token) = state.token.token().cloned() else {
                debug!("Search for '{}' refused: no token", query);
                return SearchOutcome::Rejected(RejectReason::NotReady);
            };

            state.generation += 1;
            state.view = SearchState::Loading;
            (token, state.generation)
        };

        info!("Searching for '{}' (request {})", query, generation);

        let artist = match self.api.find_artist(query, &token).await {
            Ok(artist) => artist,
            Err(e) => {
                warn!("Artist lookup for '{}' failed: {}", query, e);
                return self.settle(generation, SearchState::error(e.kind()));
            }
        };

        let view = match self.api.list_albums(&artist.id, &token).await {
            Ok(albums) => {
                info!("Found {} albums for {}", albums.len(), artist.name);
                SearchState::Success { artist, albums }
            }
            Err(e) => {
                warn!("Album lookup for {} failed: {}", artist.id, e);
                SearchState::error_with(ErrorKind::Connection, Some(artist), Vec::new())
            }
        };

        self.settle(generation, view)
    }

    /// Apply `view` unless a newer search has started since `generation`.
    fn settle(&self, generation: u64, view: SearchState) -> SearchOutcome {
        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                "Discarding result of request {} (current is {})",
                generation, state.generation
            );
            return SearchOutcome::Stale;
        }
        state.view = view.clone();
        SearchOutcome::Applied(view)
    }
}
