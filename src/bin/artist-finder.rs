use std::sync::Arc;

use artist_finder::render::{self, DEFAULT_WIDTH};
use artist_finder::{
    Config, Credentials, RejectReason, SearchOutcome, SearchSession, SessionState, SpotifyApi,
    TokenStatus,
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "artist-finder")]
#[command(about = "Find a Spotify artist and list their albums", long_about = None)]
struct Cli {
    /// Spotify client id (can also be set via SPOTIFY_CLIENT_ID env var)
    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    /// Spotify client secret (can also be set via SPOTIFY_CLIENT_SECRET env var)
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Market used to filter albums
    #[arg(long, default_value = artist_finder::config::DEFAULT_MARKET)]
    market: String,

    /// Maximum number of albums to fetch (1-50)
    #[arg(short, long, default_value_t = artist_finder::config::MAX_ALBUM_LIMIT)]
    limit: u32,

    /// Terminal width used to lay out album cards
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,

    #[arg(long, hide = true, default_value = artist_finder::config::DEFAULT_ACCOUNTS_URL)]
    accounts_url: String,

    #[arg(long, hide = true, default_value = artist_finder::config::DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once and exit
    Search {
        /// Artist name
        query: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("artist_finder=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// How settled states are printed.
#[derive(Clone, Copy)]
struct Output {
    json: bool,
    width: usize,
}

impl Output {
    fn print(&self, state: &SessionState) -> Result<(), serde_json::Error> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&state.view)?);
        } else {
            println!("{}", render::render(state, self.width));
        }
        Ok(())
    }
}

async fn run_once(
    session: &SearchSession<SpotifyApi>,
    query: &str,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    session.start().await;
    session.search(query).await;

    let state = session.snapshot();
    output.print(&state)?;

    match state.view.error_kind() {
        Some(kind) => Err(kind.message().into()),
        None => Ok(()),
    }
}

/// Print what a finished interactive search produced.
fn report(session: &SearchSession<SpotifyApi>, outcome: SearchOutcome, output: Output) {
    let state = session.snapshot();
    match outcome {
        SearchOutcome::Rejected(RejectReason::NotReady)
            if matches!(state.token, TokenStatus::Pending) =>
        {
            println!("Still connecting to Spotify, try again in a moment.");
        }
        SearchOutcome::Rejected(RejectReason::Busy) => {
            println!("A search is already running.");
        }
        SearchOutcome::Stale => {}
        SearchOutcome::Rejected(RejectReason::NotReady) | SearchOutcome::Applied(_) => {
            if let Err(e) = output.print(&state) {
                error!("Could not print results: {}", e);
            }
        }
    }
}

async fn run_interactive(
    session: Arc<SearchSession<SpotifyApi>>,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    // The token is fetched in the background; typing is possible meanwhile.
    let starter = Arc::clone(&session);
    tokio::spawn(async move {
        starter.start().await;
    });

    println!("Type an artist name and press Enter. :dismiss closes errors, :q quits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end_matches(['\r', '\n']).to_string();

        match line.trim() {
            ":q" | ":quit" => break,
            ":dismiss" => {
                session.dismiss_error();
                output.print(&session.snapshot())?;
            }
            _ => {
                // Searches run off the input loop so the prompt stays live.
                let searcher = Arc::clone(&session);
                tokio::spawn(async move {
                    let outcome = searcher.search(&line).await;
                    report(&searcher, outcome, output);
                });
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    let config = Config::new(Credentials::new(&cli.client_id, &cli.client_secret))
        .with_accounts_url(&cli.accounts_url)
        .with_api_base_url(&cli.api_url)
        .with_market(&cli.market)
        .with_album_limit(cli.limit);

    let session = SearchSession::connect(&config)?;

    let output = Output {
        json: cli.json,
        width: cli.width,
    };

    match &cli.command {
        Some(Commands::Search { query }) => run_once(&session, query, output).await,
        None => run_interactive(Arc::new(session), output).await,
    }
}
