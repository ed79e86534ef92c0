use std::path::Path;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use hitster_cli::client::SpotifyClient;
use hitster_cli::config::{Config, load_config};
use hitster_cli::game::{
    Catalog, CatalogRow, DEFAULT_DECK_SIZE, GameSession, GameSettings, GuessLog, read_rows_csv,
    write_rows_csv,
};
use hitster_cli::logger::init_logger;
use hitster_cli::playback::{ConsolePlayback, Playback};

const DEFAULT_PLAYLIST: &str =
    "https://open.spotify.com/playlist/321iL49aeqqqtKfrQLO91I?si=aeeb907ccaf2490c";

#[derive(Parser)]
#[command(name = "hitster-cli")]
#[command(about = "Play Hitster in the terminal with songs from a Spotify playlist")]
#[command(version)]
struct Args {
    /// Spotify playlist link, URI or id to build the catalog from
    #[arg(default_value = DEFAULT_PLAYLIST)]
    playlist: String,

    /// CSV cache of the playlist
    #[arg(short = 'c', long = "catalog", default_value = "spotify_playlist.csv")]
    catalog_file: String,

    /// Download the playlist again even if the cache exists
    #[arg(short = 'r', long = "refresh")]
    refresh: bool,

    /// Where the guesses of the session are stored
    #[arg(short = 'g', long = "guesses", default_value = "guess_data.json")]
    guesses_file: String,

    /// Number of tiles needed to finish the game
    #[arg(
        short = 'n',
        long = "deck-size",
        default_value_t = DEFAULT_DECK_SIZE,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    deck_size: usize,

    /// Seed for the tile draws, for reproducible games
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Show the song link instead of starting it on a Spotify device
    #[arg(long = "no-playback")]
    no_playback: bool,

    /// Print statistics of the saved guesses and exit
    #[arg(long = "stats")]
    stats: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    if args.stats {
        return print_stats(&args.guesses_file);
    }

    // Load configuration from .env
    let config = load_config()?;

    let rows = load_catalog_rows(&args, &config)?;
    let catalog = Catalog::from_rows(rows);
    println!("Catalog has {} playable songs.", catalog.len());

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let settings = GameSettings {
        deck_size: args.deck_size,
    };

    let playback: Box<dyn Playback> = if args.no_playback {
        Box::new(ConsolePlayback)
    } else {
        if config.access_token.is_none() {
            warn!("SPOTIFY_ACCESS_TOKEN is not set, playback will fail");
            eprintln!("Warning: no SPOTIFY_ACCESS_TOKEN set. Songs cannot be started; use --no-playback to get links instead.");
        }
        Box::new(SpotifyClient::new(config))
    };

    let mut session = GameSession::start(catalog, rng, settings)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let result = session.play(playback.as_ref(), &mut input, &mut output);

    println!("\nUpdating highscores and returning back to main menu.");
    session.log().save(&args.guesses_file)?;
    println!(
        "✓ Saved {} guesses to {}",
        session.log().len(),
        args.guesses_file
    );

    result?;
    Ok(())
}

/// Read the CSV cache, downloading the playlist first when needed
fn load_catalog_rows(args: &Args, config: &Config) -> Result<Vec<CatalogRow>> {
    let cache_exists = Path::new(&args.catalog_file).exists();

    if cache_exists && !args.refresh {
        return Ok(read_rows_csv(&args.catalog_file)?);
    }

    println!("Downloading playlist {}...", args.playlist);
    let client = SpotifyClient::new(config.clone());
    match client.fetch_playlist_rows(&args.playlist) {
        Ok(rows) => {
            write_rows_csv(&args.catalog_file, &rows)?;
            println!(
                "✓ CSV file '{}' has been created with {} tracks.",
                args.catalog_file,
                rows.len()
            );
            Ok(rows)
        }
        Err(e) if cache_exists => {
            eprintln!("✗ Playlist download failed: {e}");
            eprintln!("Using the existing cache '{}' instead.", args.catalog_file);
            Ok(read_rows_csv(&args.catalog_file)?)
        }
        Err(e) => Err(e),
    }
}

fn print_stats(guesses_file: &str) -> Result<()> {
    let log = GuessLog::load(guesses_file)?;
    if log.is_empty() {
        println!("No guesses stored in '{guesses_file}' yet.");
        return Ok(());
    }

    let stats = log.stats();
    println!("=== GUESS STATISTICS ({guesses_file}) ===");
    println!("Rounds played: {}", stats.rounds);
    println!(
        "Years placed: {} ({:.1}%)",
        stats.year_hits,
        stats.year_accuracy * 100.0
    );
    println!("Names guessed: {}", stats.name_hits);
    println!("Artists guessed: {}", stats.artist_hits);
    println!("Bonus rounds: {}", stats.bonus_rounds);
    Ok(())
}
