//! Command-line interface implementation

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use crate::api::models::{EnrichedRecommendation, MovieId, MovieSummary};
use crate::config::Settings;
use crate::playback::PlaybackPage;

/// Catalogue ratings (tracking endpoint) are expressed out of 10.
pub const CATALOGUE_RATING_DENOMINATOR: u32 = 10;

/// TMDB vote averages on the playback page are rendered out of 100.
pub const TMDB_RATING_DENOMINATOR: u32 = 100;

/// Shown when a movie carries no overview text.
pub const MISSING_DESCRIPTION_FALLBACK: &str = "Description not available";

/// Command-line arguments for r-moviecli
#[derive(Parser, Debug)]
#[command(author, version, about = "Rust movie streaming CLI client", long_about = None)]
pub struct Args {
    /// Movie identifier to open
    #[arg(value_name = "MOVIE_ID")]
    pub movie_id: Option<String>,

    /// Streaming backend base URL
    #[arg(short, long, env = "MOVIECLI_SERVER_URL")]
    pub server_url: Option<String>,

    /// Config file path
    #[arg(short, long, env = "MOVIECLI_CONFIG")]
    pub config: Option<String>,

    /// Only post the watch-history sample and list the returned recommendations
    #[arg(long)]
    pub watch_only: bool,
}

/// Resolves the poster URL for a movie, falling back to the configured
/// placeholder when no poster path is present. Absolute paths pass through
/// untouched; relative ones go through the image base.
pub fn poster_url(poster_path: Option<&str>, settings: &Settings) -> String {
    match poster_path {
        Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
            path.to_string()
        }
        Some(path) => format!("{}{}", settings.image_base_url, path),
        None => settings.placeholder_poster.clone(),
    }
}

/// Formats a rating against its denominator, `N/A` when absent.
pub fn format_rating(rating: Option<f64>, denominator: u32) -> String {
    match rating {
        Some(value) => format!("{}/{}", value, denominator),
        None => format!("N/A/{}", denominator),
    }
}

/// CLI user interface for interacting with the application
pub struct Cli {
    pub args: Args,
}

impl Cli {
    /// Create a new CLI instance
    pub fn new() -> Self {
        Cli {
            args: Args::parse(),
        }
    }

    /// Prompt the user for a movie identifier if none was given on the
    /// command line.
    pub fn prompt_movie_id(&self) -> Result<MovieId, Box<dyn Error>> {
        print!("Enter a movie id: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err("No movie id entered".into());
        }
        Ok(trimmed.parse()?)
    }

    /// Display the loaded playback page: detail, playable link and the
    /// enriched recommendation grid.
    pub fn display_playback_page(&self, page: &PlaybackPage, settings: &Settings) {
        let title = page.detail.title.as_deref().unwrap_or("Unknown title");
        println!("\nTitle: {}", title);
        println!(
            "Description: {}",
            page.detail
                .overview
                .as_deref()
                .unwrap_or(MISSING_DESCRIPTION_FALLBACK)
        );

        match &page.primary_video_link {
            Some(link) => println!("Now playing: {}", link),
            None => println!("No playable video available."),
        }

        self.display_recommendation_grid(&page.recommendations, settings);
    }

    /// Display enriched recommendations with their trailers and posters.
    pub fn display_recommendation_grid(
        &self,
        recommendations: &[EnrichedRecommendation],
        settings: &Settings,
    ) {
        println!("\nRecommendations:");
        if recommendations.is_empty() {
            println!("  (none)");
            return;
        }

        for (index, entry) in recommendations.iter().enumerate() {
            println!("{:<3} {}", index + 1, entry.movie.title);
            println!(
                "    Rating: {}",
                format_rating(entry.movie.vote_average, TMDB_RATING_DENOMINATOR)
            );
            println!(
                "    Poster: {}",
                poster_url(entry.movie.poster_path.as_deref(), settings)
            );
            match &entry.video {
                Some(video) => println!("    Trailer: {}", video),
                None => println!("    Trailer: (unavailable)"),
            }
        }
        println!();
    }

    /// Display a plain recommendation list (recommendations widget).
    pub fn display_recommendations(&self, movies: &[MovieSummary], settings: &Settings) {
        println!("\nRecommended for you:");
        if movies.is_empty() {
            println!("  (none)");
            return;
        }

        println!("{:<5} {:<30} {:<10} {}", "#", "Title", "Rating", "Language");
        println!("{}", "-".repeat(70));

        for (index, movie) in movies.iter().enumerate() {
            let title = if movie.title.len() > 28 {
                format!("{:.25}...", movie.title)
            } else {
                movie.title.clone()
            };
            println!(
                "{:<5} {:<30} {:<10} {}",
                index + 1,
                title,
                format_rating(movie.vote_average, CATALOGUE_RATING_DENOMINATOR),
                movie.original_language.as_deref().unwrap_or("-")
            );
            println!(
                "      Poster: {}",
                poster_url(movie.poster_path.as_deref(), settings)
            );
        }
        println!();
    }

    /// Spinner shown while a loader is in its loading state.
    pub fn loading_spinner(&self, message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Display error messages
    pub fn display_error(&self, error: &dyn Error) {
        eprintln!("Error: {}", error);
    }

    /// Display a user-facing failure message from a component state.
    pub fn display_failure(&self, message: &str) {
        eprintln!("{}", message);
    }
}
