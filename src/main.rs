use r_moviecli::api::{MovieApiClient, MovieId};
use r_moviecli::config::Settings;
use r_moviecli::init_app_dirs;
use r_moviecli::playback::{PlaybackPageLoader, PlaybackViewState};
use r_moviecli::recommendations::{RecommendationFetcher, RecommendationsViewState};
use r_moviecli::ui::Cli;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Parse command-line arguments and initialize CLI
    let cli = Cli::new();
    let args = &cli.args;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Initialize application directories
    init_app_dirs()?;

    // Load configuration from file or create default
    let config_path = match &args.config {
        Some(path) => Path::new(path).to_path_buf(),
        None => Settings::default_path(),
    };

    let mut settings = Settings::load(&config_path)?;

    // Override settings with environment variables or command-line arguments
    settings.server_url = args
        .server_url
        .clone()
        .or_else(|| std::env::var("MOVIECLI_SERVER_URL").ok())
        .unwrap_or(settings.server_url);

    // Validate settings
    settings.validate()?;

    let movie_id: MovieId = match &args.movie_id {
        Some(raw) => raw.parse()?,
        None => cli.prompt_movie_id()?,
    };

    let client = Arc::new(MovieApiClient::new(&settings.server_url));

    if !args.watch_only {
        let loader = PlaybackPageLoader::new(client.clone());
        let spinner = cli.loading_spinner("Loading playback page...");
        loader.load(&movie_id).await;
        spinner.finish_and_clear();

        match loader.view().await {
            PlaybackViewState::Loaded(page) => cli.display_playback_page(&page, &settings),
            PlaybackViewState::Failed => {
                return Err("Could not load the playback page. See the log for details.".into());
            }
            PlaybackViewState::Loading => {
                return Err("Playback page never finished loading.".into());
            }
        }
    }

    // Post the watch-history sample and show the recommendations it returns
    let fetcher = RecommendationFetcher::new(client);
    let spinner = cli.loading_spinner("Fetching recommendations...");
    fetcher.load(&movie_id).await;
    spinner.finish_and_clear();

    match fetcher.view().await {
        RecommendationsViewState::Loaded(movies) => {
            cli.display_recommendations(&movies, &settings)
        }
        RecommendationsViewState::Failed(message) => cli.display_failure(&message),
        RecommendationsViewState::Idle | RecommendationsViewState::Loading => {}
    }

    Ok(())
}
