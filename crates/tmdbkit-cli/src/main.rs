//! tmdbkit - TMDB movie and TV lookup CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, TmdbConfig, resolve_config_path};
use tmdbkit_api::tmdb::{
    ListParams, LocalTmdbApi, MovieSummary, Paginated, SearchMovieParams, SearchTvParams,
    TmdbClient, TvSummary,
};
use url::Url;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query movie endpoints.
    Movie(MovieCommand),
    /// Query TV endpoints.
    Tv(TvCommand),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieCommand {
    /// Movie subcommand to run.
    #[command(subcommand)]
    command: MovieSubcommands,
}

/// Available movie subcommands.
#[derive(Subcommand)]
enum MovieSubcommands {
    /// List popular movies.
    Popular(ListArgs),
    /// List top-rated movies.
    TopRated(ListArgs),
    /// Search for movies.
    Search(SearchMovieArgs),
    /// Get movie details.
    Details(DetailsArgs),
}

/// Arguments for the `tv` subcommand.
#[derive(clap::Args)]
struct TvCommand {
    /// TV subcommand to run.
    #[command(subcommand)]
    command: TvSubcommands,
}

/// Available TV subcommands.
#[derive(Subcommand)]
enum TvSubcommands {
    /// List popular TV series.
    Popular(ListArgs),
    /// List top-rated TV series.
    TopRated(ListArgs),
    /// Search for TV series.
    Search(SearchTvArgs),
    /// Get TV series details.
    Details(DetailsArgs),
    /// Get TV season details.
    Season(SeasonArgs),
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show the resolved config file and its settings.
    Show,
    /// Write TMDB defaults to the config file.
    Set(ConfigSetArgs),
}

/// Arguments shared by the popular / top-rated list subcommands.
#[derive(clap::Args)]
struct ListArgs {
    /// Result page (1-based).
    #[arg(long)]
    page: Option<u32>,
    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
}

impl ListArgs {
    /// Converts to API params.
    fn to_params(&self) -> ListParams {
        ListParams {
            page: self.page,
            language: self.language.clone(),
        }
    }
}

/// Arguments for the `movie search` subcommand.
#[derive(clap::Args)]
struct SearchMovieArgs {
    /// Search query (e.g. "Fight Club").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-based).
    #[arg(long)]
    page: Option<u32>,
    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
    /// Include adult content.
    #[arg(long)]
    include_adult: bool,
    /// Region filter (overrides config).
    #[arg(long)]
    region: Option<String>,
    /// Filter by year.
    #[arg(long)]
    year: Option<u32>,
    /// Filter by primary release year.
    #[arg(long)]
    primary_release_year: Option<u32>,
}

/// Arguments for the `tv search` subcommand.
#[derive(clap::Args)]
struct SearchTvArgs {
    /// Search query (e.g. "Game of Thrones").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-based).
    #[arg(long)]
    page: Option<u32>,
    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
    /// Include adult content.
    #[arg(long)]
    include_adult: bool,
    /// Filter by first air date year.
    #[arg(long)]
    first_air_date_year: Option<u32>,
}

/// Arguments for the `details` subcommands.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `tv season` subcommand.
#[derive(clap::Args)]
struct SeasonArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Season number (0 = specials).
    #[arg(long, required = true)]
    season: u32,
    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `config set` subcommand.
#[derive(clap::Args)]
struct ConfigSetArgs {
    /// Default response language (e.g. "ja-JP").
    #[arg(long)]
    language: Option<String>,
    /// Default region (e.g. "JP").
    #[arg(long)]
    region: Option<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Base URL override (e.g. "http://localhost:8080/").
    #[arg(long)]
    base_url: Option<String>,
}

/// Builds a `TmdbClient` from `TMDB_API_TOKEN` and the config defaults.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &TmdbConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let builder = TmdbClient::builder().api_token(api_token).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    config
        .apply(builder)?
        .build()
        .context("failed to build TMDB client")
}

/// Loads the config file selected by `--dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Formats an optional value, or `-` when absent.
fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}

/// Logs a page of movie results.
fn log_movie_page(page: &Paginated<MovieSummary>) {
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
    tracing::info!("ID\tTitle\t\t\tOrigLang\tReleaseDate");
    for movie in &page.results {
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            movie.id,
            movie.title,
            movie.original_language,
            or_dash(movie.release_date),
        );
    }
}

/// Logs a page of TV results.
fn log_tv_page(page: &Paginated<TvSummary>) {
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
    tracing::info!("ID\tName\t\t\tOrigLang\tCountry\t\tFirstAirDate");
    for show in &page.results {
        tracing::info!(
            "{}\t{}\t{}\t\t{}\t\t{}",
            show.id,
            show.name,
            show.original_language,
            show.origin_country.join(","),
            or_dash(show.first_air_date),
        );
    }
}

/// Runs a `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movie(command: &MovieSubcommands, config: &TmdbConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;
    let result = run_movie_with(&client, command).await;
    client.close().await;
    result
}

/// Dispatches a `movie` subcommand against an open client.
async fn run_movie_with(client: &TmdbClient, command: &MovieSubcommands) -> Result<()> {
    match command {
        MovieSubcommands::Popular(args) => {
            let page = client
                .popular_movies(&args.to_params())
                .await
                .context("TMDB movie/popular request failed")?;
            log_movie_page(&page);
        }
        MovieSubcommands::TopRated(args) => {
            let page = client
                .top_rated_movies(&args.to_params())
                .await
                .context("TMDB movie/top_rated request failed")?;
            log_movie_page(&page);
        }
        MovieSubcommands::Search(args) => {
            let params = SearchMovieParams {
                query: args.query.clone(),
                page: args.page,
                language: args.language.clone(),
                include_adult: args.include_adult,
                region: args.region.clone(),
                year: args.year,
                primary_release_year: args.primary_release_year,
            };
            let page = client
                .search_movies(&params)
                .await
                .context("TMDB search/movie request failed")?;
            log_movie_page(&page);
        }
        MovieSubcommands::Details(args) => {
            let details = client
                .movie_details(args.id, args.language.as_deref())
                .await
                .context("TMDB movie details request failed")?;

            tracing::info!("ID: {}", details.id);
            tracing::info!("Title: {}", details.title);
            tracing::info!("Original Title: {}", details.original_title);
            tracing::info!("Release Date: {}", or_dash(details.release_date));
            tracing::info!("Status: {}", details.status.as_deref().unwrap_or("-"));
            tracing::info!(
                "Runtime: {}",
                details
                    .runtime
                    .map_or_else(|| String::from("-"), |r| format!("{r}min"))
            );
            let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
            tracing::info!("Genres: {}", genres.join(", "));
            tracing::info!("Rating: {} ({} votes)", details.vote_average, details.vote_count);
        }
    }
    Ok(())
}

/// Runs a `tv` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tv(command: &TvSubcommands, config: &TmdbConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;
    let result = run_tv_with(&client, command).await;
    client.close().await;
    result
}

/// Dispatches a `tv` subcommand against an open client.
async fn run_tv_with(client: &TmdbClient, command: &TvSubcommands) -> Result<()> {
    match command {
        TvSubcommands::Popular(args) => {
            let page = client
                .popular_tv(&args.to_params())
                .await
                .context("TMDB tv/popular request failed")?;
            log_tv_page(&page);
        }
        TvSubcommands::TopRated(args) => {
            let page = client
                .top_rated_tv(&args.to_params())
                .await
                .context("TMDB tv/top_rated request failed")?;
            log_tv_page(&page);
        }
        TvSubcommands::Search(args) => {
            let params = SearchTvParams {
                query: args.query.clone(),
                page: args.page,
                language: args.language.clone(),
                include_adult: args.include_adult,
                first_air_date_year: args.first_air_date_year,
            };
            let page = client
                .search_tv(&params)
                .await
                .context("TMDB search/tv request failed")?;
            log_tv_page(&page);
        }
        TvSubcommands::Details(args) => {
            let details = client
                .tv_details(args.id, args.language.as_deref())
                .await
                .context("TMDB tv details request failed")?;

            tracing::info!("ID: {}", details.id);
            tracing::info!("Name: {}", details.name);
            tracing::info!("Original Name: {}", details.original_name);
            tracing::info!("First Air Date: {}", or_dash(details.first_air_date));
            tracing::info!("Status: {}", details.status.as_deref().unwrap_or("-"));
            tracing::info!("Seasons: {}", details.number_of_seasons);
            tracing::info!("Episodes: {}", details.number_of_episodes);
            tracing::info!("---");
            for season in &details.seasons {
                tracing::info!(
                    "  Season {}: {} episodes (air_date: {})",
                    season.season_number,
                    season.episode_count,
                    or_dash(season.air_date),
                );
            }
        }
        TvSubcommands::Season(args) => {
            let season = client
                .tv_season(args.id, args.season, args.language.as_deref())
                .await
                .context("TMDB tv season request failed")?;

            tracing::info!(
                "Season {}: {}",
                season.season_number,
                season.name.as_deref().unwrap_or("-")
            );
            tracing::info!("Episodes:");
            for ep in &season.episodes {
                tracing::info!(
                    "  E{:02}: {} (air_date: {}, runtime: {}min)",
                    ep.episode_number,
                    ep.name,
                    or_dash(ep.air_date),
                    or_dash(ep.runtime),
                );
            }
        }
    }
    Ok(())
}

/// Runs a `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved, read, or written.
fn run_config(command: &ConfigSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;

    match command {
        ConfigSubcommands::Show => {
            tracing::info!("Config file: {}", path.display());
            tracing::info!("language: {}", config.tmdb.language.as_deref().unwrap_or("-"));
            tracing::info!("region: {}", config.tmdb.region.as_deref().unwrap_or("-"));
            tracing::info!("timeout_secs: {}", or_dash(config.tmdb.timeout_secs));
            tracing::info!("base_url: {}", config.tmdb.base_url.as_deref().unwrap_or("-"));
        }
        ConfigSubcommands::Set(args) => {
            if let Some(ref language) = args.language {
                config.tmdb.language = Some(language.clone());
            }
            if let Some(ref region) = args.region {
                config.tmdb.region = Some(region.clone());
            }
            if let Some(secs) = args.timeout_secs {
                config.tmdb.timeout_secs = Some(secs);
            }
            if let Some(ref base_url) = args.base_url {
                Url::parse(base_url).with_context(|| format!("invalid --base-url: {base_url}"))?;
                config.tmdb.base_url = Some(base_url.clone());
            }
            config.save(&path)?;
            tracing::info!("Saved config to {}", path.display());
        }
    }
    Ok(())
}

/// Installs the fmt subscriber.
#[cfg(not(feature = "otel"))]
fn init_tracing() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Installs the fmt subscriber plus an OTLP span layer when
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// Spans are exported by a batch processor on its own thread, so the
/// blocking HTTP exporter never runs on the tokio runtime. The returned
/// provider must be shut down to flush pending spans.
#[cfg(feature = "otel")]
fn init_tracing() -> Option<opentelemetry_sdk::trace::SdkTracerProvider> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let tracer_provider = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .and_then(|_| {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .build()
                .ok()?;

            Some(
                opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_batch_exporter(exporter)
                    .build(),
            )
        });

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        let tracer = opentelemetry::trace::TracerProvider::tracer(provider, env!("CARGO_PKG_NAME"));
        tracing_opentelemetry::layer().with_tracer(tracer)
    });
    if let Some(ref provider) = tracer_provider {
        opentelemetry::global::set_tracer_provider(provider.clone());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    tracer_provider
}

/// Dispatches the parsed command.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Movie(cmd) => {
            let config = load_config(cli.dir.as_ref())?;
            run_movie(&cmd.command, &config.tmdb).await
        }
        Commands::Tv(cmd) => {
            let config = load_config(cli.dir.as_ref())?;
            run_tv(&cmd.command, &config.tmdb).await
        }
        Commands::Config(cmd) => run_config(&cmd.command, cli.dir.as_ref()),
    }
}

/// Entry point.
///
/// The runtime is dropped before the tracer provider is shut down, so the
/// final span flush happens outside any async context.
///
/// # Errors
///
/// Returns an error if the runtime fails to start or the subcommand fails.
fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "otel")]
    let tracer_provider = init_tracing();
    #[cfg(not(feature = "otel"))]
    init_tracing();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    let result = runtime.block_on(run(cli));
    drop(runtime);

    #[cfg(feature = "otel")]
    {
        if let Some(provider) = tracer_provider
            && let Err(e) = provider.shutdown()
        {
            tracing::debug!(error = %e, "OTLP tracer provider shutdown failed");
        }
    }

    result
}
