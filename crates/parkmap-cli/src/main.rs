mod browse;
mod export;
mod feeds;
mod search;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use parkmap_core::{load_renderer_config, Coordinate, RendererConfig};
use parkmap_engine::StaticGeolocator;
use tracing_subscriber::EnvFilter;

use crate::feeds::FeedChoice;

#[derive(Debug, Parser)]
#[command(name = "parkmap")]
#[command(about = "Search Calgary parking lots and on-street parking zones")]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where feeds and the user's position come from.
#[derive(Debug, Args)]
struct SourceArgs {
    /// Read lots from a local JSON export instead of the open data portal
    #[arg(long, global = true)]
    lots_file: Option<PathBuf>,
    /// Read zones from a local JSON export instead of the open data portal
    #[arg(long, global = true)]
    zones_file: Option<PathBuf>,
    /// Latitude to rank results from (overrides `PARKMAP_HOME_LAT`)
    #[arg(long, global = true, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude to rank results from (overrides `PARKMAP_HOME_LNG`)
    #[arg(long, global = true, allow_negative_numbers = true)]
    lng: Option<f64>,
}

impl SourceArgs {
    /// Flag location first, configured home location second.
    fn location(&self, home: Option<Coordinate>) -> anyhow::Result<Option<Coordinate>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok(Some(Coordinate::new(lat, lng)?)),
            (None, None) => Ok(home),
            _ => anyhow::bail!("--lat and --lng must be given together"),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search lots by name or address and zones by type or status
    Search {
        /// Text to look for (case-insensitive)
        query: String,
        /// Maximum number of results to show
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search interactively and open result details
    Browse,
    /// Write the parking overlays as a GeoJSON FeatureCollection
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = parkmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let renderer_config = match &config.renderer_config_path {
        Some(path) => load_renderer_config(path)?,
        None => RendererConfig::default(),
    };
    let feeds = Arc::new(FeedChoice::select(
        cli.sources.lots_file.as_deref(),
        cli.sources.zones_file.as_deref(),
        &config,
    )?);
    let geolocator = Arc::new(StaticGeolocator::from_option(
        cli.sources.location(config.home_location)?,
    ));

    match cli.command {
        Commands::Search { query, limit, json } => {
            search::run_search(feeds, geolocator, &renderer_config, &query, limit, json).await
        }
        Commands::Browse => browse::run_browse(feeds, geolocator, &renderer_config).await,
        Commands::Export { out } => {
            export::run_export(feeds, geolocator, &renderer_config, out.as_deref()).await
        }
    }
}
