//! GeoJSON export command.

use std::path::Path;
use std::sync::Arc;

use parkmap_core::RendererConfig;
use parkmap_engine::{GeoJsonRenderer, SessionState, StaticGeolocator};

use crate::feeds::FeedChoice;
use crate::session::open_session;

/// Loads both feeds into a GeoJSON scene and writes it to `out`, or stdout.
///
/// # Errors
///
/// Returns an error if the parking data could not be loaded or the output
/// cannot be written.
pub(crate) async fn run_export(
    feeds: Arc<FeedChoice>,
    geolocator: Arc<StaticGeolocator>,
    config: &RendererConfig,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let renderer = GeoJsonRenderer::new(config.clone());
    let session = open_session(renderer, feeds, geolocator, config).await?;
    if session.state() == SessionState::Failed {
        anyhow::bail!("parking data could not be loaded; nothing exported");
    }

    let scene = session.renderer().to_feature_collection();
    let features = session.renderer().feature_count();
    let body = serde_json::to_string_pretty(&scene)?;

    match out {
        Some(path) => {
            tokio::fs::write(path, body).await?;
            println!("wrote {features} features to {}", path.display());
        }
        None => println!("{body}"),
    }

    session.teardown();
    Ok(())
}
