use std::sync::Arc;

use parkmap_core::RendererConfig;
use parkmap_engine::{RendererAdapter, Session, StaticGeolocator};

use crate::feeds::FeedChoice;

/// Starts a session on `renderer` and waits for the load and the location
/// lookup to finish. Notices are printed to stderr; a failed load is left for
/// the caller to handle.
pub(crate) async fn open_session<R: RendererAdapter>(
    renderer: R,
    feeds: Arc<FeedChoice>,
    geolocator: Arc<StaticGeolocator>,
    config: &RendererConfig,
) -> anyhow::Result<Session<R>> {
    let mut session = Session::new(renderer, config);
    session.start(feeds, geolocator)?;
    session.settle().await;

    for notice in session.notices() {
        eprintln!("warning: {}", notice.message);
    }
    if let Some(summary) = session.load_summary() {
        tracing::info!(
            lots = summary.lots,
            zones = summary.zones,
            skipped = summary.skipped_lots + summary.skipped_zones,
            loaded_at = %summary.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"),
            "parking data ready"
        );
    }
    Ok(session)
}
