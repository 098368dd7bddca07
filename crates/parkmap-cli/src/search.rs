//! One-shot search command.

use std::sync::Arc;

use parkmap_core::RendererConfig;
use parkmap_engine::{ConsoleRenderer, RankedRecord, SearchableRecord, SessionState, StaticGeolocator};

use crate::feeds::FeedChoice;
use crate::session::open_session;

/// Loads both feeds, runs `query` and prints up to `limit` results, nearest
/// first when a location is known.
///
/// # Errors
///
/// Returns an error if the parking data could not be loaded or JSON output
/// fails to serialize.
pub(crate) async fn run_search(
    feeds: Arc<FeedChoice>,
    geolocator: Arc<StaticGeolocator>,
    config: &RendererConfig,
    query: &str,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let renderer = ConsoleRenderer::new(std::io::stderr(), config, false);
    let session = open_session(renderer, feeds, geolocator, config).await?;
    if session.state() == SessionState::Failed {
        anyhow::bail!("parking data could not be loaded");
    }

    let hits: Vec<RankedRecord> = session.search(query).into_iter().take(limit).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("no parking matches '{query}'");
        return Ok(());
    }

    println!("{}", header());
    for (n, hit) in hits.iter().enumerate() {
        println!("{}", format_hit(n + 1, hit));
    }
    Ok(())
}

pub(crate) fn header() -> String {
    format!("{:<4}{:<6}{:>9}  {:<36}WHERE", "#", "KIND", "KM", "NAME")
}

/// One result row: ordinal, kind, distance, label, and the address for lots
/// or the status for zones.
pub(crate) fn format_hit(n: usize, hit: &RankedRecord) -> String {
    let (kind, place) = match &hit.record {
        SearchableRecord::Lot(lot) => ("lot", lot.address()),
        SearchableRecord::Zone(zone) => ("zone", zone.status()),
    };
    let distance = hit
        .distance_km
        .map_or_else(|| "\u{2014}".to_string(), |km| format!("{km:.2}"));
    format!(
        "{:<4}{:<6}{:>9}  {:<36}{}",
        n,
        kind,
        distance,
        truncate(hit.record.label(), 34),
        place
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_string()
    }
}
