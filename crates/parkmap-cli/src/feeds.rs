//! Feed selection: live portal or local exports.

use std::path::Path;

use parkmap_core::{AppConfig, RawLotRecord, RawZoneRecord};
use parkmap_feeds::{FeedError, FeedSource, LocalFeeds, OpenDataClient};

pub(crate) enum FeedChoice {
    Remote(OpenDataClient),
    Local(LocalFeeds),
}

impl FeedChoice {
    /// Local files when both are given, the configured portal when neither is.
    ///
    /// # Errors
    ///
    /// Returns an error if only one file is given or the HTTP client cannot
    /// be built from `config`.
    pub(crate) fn select(
        lots_file: Option<&Path>,
        zones_file: Option<&Path>,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        match (lots_file, zones_file) {
            (Some(lots), Some(zones)) => {
                tracing::info!(lots = %lots.display(), zones = %zones.display(), "using local feeds");
                Ok(Self::Local(LocalFeeds::new(lots, zones)))
            }
            (None, None) => Ok(Self::Remote(OpenDataClient::from_config(config)?)),
            _ => anyhow::bail!("--lots-file and --zones-file must be given together"),
        }
    }
}

impl FeedSource for FeedChoice {
    async fn fetch_lots(&self) -> Result<Vec<RawLotRecord>, FeedError> {
        match self {
            Self::Remote(client) => client.fetch_lots().await,
            Self::Local(local) => local.fetch_lots().await,
        }
    }

    async fn fetch_zones(&self) -> Result<Vec<RawZoneRecord>, FeedError> {
        match self {
            Self::Remote(client) => client.fetch_zones().await,
            Self::Local(local) => local.fetch_zones().await,
        }
    }
}
