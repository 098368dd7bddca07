//! Feeds read from JSON exports on disk.

use std::path::{Path, PathBuf};

use parkmap_core::{RawLotRecord, RawZoneRecord};
use serde::de::DeserializeOwned;

use crate::error::FeedError;
use crate::parse::parse_rows;
use crate::source::FeedSource;

/// Reads the lots and zones feeds from two files, each holding the same
/// JSON array the open-data endpoint returns.
#[derive(Debug, Clone)]
pub struct LocalFeeds {
    lots_path: PathBuf,
    zones_path: PathBuf,
}

impl LocalFeeds {
    #[must_use]
    pub fn new(lots_path: impl Into<PathBuf>, zones_path: impl Into<PathBuf>) -> Self {
        Self {
            lots_path: lots_path.into(),
            zones_path: zones_path.into(),
        }
    }
}

async fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FeedError> {
    let context = path.display().to_string();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FeedError::Io {
            path: context.clone(),
            source: e,
        })?;
    let body = serde_json::from_str(&content).map_err(|e| FeedError::Deserialize {
        context: context.clone(),
        source: e,
    })?;
    parse_rows(body, &context)
}

impl FeedSource for LocalFeeds {
    async fn fetch_lots(&self) -> Result<Vec<RawLotRecord>, FeedError> {
        read_rows(&self.lots_path).await
    }

    async fn fetch_zones(&self) -> Result<Vec<RawZoneRecord>, FeedError> {
        read_rows(&self.zones_path).await
    }
}
