use std::future::Future;

use parkmap_core::{RawLotRecord, RawZoneRecord};

use crate::error::FeedError;

/// Read-only supplier of the two raw feeds.
///
/// The two methods are independent so the caller can run them
/// concurrently. Futures must be `Send` because the session drives the
/// load on a spawned task.
pub trait FeedSource: Send + Sync {
    fn fetch_lots(&self) -> impl Future<Output = Result<Vec<RawLotRecord>, FeedError>> + Send;

    fn fetch_zones(&self) -> impl Future<Output = Result<Vec<RawZoneRecord>, FeedError>> + Send;
}
