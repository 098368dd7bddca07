//! In-memory store of the raw records from the last successful load.

use parkmap_core::{RawLotRecord, RawZoneRecord};

/// Raw lot and zone records, kept in feed order.
///
/// A load replaces both collections at once; there is no partial state.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    lots: Vec<RawLotRecord>,
    zones: Vec<RawZoneRecord>,
}

impl RecordIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current contents with a freshly fetched pair of feeds.
    pub fn load(&mut self, lots: Vec<RawLotRecord>, zones: Vec<RawZoneRecord>) {
        self.lots = lots;
        self.zones = zones;
    }

    #[must_use]
    pub fn all_lots(&self) -> &[RawLotRecord] {
        &self.lots
    }

    #[must_use]
    pub fn all_zones(&self) -> &[RawZoneRecord] {
        &self.zones
    }

    /// Total number of records across both feeds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len() + self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty() && self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_lot(name: &str) -> RawLotRecord {
        RawLotRecord {
            lot_name: Some(name.to_owned()),
            ..RawLotRecord::default()
        }
    }

    #[test]
    fn new_index_is_empty() {
        let index = RecordIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn load_keeps_feed_order() {
        let mut index = RecordIndex::new();
        index.load(vec![named_lot("A"), named_lot("B")], vec![RawZoneRecord::default()]);
        let names: Vec<&str> = index.all_lots().iter().map(RawLotRecord::name).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(index.all_zones().len(), 1);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn load_replaces_previous_contents() {
        let mut index = RecordIndex::new();
        index.load(vec![named_lot("Old")], vec![RawZoneRecord::default()]);
        index.load(vec![named_lot("New")], Vec::new());
        assert_eq!(index.all_lots()[0].name(), "New");
        assert!(index.all_zones().is_empty());
        assert_eq!(index.len(), 1);
    }
}
