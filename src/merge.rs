use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

use crate::{stats::Stats, table::PartitionTable};

/// Final per-station statistics. Owns its keys, so it outlives both the
/// partition tables and the mapped input they borrowed from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Aggregate {
    stations: FxHashMap<Box<[u8]>, Stats>,
}

impl Aggregate {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut stations = FxHashMap::default();
        stations
            .try_reserve(capacity)
            .with_context(|| format!("couldn't reserve room for {capacity} stations"))?;
        Ok(Self { stations })
    }

    /// Folds one worker's drained partition into the aggregate.
    pub fn absorb<'a>(&mut self, partition: impl IntoIterator<Item = (&'a [u8], Stats)>) {
        partition
            .into_iter()
            .for_each(|(name, stats)| self.upsert(name, &stats));
    }

    #[inline]
    fn upsert(&mut self, name: &[u8], stats: &Stats) {
        if let Some(existing) = self.stations.get_mut(name) {
            existing.merge(stats);
        } else {
            // The only place a key stops borrowing from the input.
            self.stations.insert(name.into(), *stats);
        }
    }

    pub fn get(&self, name: &[u8]) -> Option<&Stats> {
        self.stations.get(name)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations in ascending byte order of their names.
    pub fn into_sorted(self) -> Vec<(Box<[u8]>, Stats)> {
        let mut result: Vec<_> = self.stations.into_iter().collect();
        result.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        result
    }
}

/// Merges every worker's partition table into one aggregate. Partitions may
/// arrive in any order.
pub fn merge<'a>(
    partitions: impl IntoIterator<Item = PartitionTable<'a>>,
    expected_stations: usize,
) -> Result<Aggregate> {
    let mut aggregate = Aggregate::with_capacity(expected_stations)?;
    for partition in partitions {
        aggregate.absorb(partition.drain());
    }
    Ok(aggregate)
}
