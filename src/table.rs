use anyhow::{bail, ensure, Context, Result};

use crate::stats::Stats;

/// Smallest table a partition ever gets.
const MIN_CAPACITY: usize = 16;

#[derive(Debug)]
struct Slot<'a> {
    hash: u64,
    key: &'a [u8],
    stats: Stats,
}

/// Fixed-capacity open-addressing table owned by a single scan worker.
///
/// Keys are borrowed straight out of the mapped input and compared by bytes.
/// Collisions are resolved by linear probing. Nothing is ever removed, and the
/// table refuses to grow past half full: running out of room means it was
/// provisioned for too few distinct names.
#[derive(Debug)]
pub struct PartitionTable<'a> {
    slots: Vec<Option<Slot<'a>>>,
    mask: usize,
    occupied: usize,
}

impl<'a> PartitionTable<'a> {
    /// A table with room for `capacity` slots, rounded up to a power of two.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let Some(capacity) = capacity.max(MIN_CAPACITY).checked_next_power_of_two() else {
            bail!("partition table capacity {capacity} is too large");
        };
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .with_context(|| format!("couldn't allocate a partition table of {capacity} slots"))?;
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            mask: capacity - 1,
            occupied: 0,
        })
    }

    /// A table that holds `expected` distinct names while staying at or below
    /// half load.
    pub fn for_cardinality(expected: usize) -> Result<Self> {
        ensure!(expected > 0, "expected station count must be at least 1");
        let Some(capacity) = expected.checked_mul(2) else {
            bail!("expected station count {expected} is too large");
        };
        Self::with_capacity(capacity)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maximum number of distinct keys before the table overflows.
    pub fn limit(&self) -> usize {
        self.slots.len() / 2
    }

    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Records `reading` against `key`, whose FNV-1a hash the caller has
    /// already computed while scanning it.
    #[inline]
    pub fn insert_or_update(&mut self, key: &'a [u8], hash: u64, reading: i32) -> Result<()> {
        let limit = self.limit();
        let mut idx = hash as usize & self.mask;
        loop {
            match &mut self.slots[idx] {
                Some(slot) if slot.hash == hash && slot.key == key => {
                    slot.stats.record(reading);
                    return Ok(());
                }
                Some(_) => idx = (idx + 1) & self.mask,
                empty @ None => {
                    if self.occupied == limit {
                        bail!(
                            "partition table overflow: more than {limit} distinct stations \
                             (capacity {}), raise the expected station count",
                            limit * 2
                        );
                    }
                    *empty = Some(Slot {
                        hash,
                        key,
                        stats: Stats::new(reading),
                    });
                    self.occupied += 1;
                    return Ok(());
                }
            }
        }
    }

    pub fn get(&self, key: &[u8], hash: u64) -> Option<&Stats> {
        let mut idx = hash as usize & self.mask;
        loop {
            match &self.slots[idx] {
                Some(slot) if slot.hash == hash && slot.key == key => return Some(&slot.stats),
                Some(_) => idx = (idx + 1) & self.mask,
                None => return None,
            }
        }
    }

    /// Hands over every occupied slot. Consumes the table.
    pub fn drain(self) -> impl Iterator<Item = (&'a [u8], Stats)> {
        self.slots
            .into_iter()
            .flatten()
            .map(|slot| (slot.key, slot.stats))
    }
}
