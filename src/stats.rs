use std::fmt;

use crate::parse::Tenths;

/// Running statistics for one station, all values in tenths of a degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub min: i32,
    pub max: i32,
    pub sum: i64,
    pub count: u64,
}

impl Stats {
    /// Statistics after a single reading.
    #[inline]
    pub fn new(reading: i32) -> Self {
        Self {
            min: reading,
            max: reading,
            sum: reading as i64,
            count: 1,
        }
    }

    #[inline(always)]
    pub fn record(&mut self, reading: i32) {
        self.min = self.min.min(reading);
        self.max = self.max.max(reading);
        self.sum += reading as i64;
        self.count += 1;
    }

    /// Folds another partition's statistics for the same station into these.
    #[inline]
    pub fn merge(&mut self, other: &Stats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean in tenths, rounded to the nearest tenth with ties going towards
    /// positive infinity. Computed in integers so no precision is lost before
    /// rounding.
    pub fn mean_tenths(&self) -> i64 {
        let count = self.count as i64;
        (2 * self.sum + count).div_euclid(2 * count)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            Tenths(self.min as i64),
            Tenths(self.mean_tenths()),
            Tenths(self.max as i64)
        )
    }
}
