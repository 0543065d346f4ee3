use alloc::vec::Vec;

use crate::{Error, HdrHistogram, PercentileIter};

impl HdrHistogram {
    /// The value at `percentile`, which should be within `(0, 100]`.
    ///
    /// The result is the highest value equivalent to the sample at the requested
    /// rank. Percentiles above 100 are treated as 100 and the rank is at least 1,
    /// so `value_at_percentile(100.0)` is [Self::max]. Returns `0` if the
    /// histogram is empty.
    pub fn value_at_percentile(&self, percentile: f64) -> u64 {
        if self.total_count() == 0 {
            return 0;
        }

        let count_at_percentile = self.count_at_percentile(percentile);
        let mut cumulative_count = 0;
        for slot in self.iter_recorded() {
            cumulative_count += slot.count();
            if cumulative_count >= count_at_percentile {
                return slot.end();
            }
        }
        self.max()
    }

    /// The values at several percentiles in a single pass over the histogram.
    ///
    /// The result is sorted by percentile. Fails if the histogram is empty or
    /// any percentile is NaN or not within `(0, 100]`.
    pub fn percentiles(&self, percentiles: &[f64]) -> Result<Vec<(f64, u64)>, Error> {
        if self.total_count() == 0 {
            return Err(Error::Empty);
        }
        if percentiles.iter().any(|p| !(*p > 0.0 && *p <= 100.0)) {
            return Err(Error::InvalidPercentile);
        }

        let mut percentiles = percentiles.to_vec();
        percentiles.sort_by(f64::total_cmp);

        let mut result = Vec::with_capacity(percentiles.len());
        let mut slots = self.iter_recorded();
        let mut current = None;
        let mut cumulative_count = 0;

        for percentile in percentiles {
            let count_at_percentile = self.count_at_percentile(percentile);
            while cumulative_count < count_at_percentile {
                let Some(slot) = slots.next() else {
                    break;
                };
                cumulative_count += slot.count();
                current = Some(slot);
            }
            let value = current.map_or_else(|| self.max(), |slot| slot.end());
            result.push((percentile, value));
        }

        Ok(result)
    }

    /// Iterate over the percentile distribution.
    ///
    /// See [PercentileIter]. A `ticks_per_half_distance` of `0` is treated as `1`.
    pub fn iter_percentiles(&self, ticks_per_half_distance: u32) -> PercentileIter<'_> {
        PercentileIter::new(self, ticks_per_half_distance)
    }

    /// The rank of the sample at `percentile`, rounded half up and at least 1
    fn count_at_percentile(&self, percentile: f64) -> u64 {
        let requested = percentile.min(100.0);
        let count = (requested / 100.0 * self.total_count() as f64 + 0.5) as u64;
        count.max(1)
    }
}
