//! Iterators over the slots of a [HdrHistogram]

use crate::{HdrHistogram, Slot};

/// Iterates over every slot of a [HdrHistogram], including empty ones.
///
/// Created by [HdrHistogram::iter].
#[derive(Clone)]
pub struct Iter<'a> {
    histogram: &'a HdrHistogram,
    index: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(histogram: &'a HdrHistogram) -> Self {
        Self {
            histogram,
            index: 0,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.histogram.slot(self.index)?;
        self.index += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.histogram.counts().len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Iterates over the slots of a [HdrHistogram] with a non zero count.
///
/// Stops as soon as every recorded value was seen. Created by
/// [HdrHistogram::iter_recorded].
#[derive(Clone)]
pub struct RecordedIter<'a> {
    histogram: &'a HdrHistogram,
    index: usize,
    seen: u64,
}

impl<'a> RecordedIter<'a> {
    pub(crate) fn new(histogram: &'a HdrHistogram) -> Self {
        Self {
            histogram,
            index: 0,
            seen: 0,
        }
    }
}

impl Iterator for RecordedIter<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.seen >= self.histogram.total_count() {
            return None;
        }
        let counts = self.histogram.counts();
        while self.index < counts.len() {
            let index = self.index;
            self.index += 1;
            if counts[index] != 0 {
                self.seen += counts[index];
                return self.histogram.slot(index);
            }
        }
        None
    }
}

/// A single row of a percentile distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileStep {
    /// The percentile this row reports, within `0..=100`
    pub percentile: f64,
    /// The highest value equivalent to the value at [Self::percentile]
    pub value: u64,
    /// The number of values recorded in the slot of [Self::value]
    pub count_at_value: u64,
    /// The number of values recorded up to and including [Self::value]
    pub cumulative_count: u64,
}

/// Iterates over the percentile distribution of a [HdrHistogram].
///
/// Starts at the 0th percentile and halves the distance to 100% every
/// `ticks_per_half_distance` rows, so the tail of the distribution is
/// reported in more detail. The last row is always the 100th percentile.
/// Yields nothing for an empty histogram.
///
/// Created by [HdrHistogram::iter_percentiles].
#[derive(Clone)]
pub struct PercentileIter<'a> {
    histogram: &'a HdrHistogram,
    slots: RecordedIter<'a>,
    ticks_per_half_distance: u32,
    current: Option<Slot>,
    cumulative_count: u64,
    percentile_to_iterate_to: f64,
    reached_last_value: bool,
}

impl<'a> PercentileIter<'a> {
    pub(crate) fn new(histogram: &'a HdrHistogram, ticks_per_half_distance: u32) -> Self {
        Self {
            histogram,
            slots: histogram.iter_recorded(),
            ticks_per_half_distance: ticks_per_half_distance.max(1),
            current: None,
            cumulative_count: 0,
            percentile_to_iterate_to: 0.0,
            reached_last_value: false,
        }
    }

    fn last_step(&mut self) -> Option<PercentileStep> {
        self.reached_last_value = true;
        let slot = self.current?;
        Some(PercentileStep {
            percentile: 100.0,
            value: slot.end(),
            count_at_value: slot.count(),
            cumulative_count: self.cumulative_count,
        })
    }
}

impl Iterator for PercentileIter<'_> {
    type Item = PercentileStep;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.histogram.total_count();
        if self.reached_last_value || total == 0 {
            return None;
        }
        if self.cumulative_count >= total {
            return self.last_step();
        }

        loop {
            if let Some(slot) = self.current {
                let current_percentile = 100.0 * self.cumulative_count as f64 / total as f64;
                if self.percentile_to_iterate_to <= current_percentile {
                    let step = PercentileStep {
                        percentile: self.percentile_to_iterate_to,
                        value: slot.end(),
                        count_at_value: slot.count(),
                        cumulative_count: self.cumulative_count,
                    };
                    self.percentile_to_iterate_to += percentile_increment(
                        self.percentile_to_iterate_to,
                        self.ticks_per_half_distance,
                    );
                    return Some(step);
                }
            }

            match self.slots.next() {
                Some(slot) => {
                    self.cumulative_count += slot.count();
                    self.current = Some(slot);
                }
                None => return self.last_step(),
            }
        }
    }
}

/// The distance to the next reported percentile.
///
/// The remaining distance to 100% is halved every `ticks_per_half_distance` steps.
fn percentile_increment(percentile: f64, ticks_per_half_distance: u32) -> f64 {
    let half_distance_exponent = (libm::log2(100.0 / (100.0 - percentile)) as u32)
        .saturating_add(1)
        .min(63);
    let half_distance = (1u64 << half_distance_exponent) as f64;
    100.0 / (ticks_per_half_distance as f64 * half_distance)
}
