use alloc::{boxed::Box, vec};
use log::trace;

use crate::{Config, Error, Iter, RecordedIter, Slot};

/// A histogram with a fixed value range and precision.
///
/// See the [crate] docs for the layout. All queries report the representative
/// value of a slot, never a raw recorded value: [Self::min] reports the lowest
/// value of its slot, [Self::max] and the percentile queries the highest value
/// of their slot, and [Self::mean]/[Self::stddev] use the middle of each slot.
///
/// # Empty histograms
/// [Self::min], [Self::max] and [Self::value_at_percentile] return `0` if no
/// value was recorded. [Self::mean] and [Self::stddev] return NaN. Use
/// [Self::total_count] to tell an empty histogram apart from recorded zeros.
#[derive(Clone, Debug)]
pub struct HdrHistogram {
    config: Config,
    counts: Box<[u64]>,
    total_count: u64,
    /// lowest equivalent value of the lowest recorded slot
    min_value: u64,
    /// highest equivalent value of the highest recorded slot
    max_value: u64,
}

impl HdrHistogram {
    /// Creates a new empty histogram.
    ///
    /// See [Config::new] for the constraints on the arguments.
    pub fn new(
        lowest_trackable_value: u64,
        highest_trackable_value: u64,
        significant_figures: u8,
    ) -> Result<Self, Error> {
        Config::new(
            lowest_trackable_value,
            highest_trackable_value,
            significant_figures,
        )
        .map(Self::from_config)
    }

    /// Creates a new empty histogram from an existing [Config]
    pub fn from_config(config: Config) -> Self {
        Self {
            counts: vec![0; config.counts_len()].into_boxed_slice(),
            config,
            total_count: 0,
            min_value: u64::MAX,
            max_value: 0,
        }
    }

    /// The configuration of this histogram
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Records a single occurrence of `value`.
    ///
    /// Returns `false` without modifying the histogram if `value` is above the
    /// highest trackable value. Values below the lowest trackable value are
    /// recorded with reduced precision.
    pub fn record_value(&mut self, value: u64) -> bool {
        if value > self.config.highest_trackable_value() {
            trace!(
                "reject {value}: above highest trackable value {}",
                self.config.highest_trackable_value()
            );
            return false;
        }

        let index = self.config.value_to_index(value);
        let first = self.total_count == 0;

        self.counts[index] += 1;
        self.total_count += 1;

        // min_value and max_value are slot boundaries, so comparing against
        // them is enough to detect a new slot
        if first || value < self.min_value {
            self.min_value = self.config.index_to_value(index);
        }
        if first || value > self.max_value {
            self.max_value = self.config.index_to_upper_bound(index);
        }
        true
    }

    /// The number of recorded values
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// The lowest value equivalent to the smallest recorded value or `0` if empty
    pub fn min(&self) -> u64 {
        if self.total_count == 0 {
            0
        } else {
            self.min_value
        }
    }

    /// The highest value equivalent to the largest recorded value or `0` if empty
    pub fn max(&self) -> u64 {
        if self.total_count == 0 {
            0
        } else {
            self.max_value
        }
    }

    /// Whether `a` and `b` map to the same slot.
    ///
    /// Two equivalent values can not be told apart by this histogram.
    pub fn values_are_equivalent(&self, a: u64, b: u64) -> bool {
        self.config.lowest_equivalent_value(a) == self.config.lowest_equivalent_value(b)
    }

    /// The number of recorded values equivalent to `value`
    pub fn count_at_value(&self, value: u64) -> Result<u64, Error> {
        if value > self.config.highest_trackable_value() {
            return Err(Error::OutOfRange(value));
        }
        Ok(self.counts[self.config.value_to_index(value)])
    }

    /// See [Config::lowest_equivalent_value]
    pub fn lowest_equivalent_value(&self, value: u64) -> u64 {
        self.config.lowest_equivalent_value(value)
    }

    /// See [Config::highest_equivalent_value]
    pub fn highest_equivalent_value(&self, value: u64) -> u64 {
        self.config.highest_equivalent_value(value)
    }

    /// See [Config::median_equivalent_value]
    pub fn median_equivalent_value(&self, value: u64) -> u64 {
        self.config.median_equivalent_value(value)
    }

    /// See [Config::next_non_equivalent_value]
    pub fn next_non_equivalent_value(&self, value: u64) -> u64 {
        self.config.next_non_equivalent_value(value)
    }

    /// See [Config::size_of_equivalent_value_range]
    pub fn size_of_equivalent_value_range(&self, value: u64) -> u64 {
        self.config.size_of_equivalent_value_range(value)
    }

    /// The slot at `index` or `None` if `index` is out of bounds
    pub fn slot(&self, index: usize) -> Option<Slot> {
        let count = *self.counts.get(index)?;
        Some(Slot {
            index,
            count,
            lowest: self.config.index_to_value(index),
            highest: self.config.index_to_upper_bound(index),
        })
    }

    /// Iterate over every slot in ascending value order
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Iterate over the slots with at least one recorded value in ascending value order
    pub fn iter_recorded(&self) -> RecordedIter<'_> {
        RecordedIter::new(self)
    }

    pub(crate) fn counts(&self) -> &[u64] {
        &self.counts
    }
}

impl<'a> IntoIterator for &'a HdrHistogram {
    type Item = Slot;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
