//! Layout of the counter array and the value <-> index arithmetic.

use log::debug;
use static_assertions::const_assert;

use crate::Error;

/// The smallest supported number of significant figures
pub const MIN_SIGNIFICANT_FIGURES: u8 = 1;
/// The largest supported number of significant figures
pub const MAX_SIGNIFICANT_FIGURES: u8 = 5;

/// Upper limit for `unit_magnitude + sub_bucket_half_count_magnitude`.
///
/// This keeps `sub_bucket_count << unit_magnitude` representable as a u64.
const MAX_MAGNITUDE: u32 = 61;

const_assert!(MIN_SIGNIFICANT_FIGURES >= 1);
const_assert!(2 * 10u64.pow(MAX_SIGNIFICANT_FIGURES as u32) < u32::MAX as u64);

/// The configuration of a [HdrHistogram](crate::HdrHistogram).
///
/// Besides the 3 user provided parameters this holds the layout constants
/// derived from them. Bucket `k` covers sub ranges of width
/// `2^(k + unit_magnitude)`, split into `sub_bucket_count` linear slots.
/// The lower half of every bucket after the first overlaps with the previous
/// bucket, so only `sub_bucket_half_count` new slots are stored per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    lowest_trackable_value: u64,
    highest_trackable_value: u64,
    significant_figures: u8,

    unit_magnitude: u32,
    sub_bucket_half_count_magnitude: u32,
    sub_bucket_count: u32,
    sub_bucket_half_count: u32,
    sub_bucket_mask: u64,
    bucket_count: u32,
    counts_len: usize,
}

impl Config {
    /// Create a new configuration.
    ///
    /// `lowest_trackable_value` only sizes the layout, smaller values can still be
    /// recorded. `highest_trackable_value` must be at least twice the lowest value
    /// and `significant_figures` must be within
    /// [MIN_SIGNIFICANT_FIGURES]..=[MAX_SIGNIFICANT_FIGURES].
    pub fn new(
        lowest_trackable_value: u64,
        highest_trackable_value: u64,
        significant_figures: u8,
    ) -> Result<Self, Error> {
        if lowest_trackable_value == 0 {
            return Err(Error::LowestTrackableValueZero);
        }
        if !(MIN_SIGNIFICANT_FIGURES..=MAX_SIGNIFICANT_FIGURES).contains(&significant_figures) {
            return Err(Error::SignificantFigures(significant_figures));
        }
        if lowest_trackable_value
            .checked_mul(2)
            .map_or(true, |double| double > highest_trackable_value)
        {
            return Err(Error::HighestTrackableValueTooSmall {
                lowest: lowest_trackable_value,
                highest: highest_trackable_value,
            });
        }

        let largest_value_with_single_unit_resolution = 2 * 10u64.pow(significant_figures as u32);
        let sub_bucket_count_magnitude = largest_value_with_single_unit_resolution
            .next_power_of_two()
            .trailing_zeros();
        let sub_bucket_half_count_magnitude = sub_bucket_count_magnitude.max(1) - 1;
        let unit_magnitude = lowest_trackable_value.ilog2();

        if unit_magnitude + sub_bucket_half_count_magnitude > MAX_MAGNITUDE {
            return Err(Error::RangeTooWide {
                unit_magnitude,
                sub_bucket_half_count_magnitude,
            });
        }

        let sub_bucket_count = 1u32 << (sub_bucket_half_count_magnitude + 1);
        let sub_bucket_half_count = sub_bucket_count / 2;
        let sub_bucket_mask = (sub_bucket_count as u64 - 1) << unit_magnitude;
        let bucket_count =
            buckets_needed_to_cover(highest_trackable_value, sub_bucket_count, unit_magnitude);
        let counts_len = (bucket_count as usize + 1) * sub_bucket_half_count as usize;

        debug!(
            "histogram layout for {lowest_trackable_value}..={highest_trackable_value} \
            ({significant_figures} sf): unit magnitude {unit_magnitude}, \
            {bucket_count} buckets of {sub_bucket_count} sub buckets, {counts_len} slots"
        );

        Ok(Self {
            lowest_trackable_value,
            highest_trackable_value,
            significant_figures,
            unit_magnitude,
            sub_bucket_half_count_magnitude,
            sub_bucket_count,
            sub_bucket_half_count,
            sub_bucket_mask,
            bucket_count,
            counts_len,
        })
    }

    /// The smallest value tracked with full precision
    pub fn lowest_trackable_value(&self) -> u64 {
        self.lowest_trackable_value
    }

    /// The largest value that can be recorded
    pub fn highest_trackable_value(&self) -> u64 {
        self.highest_trackable_value
    }

    /// The number of significant decimal figures preserved for every value
    pub fn significant_figures(&self) -> u8 {
        self.significant_figures
    }

    /// `floor(log2(lowest_trackable_value))`
    pub fn unit_magnitude(&self) -> u32 {
        self.unit_magnitude
    }

    /// The number of linear slots within a single bucket
    pub fn sub_bucket_count(&self) -> u32 {
        self.sub_bucket_count
    }

    /// Half of [Self::sub_bucket_count]
    pub fn sub_bucket_half_count(&self) -> u32 {
        self.sub_bucket_half_count
    }

    /// The number of exponential buckets
    pub fn bucket_count(&self) -> u32 {
        self.bucket_count
    }

    /// The number of slots in the counter array
    pub fn counts_len(&self) -> usize {
        self.counts_len
    }

    #[inline]
    fn bucket_index(&self, value: u64) -> u32 {
        let pow2_ceiling = u64::BITS - (value | self.sub_bucket_mask).leading_zeros();
        pow2_ceiling - self.unit_magnitude - (self.sub_bucket_half_count_magnitude + 1)
    }

    #[inline]
    fn sub_bucket_index(&self, value: u64, bucket_index: u32) -> u32 {
        (value >> (bucket_index + self.unit_magnitude)) as u32
    }

    #[inline]
    fn counts_index(&self, bucket_index: u32, sub_bucket_index: u32) -> usize {
        let bucket_base_index = (bucket_index as usize + 1) << self.sub_bucket_half_count_magnitude;
        // sub_bucket_index >= sub_bucket_half_count for every bucket except the first
        bucket_base_index + sub_bucket_index as usize - self.sub_bucket_half_count as usize
    }

    #[inline]
    fn value_from_location(&self, bucket_index: u32, sub_bucket_index: u32) -> u64 {
        (sub_bucket_index as u64) << (bucket_index + self.unit_magnitude)
    }

    /// The slot index `value` maps to.
    ///
    /// The result is only a valid index into the counter array if `value` is
    /// at most [Self::highest_trackable_value].
    #[inline]
    pub fn value_to_index(&self, value: u64) -> usize {
        let bucket_index = self.bucket_index(value);
        let sub_bucket_index = self.sub_bucket_index(value, bucket_index);
        self.counts_index(bucket_index, sub_bucket_index)
    }

    /// The lowest value that maps to the slot at `index`
    pub fn index_to_value(&self, index: usize) -> u64 {
        let bucket = index >> self.sub_bucket_half_count_magnitude;
        let offset = index & (self.sub_bucket_half_count as usize - 1);
        let (bucket_index, sub_bucket_index) = if bucket == 0 {
            (0, offset)
        } else {
            (bucket - 1, offset + self.sub_bucket_half_count as usize)
        };
        self.value_from_location(bucket_index as u32, sub_bucket_index as u32)
    }

    /// The highest value that maps to the slot at `index`
    pub fn index_to_upper_bound(&self, index: usize) -> u64 {
        self.highest_equivalent_value(self.index_to_value(index))
    }

    /// The width of the range of values that are equivalent to `value`
    pub fn size_of_equivalent_value_range(&self, value: u64) -> u64 {
        1 << (self.unit_magnitude + self.bucket_index(value))
    }

    /// The lowest value that is equivalent to `value`
    pub fn lowest_equivalent_value(&self, value: u64) -> u64 {
        let bucket_index = self.bucket_index(value);
        let sub_bucket_index = self.sub_bucket_index(value, bucket_index);
        self.value_from_location(bucket_index, sub_bucket_index)
    }

    /// The highest value that is equivalent to `value`
    pub fn highest_equivalent_value(&self, value: u64) -> u64 {
        self.lowest_equivalent_value(value) + (self.size_of_equivalent_value_range(value) - 1)
    }

    /// The value in the middle of the range of values equivalent to `value`
    pub fn median_equivalent_value(&self, value: u64) -> u64 {
        self.lowest_equivalent_value(value) + (self.size_of_equivalent_value_range(value) >> 1)
    }

    /// The smallest value that is larger than `value` and not equivalent to it.
    ///
    /// Saturates at `u64::MAX` for the topmost slot of the value space.
    pub fn next_non_equivalent_value(&self, value: u64) -> u64 {
        self.lowest_equivalent_value(value)
            .saturating_add(self.size_of_equivalent_value_range(value))
    }
}

fn buckets_needed_to_cover(value: u64, sub_bucket_count: u32, unit_magnitude: u32) -> u32 {
    let mut smallest_untrackable_value = (sub_bucket_count as u64) << unit_magnitude;
    let mut buckets_needed = 1;
    while smallest_untrackable_value <= value {
        if smallest_untrackable_value > u64::MAX / 2 {
            return buckets_needed + 1;
        }
        smallest_untrackable_value <<= 1;
        buckets_needed += 1;
    }
    buckets_needed
}
