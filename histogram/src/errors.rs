use thiserror::Error;

/// Errors returned by [Config](crate::Config) and [HdrHistogram](crate::HdrHistogram)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("lowest trackable value must be at least 1")]
    LowestTrackableValueZero,
    #[error("significant figures must be within 1..=5, got {0}")]
    SignificantFigures(u8),
    #[error("highest trackable value {highest} must be at least twice the lowest trackable value {lowest}")]
    HighestTrackableValueTooSmall { lowest: u64, highest: u64 },
    #[error("value range too wide: unit magnitude {unit_magnitude} + sub bucket magnitude {sub_bucket_half_count_magnitude} exceeds 61 bits")]
    RangeTooWide {
        unit_magnitude: u32,
        sub_bucket_half_count_magnitude: u32,
    },
    #[error("value {0} is above the highest trackable value")]
    OutOfRange(u64),
    #[error("histogram contains no recorded values")]
    Empty,
    #[error("percentile must be within (0, 100]")]
    InvalidPercentile,
}
