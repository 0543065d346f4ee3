//! A fixed memory high dynamic range histogram.
//!
//! The histogram records non-negative integer measurements, e.g. latencies,
//! that span several orders of magnitude and answers percentile, min/max,
//! mean and standard deviation queries. The relative error of every answer
//! is bounded by the configured number of significant decimal figures,
//! independent of the magnitude of the value.
//!
//! Values are stored in a two level layout: exponential buckets, each split
//! into linear sub buckets. Every bucket is twice as wide as the previous one
//! but has the same number of slots, which keeps the relative resolution
//! constant. The memory footprint is fixed at construction and never changes.
//!
//! # Example
//! ```
//! use histogram::HdrHistogram;
//!
//! let mut h = HdrHistogram::new(1, 3_600_000_000, 3).unwrap();
//! for latency in [120, 250, 1_000, 4_500, 100_000] {
//!     assert!(h.record_value(latency));
//! }
//! assert!(h.values_are_equivalent(h.value_at_percentile(50.0), 1_000));
//! assert!(!h.mean().is_nan());
//! ```
//!
//! # Concurrency
//! There is no internal synchronization. Recording requires `&mut self`, so
//! a histogram shared between threads has to be guarded by the caller, or
//! each producer records into its own histogram.

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

mod config;
mod errors;
mod iter;
mod percentile;
mod slot;
mod standard;
mod summary;

pub use config::{Config, MAX_SIGNIFICANT_FIGURES, MIN_SIGNIFICANT_FIGURES};
pub use errors::Error;
pub use iter::{Iter, PercentileIter, PercentileStep, RecordedIter};
pub use slot::Slot;
pub use standard::HdrHistogram;
