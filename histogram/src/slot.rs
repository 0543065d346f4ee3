/// A single counter of a [HdrHistogram](crate::HdrHistogram) together with the
/// range of values it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub(crate) index: usize,
    pub(crate) count: u64,
    pub(crate) lowest: u64,
    pub(crate) highest: u64,
}

impl Slot {
    /// The index of this slot within the counter array
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of values recorded in this slot
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The lowest value that maps to this slot
    pub fn start(&self) -> u64 {
        self.lowest
    }

    /// The highest value that maps to this slot, inclusive
    pub fn end(&self) -> u64 {
        self.highest
    }

    /// The value in the middle of this slot's range.
    ///
    /// Used as the representative value for mean and standard deviation.
    pub fn median(&self) -> u64 {
        self.lowest + (self.highest - self.lowest + 1) / 2
    }

    /// Whether `value` maps to this slot
    pub fn contains(&self, value: u64) -> bool {
        self.lowest <= value && value <= self.highest
    }
}
