use crate::HdrHistogram;

impl HdrHistogram {
    /// The mean of all recorded values or NaN if the histogram is empty.
    ///
    /// Every value is represented by the middle of its slot.
    pub fn mean(&self) -> f64 {
        if self.total_count() == 0 {
            return f64::NAN;
        }
        let total: u128 = self
            .iter_recorded()
            .map(|slot| slot.count() as u128 * slot.median() as u128)
            .sum();
        total as f64 / self.total_count() as f64
    }

    /// The population standard deviation of all recorded values or NaN if the
    /// histogram is empty.
    ///
    /// Every value is represented by the middle of its slot.
    pub fn stddev(&self) -> f64 {
        if self.total_count() == 0 {
            return f64::NAN;
        }
        let mean = self.mean();
        let geometric_deviation_total: f64 = self
            .iter_recorded()
            .map(|slot| {
                let deviation = slot.median() as f64 - mean;
                (deviation * deviation) * slot.count() as f64
            })
            .sum();
        libm::sqrt(geometric_deviation_total / self.total_count() as f64)
    }
}

#[cfg(test)]
mod test {
    use crate::HdrHistogram;

    #[test]
    fn empty_is_nan() {
        let h = HdrHistogram::new(1, 100_000, 3).unwrap();
        assert!(h.mean().is_nan());
        assert!(h.stddev().is_nan());
    }

    #[test]
    fn single_value() {
        let mut h = HdrHistogram::new(1, 100_000, 3).unwrap();
        assert!(h.record_value(1000));
        assert_eq!(h.mean(), 1000.0);
        assert_eq!(h.stddev(), 0.0);
    }

    #[test]
    fn recorded_zeros_are_not_empty() {
        let mut h = HdrHistogram::new(1, 100_000, 3).unwrap();
        assert!(h.record_value(0));
        assert!(h.record_value(0));
        assert_eq!(h.mean(), 0.0);
        assert_eq!(h.stddev(), 0.0);
    }

    #[test]
    fn exact_within_unit_resolution() {
        let mut h = HdrHistogram::new(1, 100_000, 3).unwrap();
        for value in [2, 4, 4, 4, 5, 5, 7, 9] {
            assert!(h.record_value(value));
        }
        assert_eq!(h.mean(), 5.0);
        assert_eq!(h.stddev(), 2.0);
    }

    #[test]
    fn uses_slot_midpoints() {
        let mut h = HdrHistogram::new(1, 10_000_000, 3).unwrap();
        assert!(h.record_value(999_999));
        assert_eq!(h.mean(), 1_000_192.0);
    }
}
