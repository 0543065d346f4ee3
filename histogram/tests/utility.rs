use histogram::{Error, HdrHistogram};

fn assert_close(actual: f64, expected: f64) {
    let tolerance = expected.abs() * 1e-12;
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn create_with_large_values() {
    let mut h = HdrHistogram::new(20_000_000, 100_000_000, 5).unwrap();
    assert!(h.record_value(100_000_000));
    assert!(h.record_value(20_000_000));
    assert!(h.record_value(30_000_000));

    assert!(h.values_are_equivalent(h.value_at_percentile(50.0), 20_000_000));
    assert!(h.values_are_equivalent(h.value_at_percentile(83.33), 30_000_000));
    assert!(h.values_are_equivalent(h.value_at_percentile(83.34), 100_000_000));
    assert!(h.values_are_equivalent(h.value_at_percentile(99.0), 100_000_000));
}

#[test]
fn high_significant_figures() {
    let values = [
        459876, 669187, 711612, 816326, 931423, 1033197, 1131895, 2477317, 3964974, 12718782,
    ];
    let mut h = HdrHistogram::new(459876, 12718782, 5).unwrap();
    for value in values {
        assert!(h.record_value(value));
    }
    assert_eq!(h.value_at_percentile(50.0), 1048575);
}

#[test]
fn empty_mean_and_stddev_are_nan() {
    let h = HdrHistogram::new(1, 100_000, 3).unwrap();
    assert!(h.mean().is_nan());
    assert!(h.stddev().is_nan());
}

#[test]
fn stats() {
    let mut h = HdrHistogram::new(1, 10_000_000, 3).unwrap();
    for value in 0..1_000_000 {
        assert!(h.record_value(value));
    }

    assert_eq!(h.total_count(), 1_000_000);
    assert_eq!(h.min(), 0);
    assert_eq!(h.max(), 1000447);

    assert_eq!(h.value_at_percentile(50.0), 500223);
    assert_eq!(h.value_at_percentile(75.0), 750079);
    assert_eq!(h.value_at_percentile(90.0), 900095);
    assert_eq!(h.value_at_percentile(95.0), 950271);
    assert_eq!(h.value_at_percentile(99.0), 990207);
    assert_eq!(h.value_at_percentile(99.9), 999423);
    assert_eq!(h.value_at_percentile(99.99), 999935);
    assert_eq!(h.value_at_percentile(100.0), h.max());

    assert_close(h.mean(), 500000.013312);
    assert_close(h.stddev(), 288675.1403682715);
}

#[test]
fn percentile_value_is_equivalent_to_ranked_sample() {
    let mut samples: Vec<u64> = (1..=2000u64).map(|i| i * i * 37 % 9_999_991).collect();
    let mut h = HdrHistogram::new(1, 10_000_000, 3).unwrap();
    for sample in &samples {
        assert!(h.record_value(*sample));
    }
    samples.sort_unstable();

    for percentile in [0.05, 1.0, 10.0, 33.3, 50.0, 90.0, 99.0, 99.95, 100.0] {
        let rank = ((percentile / 100.0 * samples.len() as f64 + 0.5) as usize).max(1);
        let expected = samples[rank - 1];
        let value = h.value_at_percentile(percentile);
        assert!(
            h.values_are_equivalent(expected, value),
            "p{percentile}: {value} is not equivalent to {expected}"
        );
    }
}

#[test]
fn rejected_values_leave_histogram_untouched() {
    let mut h = HdrHistogram::new(1, 3_600_000_000, 3).unwrap();
    assert!(h.record_value(1234));
    let before = h.clone();

    assert!(!h.record_value(3_600_000_001));
    assert!(!h.record_value(u64::MAX));

    assert_eq!(h.total_count(), before.total_count());
    assert_eq!(h.min(), before.min());
    assert_eq!(h.max(), before.max());
    assert!(h.iter().zip(before.iter()).all(|(a, b)| a == b));
}

#[test]
fn empty_queries_return_zero() {
    let h = HdrHistogram::new(1, 3_600_000_000, 3).unwrap();
    assert_eq!(h.min(), 0);
    assert_eq!(h.max(), 0);
    assert_eq!(h.value_at_percentile(50.0), 0);
    assert_eq!(h.value_at_percentile(100.0), 0);
}

#[test]
fn invalid_configuration() {
    assert_eq!(
        HdrHistogram::new(0, 1000, 3).unwrap_err(),
        Error::LowestTrackableValueZero
    );
    assert_eq!(
        HdrHistogram::new(1, 1000, 9).unwrap_err(),
        Error::SignificantFigures(9)
    );
    assert_eq!(
        HdrHistogram::new(1000, 1000, 3).unwrap_err(),
        Error::HighestTrackableValueTooSmall {
            lowest: 1000,
            highest: 1000
        }
    );
}
