use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use histogram::HdrHistogram;

use crate::LoadSummary;

/// Output format of the percentile distribution
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned columns with a summary footer (default)
    Classic,
    /// Comma separated values
    Csv,
}

/// Number of decimals for reported values.
///
/// Unscaled values are integers, scaled values keep one decimal per significant figure.
fn value_precision(histogram: &HdrHistogram, scale: f64) -> usize {
    if scale == 1.0 {
        0
    } else {
        histogram.config().significant_figures() as usize
    }
}

/// Writes counts, min, max, mean, standard deviation and the requested percentiles.
///
/// Fails if any percentile is not within `(0, 100]`.
pub fn write_summary<W: Write>(
    out: &mut W,
    histogram: &HdrHistogram,
    loaded: &LoadSummary,
    percentiles: &[f64],
    scale: f64,
) -> Result<()> {
    writeln!(out, "{:<12} {:>14}", "total count", histogram.total_count())?;
    writeln!(out, "{:<12} {:>14}", "rejected", loaded.rejected)?;
    if histogram.total_count() == 0 {
        writeln!(out, "no values recorded")?;
        return Ok(());
    }

    let precision = value_precision(histogram, scale);
    let scaled = |value: u64| value as f64 / scale;
    writeln!(out, "{:<12} {:>14.precision$}", "min", scaled(histogram.min()))?;
    writeln!(out, "{:<12} {:>14.precision$}", "max", scaled(histogram.max()))?;
    writeln!(out, "{:<12} {:>14.3}", "mean", histogram.mean() / scale)?;
    writeln!(out, "{:<12} {:>14.3}", "stddev", histogram.stddev() / scale)?;

    for (percentile, value) in histogram.percentiles(percentiles)? {
        let label = format!("p{percentile}");
        writeln!(out, "{label:<12} {:>14.precision$}", scaled(value))?;
    }
    Ok(())
}

/// Writes the percentile distribution of `histogram`.
///
/// See [HdrHistogram::iter_percentiles] for `ticks_per_half_distance`.
pub fn write_distribution<W: Write>(
    out: &mut W,
    histogram: &HdrHistogram,
    ticks_per_half_distance: u32,
    scale: f64,
    format: Format,
) -> Result<()> {
    let precision = value_precision(histogram, scale);

    match format {
        Format::Classic => writeln!(
            out,
            "{:>12} {:>14} {:>10} {:>14}\n",
            "Value", "Percentile", "TotalCount", "1/(1-Percentile)"
        )?,
        Format::Csv => writeln!(out, "Value,Percentile,TotalCount,1/(1-Percentile)")?,
    }

    for step in histogram.iter_percentiles(ticks_per_half_distance) {
        let value = step.value as f64 / scale;
        let percentile = step.percentile / 100.0;
        let inverted = (step.percentile < 100.0).then(|| 1.0 / (1.0 - percentile));

        match (format, inverted) {
            (Format::Classic, Some(inverted)) => writeln!(
                out,
                "{value:>12.precision$} {percentile:>2.12} {:>10} {inverted:>14.2}",
                step.cumulative_count
            )?,
            (Format::Classic, None) => writeln!(
                out,
                "{value:>12.precision$} {percentile:>2.12} {:>10}",
                step.cumulative_count
            )?,
            (Format::Csv, Some(inverted)) => writeln!(
                out,
                "{value:.precision$},{percentile:.12},{},{inverted:.2}",
                step.cumulative_count
            )?,
            (Format::Csv, None) => writeln!(
                out,
                "{value:.precision$},{percentile:.12},{},Infinity",
                step.cumulative_count
            )?,
        }
    }

    if format == Format::Classic {
        let config = histogram.config();
        writeln!(
            out,
            "#[Mean    = {:>12.3}, StdDeviation   = {:>12.3}]",
            histogram.mean() / scale,
            histogram.stddev() / scale
        )?;
        writeln!(
            out,
            "#[Max     = {:>12.3}, Total count    = {:>12}]",
            histogram.max() as f64 / scale,
            histogram.total_count()
        )?;
        writeln!(
            out,
            "#[Buckets = {:>12}, SubBuckets     = {:>12}]",
            config.bucket_count(),
            config.sub_bucket_count()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{value_precision, write_summary};
    use crate::LoadSummary;
    use histogram::HdrHistogram;

    #[test]
    fn precision_depends_on_scale() {
        let h = HdrHistogram::new(1, 1000, 2).unwrap();
        assert_eq!(value_precision(&h, 1.0), 0);
        assert_eq!(value_precision(&h, 1000.0), 2);
    }

    #[test]
    fn summary_of_empty_histogram() {
        let h = HdrHistogram::new(1, 1000, 2).unwrap();
        let mut out = Vec::new();
        write_summary(&mut out, &h, &LoadSummary::default(), &[50.0], 1.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("no values recorded"));
        assert!(!text.contains("p50"));
    }

    #[test]
    fn summary_rejects_invalid_percentile() {
        let mut h = HdrHistogram::new(1, 1000, 2).unwrap();
        assert!(h.record_value(5));
        let mut out = Vec::new();
        let result = write_summary(&mut out, &h, &LoadSummary::default(), &[101.0], 1.0);
        assert!(result.is_err());
    }
}
