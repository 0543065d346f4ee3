use clap::{Args, Parser};
use hdr_stats::Format;
use histogram::HdrHistogram;
use std::path::PathBuf;

/// Record integer measurements into a high dynamic range histogram and report
/// their distribution
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(flatten)]
    pub histogram: HistogramOptions,

    #[command(flatten)]
    pub report: ReportOptions,

    /// files with whitespace separated values. `#` starts a comment.
    ///
    /// Values are read from stdin if no file is given.
    pub inputs: Vec<PathBuf>,

    /// verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct HistogramOptions {
    /// smallest value that is tracked with full precision
    #[arg(long, default_value_t = 1)]
    pub lowest: u64,

    /// largest value that can be recorded. Larger values are skipped
    #[arg(long, default_value_t = 3_600_000_000)]
    pub highest: u64,

    /// number of significant decimal figures, between 1 and 5
    #[arg(short, long, default_value_t = 3)]
    pub significant_figures: u8,
}

impl HistogramOptions {
    pub fn build(&self) -> Result<HdrHistogram, histogram::Error> {
        HdrHistogram::new(self.lowest, self.highest, self.significant_figures)
    }
}

#[derive(Args, Debug)]
pub struct ReportOptions {
    /// percentiles listed in the summary
    #[arg(
        short,
        long = "percentile",
        default_values_t = [50.0, 75.0, 90.0, 95.0, 99.0, 99.9, 99.99]
    )]
    pub percentiles: Vec<f64>,

    /// print the percentile distribution instead of the summary
    #[arg(long)]
    pub distribution: bool,

    /// reported percentiles per halving of the distance to 100%, used by [distribution]
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub ticks: u32,

    /// reported values are divided by this ratio
    ///
    /// e.g. use 1000 to report values recorded in nanoseconds as microseconds
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// output format of the distribution
    #[arg(long, value_enum, default_value_t = Format::Classic)]
    pub format: Format,
}
