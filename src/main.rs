use std::io::{self, BufWriter, Write};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use hdr_stats::{record_path, record_reader, write_distribution, write_summary, LoadSummary};
use log::{debug, info, LevelFilter};
use simple_logger::SimpleLogger;

mod args;

use args::Arguments;

fn main() -> Result<()> {
    let args = Arguments::parse();
    let log_level = if args.verbose {
        if cfg!(debug_assertions) {
            LevelFilter::Trace
        } else {
            LevelFilter::Debug
        }
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(log_level).env().init()?;

    run(args)
}

fn run(args: Arguments) -> Result<()> {
    let report = &args.report;
    ensure!(
        report.scale.is_finite() && report.scale > 0.0,
        "scale must be a positive number, got {}",
        report.scale
    );

    let mut histogram = args
        .histogram
        .build()
        .context("invalid histogram configuration")?;
    debug!("histogram config: {:?}", histogram.config());

    let mut loaded = LoadSummary::default();
    if args.inputs.is_empty() {
        loaded += record_reader(&mut histogram, io::stdin().lock(), "<stdin>")?;
    } else {
        for path in &args.inputs {
            loaded += record_path(&mut histogram, path)?;
        }
    }
    info!(
        "recorded {} values, rejected {}",
        loaded.recorded, loaded.rejected
    );

    let mut out = BufWriter::new(io::stdout().lock());
    if report.distribution {
        write_distribution(
            &mut out,
            &histogram,
            report.ticks,
            report.scale,
            report.format,
        )?;
    } else {
        write_summary(
            &mut out,
            &histogram,
            &loaded,
            &report.percentiles,
            report.scale,
        )?;
    }
    out.flush().context("failed to write report")?;

    Ok(())
}
