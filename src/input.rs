use std::{
    io::{BufRead, BufReader},
    ops::AddAssign,
    path::Path,
};

use anyhow::{Context, Result};
use histogram::HdrHistogram;
use log::{debug, warn};

/// The number of values read from an input
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// values that were recorded
    pub recorded: u64,
    /// values above the highest trackable value
    pub rejected: u64,
}

impl AddAssign for LoadSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.recorded += rhs.recorded;
        self.rejected += rhs.rejected;
    }
}

/// Records every value in `reader` into `histogram`.
///
/// Values are whitespace separated unsigned integers, a `#` starts a comment
/// that runs until the end of the line. `source` names the input in errors
/// and log messages. Values above the highest trackable value are skipped and
/// counted as rejected.
pub fn record_reader<R: BufRead>(
    histogram: &mut HdrHistogram,
    reader: R,
    source: &str,
) -> Result<LoadSummary> {
    let mut summary = LoadSummary::default();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {source}"))?;
        let line_number = line_index + 1;
        let content = match line.split_once('#') {
            Some((content, _comment)) => content,
            None => &line,
        };

        for token in content.split_whitespace() {
            let value: u64 = token
                .parse()
                .with_context(|| format!("{source}:{line_number}: invalid value {token:?}"))?;

            if histogram.record_value(value) {
                summary.recorded += 1;
            } else {
                warn!(
                    "{source}:{line_number}: skip {value}, above highest trackable value {}",
                    histogram.config().highest_trackable_value()
                );
                summary.rejected += 1;
            }
        }
    }

    debug!(
        "{source}: recorded {}, rejected {}",
        summary.recorded, summary.rejected
    );
    Ok(summary)
}

/// Records every value in the file at `path` into `histogram`.
///
/// See [record_reader]
pub fn record_path(histogram: &mut HdrHistogram, path: &Path) -> Result<LoadSummary> {
    let file = fs_err::File::open(path)?;
    record_reader(histogram, BufReader::new(file), &path.display().to_string())
}

#[cfg(test)]
mod test {
    use super::{record_reader, LoadSummary};
    use histogram::HdrHistogram;

    #[test]
    fn comments_and_blank_lines() {
        let mut h = HdrHistogram::new(1, 1000, 3).unwrap();
        let input = "# latencies\n1 2 3\n\n   4\t5 # trailing\n#6\n";
        let summary = record_reader(&mut h, input.as_bytes(), "test").unwrap();

        assert_eq!(
            summary,
            LoadSummary {
                recorded: 5,
                rejected: 0
            }
        );
        assert_eq!(h.total_count(), 5);
        assert_eq!(h.max(), 5);
    }

    #[test]
    fn rejected_values_are_counted() {
        let mut h = HdrHistogram::new(1, 1000, 3).unwrap();
        let summary = record_reader(&mut h, "10 1001 20 5000".as_bytes(), "test").unwrap();
        assert_eq!(summary.recorded, 2);
        assert_eq!(summary.rejected, 2);
        assert_eq!(h.total_count(), 2);
    }

    #[test]
    fn invalid_token_names_line() {
        let mut h = HdrHistogram::new(1, 1000, 3).unwrap();
        let err = record_reader(&mut h, "1 2\n3 -4\n".as_bytes(), "numbers.txt").unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("numbers.txt:2"), "{message}");
        assert!(message.contains("\"-4\""), "{message}");
    }
}
