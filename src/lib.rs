//! Host side helpers of the `hdr-stats` tool: reading measurements into a
//! [HdrHistogram](histogram::HdrHistogram) and writing reports about them.

mod input;
mod report;

pub use input::{record_path, record_reader, LoadSummary};
pub use report::{write_distribution, write_summary, Format};
