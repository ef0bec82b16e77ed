//! Per-round metrics and where they go.

mod metrics;
mod sink;

pub use metrics::{edge_cut, measure, migrations, partition_sizes, PartitionMetrics, RoundReport};
pub use sink::{report_file_name, FileSink, NullSink, ReportSink};
