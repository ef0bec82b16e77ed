//! Destinations for per-round reports.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::metrics::RoundReport;
use crate::error::Result;
use crate::jabeja::RunConfig;

/// Accepts one [`RoundReport`] per round.
pub trait ReportSink {
    fn record(&mut self, report: &RoundReport) -> Result<()>;
}

/// Collects reports in memory.
impl ReportSink for Vec<RoundReport> {
    fn record(&mut self, report: &RoundReport) -> Result<()> {
        self.push(*report);
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn record(&mut self, report: &RoundReport) -> Result<()> {
        (**self).record(report)
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn record(&mut self, _report: &RoundReport) -> Result<()> {
        Ok(())
    }
}

const DELIMITER: &str = "\t\t";

/// Writes the classic tab-delimited report file.
///
/// ```text
/// # Migration is number of nodes that have changed color.
///
/// Round		Edge-Cut		Swaps		Migrations
/// 0		1234		87		87
/// ```
///
/// Each line is flushed as soon as it is recorded, so a partially
/// completed run leaves a readable file behind.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Creates `dir` if needed and opens `dir/file_name`, writing the header.
    pub fn create(dir: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(
            writer,
            "# Migration is number of nodes that have changed color."
        )?;
        writeln!(writer)?;
        writeln!(
            writer,
            "Round{DELIMITER}Edge-Cut{DELIMITER}Swaps{DELIMITER}Migrations"
        )?;
        writer.flush()?;
        debug!("writing report to {}", path.display());
        Ok(Self { path, writer })
    }

    /// Opens the report file for `config` under its output directory.
    pub fn for_config(config: &RunConfig) -> Result<Self> {
        Self::create(config.output_dir(), &report_file_name(config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    fn record(&mut self, report: &RoundReport) -> Result<()> {
        writeln!(
            self.writer,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            report.round, report.edge_cut, report.swap_count, report.migrations
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Report file name encoding the run parameters.
///
/// `<graph>_NS_<policy>_GICP_<init>_T_<T>_D_<delta>_RNSS_<n>_URSS_<n>_A_<alpha>_R_<rounds>.txt`
pub fn report_file_name(config: &RunConfig) -> String {
    let graph = config
        .graph_file_path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    format!(
        "{graph}_NS_{}_GICP_{}_T_{:?}_D_{:?}_RNSS_{}_URSS_{}_A_{:?}_R_{}.txt",
        config.node_selection_policy(),
        config.init_color_policy(),
        config.temperature(),
        config.delta(),
        config.random_neighbor_sample_size(),
        config.uniform_random_sample_size(),
        config.alpha(),
        config.rounds(),
    )
}
