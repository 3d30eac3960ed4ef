use std::path::PathBuf;

use crate::histogram::RunSummary;
use crate::output::OutputFiles;

/// Outcome of processing one sequence file.
///
/// # Examples
///
/// ```rust,no_run
/// use topstop_core::{TopstopPipeline, config::TopstopConfig};
///
/// let pipeline = TopstopPipeline::new(TopstopConfig::for_folder("data"));
/// let report = pipeline.run()?;
///
/// for file in &report.files {
///     println!("{}: {} positions, {} segments",
///              file.input.display(),
///              file.positions,
///              file.first_segments + file.second_segments);
/// }
/// # Ok::<(), topstop_core::types::TopstopError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The sequence file that was read.
    pub input: PathBuf,

    /// Header line of the input, possibly empty.
    ///
    /// Consecutive leading header lines are joined, each keeping its `>`.
    pub header: String,

    /// Number of windows scanned, which is also the length of every
    /// per-position output stream.
    pub positions: u64,

    /// Windows with no entry in the code table.
    pub unknown_windows: u64,

    /// Segments finalized by the first circuit slot.
    pub first_segments: usize,

    /// Segments finalized by the second circuit slot.
    pub second_segments: usize,

    /// Sum of all segment lengths.
    pub total_segment_length: u64,

    /// Files written for this input.
    pub outputs: OutputFiles,
}

/// A file that could not be processed.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub input: PathBuf,
    /// Rendered error, as it was logged.
    pub message: String,
}

/// Outcome of a whole run over an input folder.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Successfully processed files, in input order.
    pub files: Vec<FileReport>,

    /// Files whose processing failed; the run carried on past them.
    pub failures: Vec<FileFailure>,

    /// The aggregated summary, `None` when aggregation was skipped.
    pub summary: Option<RunSummary>,
}

impl RunReport {
    /// True when every input file was processed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of positions over all processed files.
    #[must_use]
    pub fn total_positions(&self) -> u64 {
        self.files.iter().map(|f| f.positions).sum()
    }
}
