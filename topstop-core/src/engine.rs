use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::chains::ChainTranslator;
use crate::circuit::{CircuitTracker, SegmentLists};
use crate::code_table::CodeTable;
use crate::config::TopstopConfig;
use crate::constants::{
    HISTOGRAM_PROGRESS_DONE, SCAN_PROGRESS_SHARE, SCAN_REPORT_INTERVAL, TOPOLOGY_PROGRESS_STEPS,
};
use crate::histogram::{summarize_histograms, LengthHistogram, RunSummary};
use crate::output::{create_buffered, write_header, OutputFiles, OutputLocation, RunLengthWriter};
use crate::progress::{FileReportsOnly, Progress, SilentProgress};
use crate::results::{FileFailure, FileReport, RunReport};
use crate::sequence::{list_sequence_files, open_sequence_file, BondClassifier};
use crate::topology::TopologyResolver;
use crate::types::{Position, TopstopError};

/// Label reported to the progress observer while the summary is written.
pub const SUMMARY_STEP_LABEL: &str = "Generating summary...";

/// Folder-level driver: loads the code table, runs every sequence file
/// through the four phases and aggregates the histograms.
///
/// Each file goes through:
///
/// 1. **Scan**: windows are classified, the bonds and type streams written
///    and the circuits tracked
/// 2. **Histogram**: segment lengths are counted and written
/// 3. **Topology**: the two segment lists are resolved into the topstop
///    stream
/// 4. **Chains**: the finished topstop file is translated
///
/// A file that fails is logged and recorded in the [`RunReport`]; the run
/// moves on to the next one. Only a config that cannot be loaded fails the
/// run.
///
/// # Examples
///
/// ## Silent run over a folder
///
/// ```rust,no_run
/// use topstop_core::{TopstopPipeline, config::TopstopConfig};
///
/// let pipeline = TopstopPipeline::new(TopstopConfig::for_folder("data"));
/// let report = pipeline.run()?;
/// println!("{} files, {} failed", report.files.len(), report.failures.len());
/// # Ok::<(), topstop_core::types::TopstopError>(())
/// ```
///
/// ## With a progress observer
///
/// ```rust,no_run
/// use topstop_core::{TopstopPipeline, config::TopstopConfig, progress::Progress};
///
/// struct Print;
///
/// impl Progress for Print {
///     fn report_file(&self, name: &str) {
///         println!("{name}");
///     }
/// }
///
/// let pipeline = TopstopPipeline::with_progress(TopstopConfig::for_folder("data"), Print);
/// pipeline.run()?;
/// # Ok::<(), topstop_core::types::TopstopError>(())
/// ```
#[derive(Debug)]
pub struct TopstopPipeline<P: Progress = SilentProgress> {
    /// Run options
    pub config: TopstopConfig,
    progress: P,
}

impl TopstopPipeline<SilentProgress> {
    /// Creates a pipeline that reports no progress.
    pub const fn new(config: TopstopConfig) -> Self {
        Self {
            config,
            progress: SilentProgress,
        }
    }
}

impl<P: Progress> TopstopPipeline<P> {
    pub const fn with_progress(config: TopstopConfig, progress: P) -> Self {
        Self { config, progress }
    }

    /// Loads the code table named by the config.
    ///
    /// # Errors
    ///
    /// Any config error; these abort a run before files are touched.
    pub fn load_code_table(&self) -> Result<CodeTable, TopstopError> {
        let path = self.config.config_path();
        let table = CodeTable::from_file(&path).inspect_err(|e| {
            error!("Could not read config file: {e}");
        })?;
        info!(
            "Loaded {} dinucleotide codes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Processes every sequence file of the input folder and writes the run
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns an error when the code table cannot be loaded, the input
    /// folder cannot be listed, or the thread pool cannot be built. Failures
    /// of individual files are reported in [`RunReport::failures`] instead.
    pub fn run(&self) -> Result<RunReport, TopstopError> {
        if self.config.quiet {
            self.run_observed(&SilentProgress)
        } else {
            self.run_observed(&self.progress)
        }
    }

    fn run_observed<Q: Progress>(&self, progress: &Q) -> Result<RunReport, TopstopError> {
        progress.start();

        let table = self.load_code_table()?;
        let inputs = list_sequence_files(&self.config.input_folder)?;
        info!(
            "Found {} sequence files in {}",
            inputs.len(),
            self.config.input_folder.display()
        );
        for (stem, paths) in shared_stems(&inputs) {
            warn!(
                "{} input files share the name {stem}; the last one in name order keeps its outputs",
                paths.len()
            );
        }

        let location = OutputLocation::new(self.config.output_dir());
        let outcomes = if self.config.is_parallel() {
            self.process_parallel(&table, &location, &inputs, progress)?
        } else {
            inputs
                .iter()
                .map(|path| {
                    let outcome = self.process_reported(&table, &location, path, progress);
                    (path.clone(), outcome)
                })
                .collect()
        };

        let mut report = RunReport::default();
        for (input, outcome) in outcomes {
            match outcome {
                Ok(file) => report.files.push(file),
                Err(err) => report.failures.push(FileFailure {
                    input,
                    message: err.to_string(),
                }),
            }
        }

        progress.report_file(SUMMARY_STEP_LABEL);
        report.summary = self.summarize(&table, &location);

        progress.end();
        Ok(report)
    }

    fn process_parallel<Q: Progress>(
        &self,
        table: &CodeTable,
        location: &OutputLocation,
        inputs: &[PathBuf],
        progress: &Q,
    ) -> Result<Vec<(PathBuf, Result<FileReport, TopstopError>)>, TopstopError> {
        let num_threads = self.config.num_threads.unwrap_or(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| TopstopError::InvalidParameter {
                name: "num_threads".to_string(),
                value: format!("{num_threads} ({e})"),
            })?;

        // files sharing an output name run one after another, in name order
        let shared: Vec<PathBuf> = shared_stems(inputs).into_values().flatten().collect();
        let (serial, pooled): (Vec<&PathBuf>, Vec<&PathBuf>) =
            inputs.iter().partition(|path| shared.contains(*path));

        let progress = FileReportsOnly(progress);
        let mut outcomes: Vec<_> = pool.install(|| {
            pooled
                .par_iter()
                .map(|path| {
                    let outcome = self.process_reported(table, location, path, &progress);
                    ((*path).clone(), outcome)
                })
                .collect()
        });
        outcomes.extend(serial.into_iter().map(|path| {
            let outcome = self.process_reported(table, location, path, &progress);
            (path.clone(), outcome)
        }));
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(outcomes)
    }

    fn process_reported<Q: Progress>(
        &self,
        table: &CodeTable,
        location: &OutputLocation,
        path: &Path,
        progress: &Q,
    ) -> Result<FileReport, TopstopError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.report_file(&name);
        info!("Processing {}", path.display());

        process_file(table, location, path, progress)
            .map_err(|e| e.in_file(path))
            .inspect(|file| {
                info!(
                    "Finished {}: {} positions, {} segments",
                    path.display(),
                    file.positions,
                    file.first_segments + file.second_segments
                );
            })
            .inspect_err(|e| error!("{e}"))
    }

    fn summarize(&self, table: &CodeTable, location: &OutputLocation) -> Option<RunSummary> {
        let cutoff = match table.length_low_cutoff() {
            Ok(cutoff) => cutoff,
            Err(e) => {
                warn!("Cannot generate the summary file: {e}");
                return None;
            }
        };

        let folder = folder_name(&self.config.input_folder);
        match summarize_histograms(location.dir(), &folder, cutoff) {
            Ok(summary) => {
                info!(
                    "Wrote summary of {} histograms to {}",
                    summary.rows.len(),
                    summary.path.display()
                );
                Some(summary)
            }
            Err(e) => {
                error!("Could not write the summary file: {e}");
                None
            }
        }
    }
}

/// Runs the four phases for one sequence file.
///
/// # Errors
///
/// Any I/O failure while reading the input or writing an output file.
pub fn process_file<Q: Progress + ?Sized>(
    table: &CodeTable,
    location: &OutputLocation,
    path: &Path,
    progress: &Q,
) -> Result<FileReport, TopstopError> {
    let file_len = fs::metadata(path)?.len();
    let mut scanner = open_sequence_file(path)?;
    let header = scanner.header().to_string();
    let outputs = location.files_for(&output_stem(path))?;

    // Scan
    let classifier = BondClassifier::new(table);
    let mut tracker = CircuitTracker::new();
    let mut unknown_windows = 0u64;
    {
        let mut bonds = create_buffered(&outputs.bonds)?;
        let mut btype = create_buffered(&outputs.btype)?;
        write_header(&mut bonds, &header)?;
        write_header(&mut btype, &header)?;

        while let Some(window) = scanner.next_window()? {
            let class = classifier.classify(window.units);
            bonds.write_all(class.bond_text().as_bytes())?;
            btype.write_all(&[class.type_byte()])?;
            let bond = class.bond();
            if bond.is_none() {
                unknown_windows += 1;
            }
            tracker.process(bond, window.position);

            if window.position % SCAN_REPORT_INTERVAL == 0 {
                progress.report_percentage(scan_percentage(scanner.bytes_consumed(), file_len));
            }
        }
        bonds.flush()?;
        btype.flush()?;
    }
    progress.report_percentage(scan_percentage(scanner.bytes_consumed(), file_len));

    let positions = scanner.positions();
    drop(scanner);
    let lists = tracker.finish(positions);

    // Histogram
    let mut histogram = LengthHistogram::new();
    histogram.add_segments(&lists.first);
    progress.report_percentage(81.0);
    histogram.add_segments(&lists.second);
    progress.report_percentage(82.0);
    {
        let mut writer = create_buffered(&outputs.histogram)?;
        histogram.write_to(&mut writer)?;
        writer.flush()?;
    }
    progress.report_percentage(HISTOGRAM_PROGRESS_DONE);

    // Topology
    write_topstop(&outputs, &header, &lists, positions, progress)?;

    // Chains
    {
        let source = File::open(&outputs.topstop)?;
        let mut sink = create_buffered(&outputs.chains)?;
        ChainTranslator::new().translate(source, &mut sink)?;
        sink.flush()?;
    }
    progress.report_percentage(100.0);

    Ok(FileReport {
        input: path.to_path_buf(),
        header,
        positions,
        unknown_windows,
        first_segments: lists.first.len(),
        second_segments: lists.second.len(),
        total_segment_length: lists.total_length(),
        outputs,
    })
}

fn write_topstop<Q: Progress + ?Sized>(
    outputs: &OutputFiles,
    header: &str,
    lists: &SegmentLists,
    positions: Position,
    progress: &Q,
) -> Result<(), TopstopError> {
    let mut writer = RunLengthWriter::new(create_buffered(&outputs.topstop)?);
    write_header(writer.get_mut(), header)?;

    let report_every = ((positions as f64 / TOPOLOGY_PROGRESS_STEPS) as u64).max(1);
    let mut next_report = 0;
    let mut done = 0;
    for run in TopologyResolver::new(&lists.first, &lists.second, positions) {
        writer.push_run(run.symbol.as_byte(), run.len)?;
        done += run.len;
        if done >= next_report {
            progress.report_percentage(topology_percentage(done, positions));
            next_report = done + report_every;
        }
    }
    writer.finish()?;
    Ok(())
}

/// Name the output files of `path` are derived from.
fn output_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Output names claimed by more than one input, with those inputs in order.
fn shared_stems(inputs: &[PathBuf]) -> BTreeMap<String, Vec<PathBuf>> {
    let mut by_stem: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for path in inputs {
        by_stem.entry(output_stem(path)).or_default().push(path.clone());
    }
    by_stem.retain(|_, paths| paths.len() > 1);
    by_stem
}

/// First-pass progress: bytes read out of the file size, scaled to 0..80.
fn scan_percentage(consumed: u64, file_len: u64) -> f64 {
    if file_len == 0 {
        return SCAN_PROGRESS_SHARE;
    }
    (consumed as f64 * SCAN_PROGRESS_SHARE / file_len as f64).min(SCAN_PROGRESS_SHARE)
}

/// Topology progress, scaled to 83..100.
fn topology_percentage(done: Position, positions: Position) -> f64 {
    if positions == 0 {
        return 100.0;
    }
    HISTOGRAM_PROGRESS_DONE + (100.0 - HISTOGRAM_PROGRESS_DONE) * done as f64 / positions as f64
}

/// Last component of the input folder, used to name the run summary.
fn folder_name(folder: &Path) -> String {
    let resolved = fs::canonicalize(folder).unwrap_or_else(|_| folder.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "topstop".to_string())
}
