//! Segment-length histograms and the per-run summary built from them.
//!
//! Every processed file gets a histogram of its segment lengths
//! (`z_<name>_ELENHIS.tab`):
//!
//! ```text
//! > ELEN; count
//! 3	2
//! 7	1
//! ```
//!
//! After all files are done, [`summarize_histograms`] reads back every
//! histogram in the output directory and writes one row per file with the
//! number of segments at least `length_low_cutoff` long
//! (`z_<folder>_ELENSUM.tab`).

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::{
    COMMENT_MARKER, HISTOGRAM_HEADER, HISTOGRAM_STEM_SUFFIX, OUTPUT_PREFIX, SUMMARY_SUFFIX,
};
use crate::types::{Segment, TopstopError};

/// Count of segments per distinct length, ordered by length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthHistogram {
    counts: BTreeMap<u64, u64>,
}

impl LengthHistogram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every segment of one list.
    pub fn add_segments(&mut self, segments: &[Segment]) {
        for segment in segments {
            *self.counts.entry(segment.len()).or_insert(0) += 1;
        }
    }

    /// `(length, count)` pairs in ascending length order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&len, &count)| (len, count))
    }

    #[must_use]
    pub fn count(&self, len: u64) -> u64 {
        self.counts.get(&len).copied().unwrap_or(0)
    }

    /// Number of distinct lengths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of segments counted.
    #[must_use]
    pub fn total_segments(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Σ length × count.
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.iter().map(|(len, count)| len * count).sum()
    }

    /// Writes the header row followed by one `length<TAB>count` row per
    /// length.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), TopstopError> {
        writeln!(writer, "{HISTOGRAM_HEADER}")?;
        for (len, count) in self.iter() {
            writeln!(writer, "{len}\t{count}")?;
        }
        Ok(())
    }
}

/// One row of the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Input file stem the histogram was written for.
    pub name: String,
    /// Segments at least as long as the cutoff.
    pub total: i64,
}

/// Result of writing the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub cutoff: i64,
    pub rows: Vec<SummaryRow>,
}

/// Parses one histogram body row into `(length, count)`.
///
/// The row must consist of exactly two fields separated by a single space or
/// tab.
pub fn parse_histogram_row(line: &str) -> Result<(i64, i64), String> {
    let fields: Vec<&str> = line.split([' ', '\t']).collect();
    let [len, count] = fields.as_slice() else {
        return Err(format!("expected 2 fields, found {}", fields.len()));
    };
    let len = len
        .parse::<i64>()
        .map_err(|_| format!("{len} is not a valid element length"))?;
    let count = count
        .parse::<i64>()
        .map_err(|_| format!("{count} is not a valid length count"))?;
    Ok((len, count))
}

/// Sums the counts of all rows with a length of at least `cutoff`.
///
/// Header and blank lines are skipped; malformed rows are logged and
/// skipped.
pub fn sum_histogram<R: BufRead>(reader: R, cutoff: i64, path: &Path) -> Result<i64, TopstopError> {
    let mut total = 0i64;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        let row = parse_histogram_row(line).and_then(|(len, count)| {
            if len < cutoff {
                return Ok(total);
            }
            total
                .checked_add(count)
                .ok_or_else(|| "count overflows the running total".to_string())
        });
        match row {
            Ok(sum) => total = sum,
            Err(reason) => {
                let err = TopstopError::MalformedHistogramRow {
                    path: path.to_path_buf(),
                    text: line.to_string(),
                    reason,
                };
                warn!("{err}");
            }
        }
    }
    Ok(total)
}

/// True for `*.tab` files whose stem ends with `_ELENHIS`, ignoring case.
#[must_use]
pub fn is_histogram_file(path: &Path) -> bool {
    let is_tab = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tab"));
    let stem_matches = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| {
            stem.to_ascii_lowercase()
                .ends_with(&HISTOGRAM_STEM_SUFFIX.to_ascii_lowercase())
        });
    is_tab && stem_matches
}

/// Name reported for a histogram file: its stem without the `z_` prefix and
/// the `_ELENHIS` suffix.
#[must_use]
pub fn histogram_basename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_prefix(OUTPUT_PREFIX).unwrap_or(&stem);
    let keep = stem.len().saturating_sub(HISTOGRAM_STEM_SUFFIX.len());
    stem.get(..keep).unwrap_or(stem).to_string()
}

/// Histogram files in `dir`, sorted by file name.
pub fn list_histogram_files(dir: &Path) -> Result<Vec<PathBuf>, TopstopError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_histogram_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Aggregates every histogram in `output_dir` into
/// `z_<folder_name>_ELENSUM.tab`.
///
/// The summary is written even when there are no histograms, in which case
/// it holds only its header row.
pub fn summarize_histograms(
    output_dir: &Path,
    folder_name: &str,
    cutoff: i64,
) -> Result<RunSummary, TopstopError> {
    let path = output_dir.join(format!("{OUTPUT_PREFIX}{folder_name}{SUMMARY_SUFFIX}"));
    let histograms = if output_dir.is_dir() {
        list_histogram_files(output_dir)?
    } else {
        Vec::new()
    };

    let mut rows = Vec::with_capacity(histograms.len());
    for histogram in &histograms {
        let reader = BufReader::new(File::open(histogram)?);
        let total = sum_histogram(reader, cutoff, histogram)?;
        debug!("{}: {total} segments of length >= {cutoff}", histogram.display());
        rows.push(SummaryRow {
            name: histogram_basename(histogram),
            total,
        });
    }

    fs::create_dir_all(output_dir)?;
    let mut writer = BufWriter::new(File::create(&path)?);
    writeln!(
        writer,
        ">filename\ttotal chain length with at least {cutoff}"
    )?;
    for row in &rows {
        writeln!(writer, "{} {}", row.name, row.total)?;
    }
    writer.flush()?;

    Ok(RunSummary { path, cutoff, rows })
}
