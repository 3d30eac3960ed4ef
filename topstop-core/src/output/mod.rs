//! Output locations and writers for topstop result files.
//!
//! Every input file `<name>.fa` produces five files in the output directory:
//!
//! - **`z_<name>_BONDS.fa`**: two characters per position (`I^`, `0:`, `.x`, ...)
//! - **`z_<name>_BTYPE.fa`**: one type code per position
//! - **`z_<name>_TOPSTOP.fa`**: one topstop symbol per position
//! - **`z_<name>_CHAINS.fa`**: the topstop stream translated to chain letters
//! - **`z_<name>_ELENHIS.tab`**: segment-length histogram
//!
//! The three streams written while scanning and resolving start with the
//! input header line when it is not blank. Bodies carry no trailing newline.
//!
//! ## Examples
//!
//! ```rust
//! use topstop_core::output::OutputFiles;
//! use std::path::Path;
//!
//! let files = OutputFiles::new(Path::new("OUTPUT"), "sample");
//! assert_eq!(files.bonds, Path::new("OUTPUT/z_sample_BONDS.fa"));
//! assert_eq!(files.histogram, Path::new("OUTPUT/z_sample_ELENHIS.tab"));
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::constants::{
    BONDS_SUFFIX, BTYPE_SUFFIX, CHAINS_SUFFIX, HISTOGRAM_SUFFIX, OUTPUT_PREFIX, TOPSTOP_SUFFIX,
};
use crate::types::TopstopError;

pub mod run_length;

pub use run_length::RunLengthWriter;

/// Paths of the files produced for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub bonds: PathBuf,
    pub btype: PathBuf,
    pub topstop: PathBuf,
    pub chains: PathBuf,
    pub histogram: PathBuf,
}

impl OutputFiles {
    /// Paths for input stem `name` inside `dir`.
    #[must_use]
    pub fn new(dir: &Path, name: &str) -> Self {
        let path = |suffix: &str| dir.join(format!("{OUTPUT_PREFIX}{name}{suffix}"));
        Self {
            bonds: path(BONDS_SUFFIX),
            btype: path(BTYPE_SUFFIX),
            topstop: path(TOPSTOP_SUFFIX),
            chains: path(CHAINS_SUFFIX),
            histogram: path(HISTOGRAM_SUFFIX),
        }
    }

    /// Every path, in the order the files are written.
    #[must_use]
    pub fn all(&self) -> [&Path; 5] {
        [
            self.bonds.as_path(),
            self.btype.as_path(),
            self.histogram.as_path(),
            self.topstop.as_path(),
            self.chains.as_path(),
        ]
    }
}

/// Output directory that is created on first use.
///
/// Safe to share between threads; the directory is created at most once
/// per location even when several files finish their first phase together.
#[derive(Debug)]
pub struct OutputLocation {
    dir: PathBuf,
    created: AtomicBool,
}

impl OutputLocation {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            created: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory if this location has not done so yet.
    pub fn ensure(&self) -> Result<&Path, TopstopError> {
        if !self.created.load(Ordering::Acquire) {
            fs::create_dir_all(&self.dir)?;
            if !self.created.swap(true, Ordering::AcqRel) {
                debug!("Created output directory {}", self.dir.display());
            }
        }
        Ok(&self.dir)
    }

    /// Output paths for input stem `name`, creating the directory first.
    pub fn files_for(&self, name: &str) -> Result<OutputFiles, TopstopError> {
        Ok(OutputFiles::new(self.ensure()?, name))
    }
}

/// Creates `path` for buffered writing.
pub fn create_buffered(path: &Path) -> Result<BufWriter<File>, TopstopError> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes `header` and a line break unless the header is blank.
pub fn write_header<W: Write>(writer: &mut W, header: &str) -> Result<(), TopstopError> {
    if !header.trim().is_empty() {
        writeln!(writer, "{header}")?;
    }
    Ok(())
}
