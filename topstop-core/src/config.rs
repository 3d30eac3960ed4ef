use std::path::PathBuf;

use crate::constants::{DEFAULT_CONFIG_FILENAME, OUTPUT_DIR_NAME};

/// Configuration settings for a topstop run.
///
/// Controls where input is read from, where output lands and how many files
/// are processed at once. The dinucleotide table itself lives in the config
/// file named by [`config_filename`](Self::config_filename) and is loaded
/// into a [`CodeTable`](crate::code_table::CodeTable) at the start of a run.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use topstop_core::config::TopstopConfig;
///
/// let config = TopstopConfig::default();
/// assert_eq!(config.output_dir_name, "OUTPUT");
/// ```
///
/// ## Process a specific folder with four threads
///
/// ```rust
/// use topstop_core::config::TopstopConfig;
///
/// let config = TopstopConfig {
///     input_folder: "/data/run42".into(),
///     num_threads: Some(4),
///     ..Default::default()
/// };
/// assert_eq!(config.output_dir(), std::path::Path::new("/data/run42/OUTPUT"));
/// ```
#[derive(Debug, Clone)]
pub struct TopstopConfig {
    /// Folder holding the config file and the sequence files.
    ///
    /// **Default**: the current directory
    pub input_folder: PathBuf,

    /// Name of the config file, resolved against `input_folder` when relative.
    ///
    /// **Default**: `_topstop_code.cfg`
    pub config_filename: PathBuf,

    /// Name of the output directory created inside `input_folder`.
    ///
    /// **Default**: `OUTPUT`
    pub output_dir_name: String,

    /// Number of files processed concurrently.
    ///
    /// `None` or `Some(1)` processes files one at a time in name order.
    /// Larger values spread files over a Rayon thread pool.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,

    /// Run without calling the progress observer.
    ///
    /// **Default**: `false`
    pub quiet: bool,
}

impl TopstopConfig {
    /// Creates a configuration rooted at `folder` with default settings.
    pub fn for_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            input_folder: folder.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.input_folder.join(&self.config_filename)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.input_folder.join(&self.output_dir_name)
    }

    /// True when files should be spread over a thread pool.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.num_threads.is_some_and(|n| n > 1)
    }
}

impl Default for TopstopConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("."),
            config_filename: PathBuf::from(DEFAULT_CONFIG_FILENAME),
            output_dir_name: OUTPUT_DIR_NAME.to_string(),
            num_threads: None,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_paths() {
        let config = TopstopConfig::for_folder("/tmp/run");
        assert_eq!(config.config_path(), Path::new("/tmp/run/_topstop_code.cfg"));
        assert_eq!(config.output_dir(), Path::new("/tmp/run/OUTPUT"));
        assert!(!config.is_parallel());
    }

    #[test]
    fn test_absolute_config_filename_wins() {
        let config = TopstopConfig {
            input_folder: "/tmp/run".into(),
            config_filename: "/etc/codes.cfg".into(),
            ..Default::default()
        };
        assert_eq!(config.config_path(), Path::new("/etc/codes.cfg"));
    }

    #[test]
    fn test_parallel_threshold() {
        let mut config = TopstopConfig {
            num_threads: Some(1),
            ..Default::default()
        };
        assert!(!config.is_parallel());
        config.num_threads = Some(3);
        assert!(config.is_parallel());
    }
}
