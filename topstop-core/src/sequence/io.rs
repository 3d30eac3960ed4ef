use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::constants::SEQUENCE_EXTENSIONS;
use crate::sequence::SequenceScanner;
use crate::types::TopstopError;

/// True when `path` carries one of the recognized sequence extensions.
#[must_use]
pub fn is_sequence_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SEQUENCE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Lists the sequence files directly inside `folder`, sorted by file name.
pub fn list_sequence_files(folder: &Path) -> Result<Vec<PathBuf>, TopstopError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_sequence_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Opens a sequence file for scanning.
pub fn open_sequence_file(path: &Path) -> Result<SequenceScanner<File>, TopstopError> {
    let file = File::open(path)?;
    Ok(SequenceScanner::new(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_sequence_file_extensions() {
        assert!(is_sequence_file(Path::new("a.fa")));
        assert!(is_sequence_file(Path::new("dir/b.FASTA")));
        assert!(!is_sequence_file(Path::new("c.fas")));
        assert!(!is_sequence_file(Path::new("z_c_BONDS.tab")));
        assert!(!is_sequence_file(Path::new("fasta")));
    }

    #[test]
    fn test_list_sequence_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["b.fa", "a.FASTA", "notes.txt", "_topstop_code.cfg"] {
            fs::write(dir.path().join(name), "acgt").unwrap();
        }
        fs::create_dir(dir.path().join("nested.fa")).unwrap();

        let files = list_sequence_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.FASTA", "b.fa"]);
    }

    #[test]
    fn test_list_sequence_files_missing_folder() {
        let result = list_sequence_files(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(TopstopError::IoError(_))));
    }

    #[test]
    fn test_open_sequence_file_reads_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seq.fa");
        fs::write(&path, ">s1\nacgt\n").unwrap();

        let mut scanner = open_sequence_file(&path).unwrap();
        assert_eq!(scanner.header(), ">s1");
        assert_eq!(scanner.by_ref().count(), 3);
    }
}
