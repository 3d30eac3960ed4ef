#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use sha2::{Digest, Sha256};
use tempfile::TempDir;

/// Code table shared by the CLI tests.
pub const CODES: &str = "\
> dinucleotide  type  bond
aa A 0=
tt T 0=
at W I^
ta W Iv
ac M 0^
ca M 0v
gt K 0^
tg K 0v
gg G I=
cc C I:
gc S 0:
cg S I=
ag R 0^
ga R 0v
length_low_cutoff=3
";

pub const SAMPLE_FA: &str = ">sample chr1\nCCACAACTGG\natccagtgaa\n";
pub const OTHER_FASTA: &str = ">other\r\n>second line\r\nGATTACA\r\n";

/// A temporary `run/` folder holding the code table and the two fixtures.
pub struct Workspace {
    _root: TempDir,
    pub folder: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_files(&[
            ("_topstop_code.cfg", CODES),
            ("sample.fa", SAMPLE_FA),
            ("other.fasta", OTHER_FASTA),
        ])
    }

    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let root = TempDir::new().unwrap();
        let folder = root.path().join("run");
        fs::create_dir(&folder).unwrap();
        for (name, content) in files {
            fs::write(folder.join(name), content).unwrap();
        }
        Self {
            _root: root,
            folder,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.folder.join("OUTPUT")
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output_dir().join(name))
            .unwrap_or_else(|e| panic!("cannot read {name}: {e}"))
    }

    pub fn log(&self) -> String {
        fs::read_to_string(self.folder.join("Log").join("topstop.log")).unwrap_or_default()
    }
}

/// Runs the topstop binary over `folder` with `--quiet` plus `args`.
pub fn topstop(folder: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("topstop").unwrap();
    cmd.arg("--folder").arg(folder).arg("--quiet").args(args);
    cmd
}

/// SHA-256 of every file in `dir`, keyed by file name.
pub fn digests(dir: &Path) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let bytes = fs::read(entry.path()).unwrap();
        let digest = Sha256::digest(&bytes);
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        out.insert(entry.file_name().to_string_lossy().into_owned(), hex);
    }
    out
}
