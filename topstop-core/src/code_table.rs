//! Dinucleotide code table loaded from the run's config file.
//!
//! Each config line is one of:
//!
//! - `dinucleotide TYPECODE BONDDESC`: maps a unit pair to a type code and a
//!   [`Bond`], e.g. `at A I^`
//! - `name=value`: a scalar parameter, e.g. `length_low_cutoff=12`
//! - blank, or starting with `>`: ignored
//!
//! The first entry for a dinucleotide wins; later duplicates are logged and
//! skipped. Anything that does not parse is fatal for the run.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::constants::{COMMENT_MARKER, PARAM_LENGTH_LOW_CUTOFF};
use crate::types::{Bond, Dinucleotide, TopstopError};

/// Classification attached to a mapped dinucleotide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondCode {
    /// Lowercase type code written to the type stream.
    pub type_code: u8,
    pub bond: Bond,
}

/// Immutable dinucleotide table plus scalar parameters.
///
/// # Examples
///
/// ```rust
/// use topstop_core::code_table::CodeTable;
/// use topstop_core::types::Bond;
///
/// let table = CodeTable::parse("> codes\nat A I^\ngc b 0=\nlength_low_cutoff=4\n".as_bytes())?;
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(*b"at").unwrap().bond, Bond::ITop);
/// assert_eq!(table.length_low_cutoff()?, 4);
/// # Ok::<(), topstop_core::types::TopstopError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: HashMap<Dinucleotide, BondCode>,
    parameters: HashMap<String, String>,
}

impl CodeTable {
    /// Reads and parses the config file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, TopstopError> {
        let file = File::open(path).map_err(|source| TopstopError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(BufReader::new(file))
    }

    /// Parses config lines from any buffered reader.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, TopstopError> {
        let mut table = Self::default();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }
            table.parse_line(line_number, line)?;
        }

        Ok(table)
    }

    fn parse_line(&mut self, line_number: usize, line: &str) -> Result<(), TopstopError> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(());
        };

        let format_error = || TopstopError::ConfigFormat {
            line: line_number,
            text: line.to_string(),
        };

        if first.chars().count() != 2 {
            let Some((name, value)) = first.split_once('=').filter(|(_, v)| !v.contains('='))
            else {
                return Err(format_error());
            };
            self.parameters.insert(name.to_string(), value.to_string());
            return Ok(());
        }

        let dinucleotide = match first.as_bytes() {
            [a, b] if first.is_ascii() => [a.to_ascii_lowercase(), b.to_ascii_lowercase()],
            _ => return Err(format_error()),
        };
        if self.codes.contains_key(&dinucleotide) {
            warn!(
                line = line_number,
                dinucleotide = first,
                "Dinucleotide has already been configured; using the initial configuration"
            );
            return Ok(());
        }

        let missing = |field| TopstopError::MissingField {
            line: line_number,
            text: line.to_string(),
            field,
        };
        let type_code = words
            .next()
            .and_then(|word| word.chars().next())
            .ok_or_else(|| missing("type code"))?;
        if !type_code.is_ascii() {
            return Err(format_error());
        }
        let type_code = type_code.to_ascii_lowercase() as u8;
        let bond = words
            .next()
            .ok_or_else(|| missing("bond descriptor"))?
            .parse::<Bond>()
            .map_err(|source| TopstopError::ConfigBond {
                line: line_number,
                source: Box::new(source),
            })?;

        self.codes.insert(dinucleotide, BondCode { type_code, bond });
        Ok(())
    }

    /// Looks up a case-normalized window.
    #[must_use]
    pub fn get(&self, dinucleotide: Dinucleotide) -> Option<BondCode> {
        self.codes.get(&dinucleotide).copied()
    }

    /// Number of mapped dinucleotides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Minimum segment length counted by the run summary.
    ///
    /// Defaults to 0 when the parameter is absent.
    ///
    /// # Errors
    ///
    /// Returns [`TopstopError::InvalidParameter`] when the parameter is set but
    /// is not an integer.
    pub fn length_low_cutoff(&self) -> Result<i64, TopstopError> {
        match self.parameter(PARAM_LENGTH_LOW_CUTOFF) {
            None => Ok(0),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| TopstopError::InvalidParameter {
                    name: PARAM_LENGTH_LOW_CUTOFF.to_string(),
                    value: value.to_string(),
                }),
        }
    }
}
