//! Sequence reading and dinucleotide classification.
//!
//! ## Overview
//!
//! A sequence file is an optional `>` header followed by a body of units of
//! arbitrary length. The body is read as overlapping two-unit windows:
//!
//! ```text
//! body:      A  C  G  T
//! windows:   ac cg gt
//! positions: 0  1  2
//! ```
//!
//! Control bytes (line breaks, tabs, ...) never take a position, so windows
//! span line breaks.
//!
//! ## Modules
//!
//! - [`scanner`]: chunked sliding-window reader over any [`std::io::Read`]
//! - [`ring`]: the two-unit ring buffer behind the scanner
//! - [`classifier`]: window to bond lookup against a [`CodeTable`](crate::code_table::CodeTable)
//! - [`io`]: sequence file discovery and opening
//!
//! ## Examples
//!
//! ```rust
//! use topstop_core::code_table::CodeTable;
//! use topstop_core::sequence::{BondClassifier, SequenceScanner};
//!
//! let table = CodeTable::parse("ac a I^\ncg b 0=\n".as_bytes())?;
//! let classifier = BondClassifier::new(&table);
//!
//! let mut bonds = String::new();
//! for window in SequenceScanner::new(&b"ACGT"[..])? {
//!     bonds.push_str(classifier.classify(window?.units).bond_text());
//! }
//! assert_eq!(bonds, "I^0=.x");
//! # Ok::<(), topstop_core::types::TopstopError>(())
//! ```

pub mod classifier;
pub mod io;
pub mod ring;
pub mod scanner;

pub use classifier::{BondClassifier, Classification};
pub use io::*;
pub use scanner::{SequenceScanner, Window};
