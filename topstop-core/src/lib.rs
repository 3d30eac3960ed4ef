//! # TOPSTOP - Circuit Topology Annotation
//!
//! Converts nucleotide sequence files into per-position structural
//! annotations, driven by a configurable table that maps every dinucleotide
//! to a bond.
//!
//! ## Overview
//!
//! A sequence is read as overlapping two-unit windows. Each window is
//! classified into one of eight [`Bond`](types::Bond)s, and the bond stream
//! drives an automaton that tracks up to two concurrent *circuits*: spans in
//! which a strand path continues through the bonded sequence. The finished
//! circuits are then merged into one topology symbol per position:
//!
//! - **s**: stop, no circuit
//! - **i**: a single circuit
//! - **p**: two circuits overlapping
//! - **y**: two circuits, one laid over the other
//! - **x**: one circuit ends where the other starts
//!
//! ## Features
//!
//! - **Streaming**: inputs of any size are scanned in fixed-size chunks
//! - **Rule tables**: circuit transitions and cross checks are explicit,
//!   ordered tables
//! - **Parallel Processing**: files can be spread over a Rayon thread pool
//! - **Run summary**: segment-length histograms aggregated per folder
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use topstop_core::{TopstopPipeline, config::TopstopConfig};
//!
//! // The folder holds `_topstop_code.cfg` and the `.fa` / `.fasta` inputs
//! let pipeline = TopstopPipeline::new(TopstopConfig::for_folder("sequences"));
//! let report = pipeline.run()?;
//!
//! for file in &report.files {
//!     println!("{}: {} positions", file.input.display(), file.positions);
//! }
//! # Ok::<(), topstop_core::types::TopstopError>(())
//! ```
//!
//! ## Working in memory
//!
//! The pieces compose without touching the file system:
//!
//! ```rust
//! use topstop_core::circuit::CircuitTracker;
//! use topstop_core::code_table::CodeTable;
//! use topstop_core::sequence::{BondClassifier, SequenceScanner};
//! use topstop_core::topology::resolve_symbols;
//!
//! let table = CodeTable::parse("at a I^\nta a I^\n".as_bytes())?;
//! let classifier = BondClassifier::new(&table);
//! let mut tracker = CircuitTracker::new();
//!
//! let mut scanner = SequenceScanner::new(&b">demo\nATATAT"[..])?;
//! while let Some(window) = scanner.next_window()? {
//!     tracker.process(classifier.classify(window.units).bond(), window.position);
//! }
//! let positions = scanner.positions();
//! let lists = tracker.finish(positions);
//!
//! let symbols: String = resolve_symbols(&lists.first, &lists.second, positions)
//!     .into_iter()
//!     .map(|s| s.as_char())
//!     .collect();
//! assert_eq!(symbols, "iiiii");
//! # Ok::<(), topstop_core::types::TopstopError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Run options
//! - [`code_table`]: Dinucleotide table parsed from the config file
//! - [`engine`]: Folder-level pipeline
//! - [`types`]: Core data types and the error type
//! - [`results`]: Per-file and per-run reports
//! - [`sequence`]: Sliding-window scanning and classification
//! - [`circuit`]: The circuit-tracking automaton
//! - [`topology`]: Resolution of segment lists into topstop symbols
//! - [`histogram`]: Segment-length histograms and the run summary
//! - [`chains`]: Translation of topstop streams into chains
//! - [`output`]: Output file naming and writers
//! - [`progress`]: Progress observer hooks
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, TopstopError>`](types::TopstopError),
//! distinguishing:
//!
//! - Config errors, which abort a run before any file is processed
//! - I/O errors while processing one file, which are recorded and skipped
//! - Malformed histogram rows, which are only logged

pub mod chains;
pub mod circuit;
pub mod code_table;
pub mod config;
pub mod constants;
pub mod engine;
pub mod histogram;
pub mod output;
pub mod progress;
pub mod results;
pub mod sequence;
pub mod topology;
pub mod types;

pub use engine::TopstopPipeline;
