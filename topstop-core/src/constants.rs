// =============================================================================
// Input
// =============================================================================

/// Version string for topstop
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file looked up in the input folder when no other name is given
pub const DEFAULT_CONFIG_FILENAME: &str = "_topstop_code.cfg";

/// Sequence file extensions picked up from the input folder (case-insensitive)
pub const SEQUENCE_EXTENSIONS: [&str; 2] = ["fa", "fasta"];

/// First byte of a header line in sequence files
pub const HEADER_MARKER: u8 = b'>';

/// Lines starting with this character are skipped in config and histogram files
pub const COMMENT_MARKER: char = '>';

/// Chunk size used by the sliding-window scanner
pub const SCAN_CHUNK_LEN: usize = 4000;

/// Chunk size used when translating a topstop file into chains
pub const CHAIN_CHUNK_LEN: usize = 8192;

// =============================================================================
// Config parameters
// =============================================================================

/// Minimum segment length counted by the run summary
pub const PARAM_LENGTH_LOW_CUTOFF: &str = "length_low_cutoff";

// =============================================================================
// Output
// =============================================================================

/// Output directory created inside the input folder
pub const OUTPUT_DIR_NAME: &str = "OUTPUT";

/// Bonds written for a window with no config entry
pub const UNKNOWN_BOND_FILLER: &str = ".x";

/// Type code written for a window with no config entry
pub const UNKNOWN_TYPE_FILLER: u8 = b'-';

pub const BONDS_SUFFIX: &str = "_BONDS.fa";
pub const BTYPE_SUFFIX: &str = "_BTYPE.fa";
pub const TOPSTOP_SUFFIX: &str = "_TOPSTOP.fa";
pub const CHAINS_SUFFIX: &str = "_CHAINS.fa";
pub const HISTOGRAM_SUFFIX: &str = "_ELENHIS.tab";
pub const SUMMARY_SUFFIX: &str = "_ELENSUM.tab";

/// Prefix shared by every generated file name
pub const OUTPUT_PREFIX: &str = "z_";

/// Stem suffix identifying histogram files during aggregation
pub const HISTOGRAM_STEM_SUFFIX: &str = "_ELENHIS";

pub const HISTOGRAM_HEADER: &str = "> ELEN; count";

// =============================================================================
// Progress
// =============================================================================

/// Share of per-file progress spent on the first pass over the input
pub const SCAN_PROGRESS_SHARE: f64 = 80.0;

/// Progress reached once the histogram file is written
pub const HISTOGRAM_PROGRESS_DONE: f64 = 83.0;

/// Number of progress reports spread over topology resolution
pub const TOPOLOGY_PROGRESS_STEPS: f64 = 170.0;

/// Windows between two progress reports during the first pass
pub const SCAN_REPORT_INTERVAL: u64 = 1 << 16;
