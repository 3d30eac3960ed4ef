use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Zero-based index of a dinucleotide window in the scanned body.
pub type Position = u64;

/// Two case-normalized sequence units forming one window.
pub type Dinucleotide = [u8; 2];

/// Per-position bond between the two strand readings.
///
/// A bond combines a strand marker (`I` or `O`) with a coaxial variant telling
/// which lanes the circuit can continue on.
///
/// # Examples
///
/// ```rust
/// use topstop_core::types::Bond;
///
/// let bond: Bond = "I^".parse()?;
/// assert!(bond.is_orthogonal());
/// assert!(bond.has_top_coaxial());
/// assert!(!bond.has_bottom_coaxial());
/// assert_eq!(bond.as_str(), "I^");
/// # Ok::<(), topstop_core::types::TopstopError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bond {
    /// `I^`
    ITop,
    /// `I=`
    IBoth,
    /// `Iv`
    IBottom,
    /// `I:`
    INone,
    /// `0^`
    OTop,
    /// `0=`
    OBoth,
    /// `0v`
    OBottom,
    /// `0:`
    ONone,
}

impl Bond {
    pub const ALL: [Self; 8] = [
        Self::ITop,
        Self::IBoth,
        Self::IBottom,
        Self::INone,
        Self::OTop,
        Self::OBoth,
        Self::OBottom,
        Self::ONone,
    ];

    /// True for the `I` readings, which can join two parallel circuits.
    #[must_use]
    pub const fn is_orthogonal(self) -> bool {
        matches!(self, Self::ITop | Self::IBoth | Self::IBottom | Self::INone)
    }

    #[must_use]
    pub const fn has_top_coaxial(self) -> bool {
        matches!(self, Self::ITop | Self::IBoth | Self::OTop | Self::OBoth)
    }

    #[must_use]
    pub const fn has_bottom_coaxial(self) -> bool {
        matches!(self, Self::IBoth | Self::IBottom | Self::OBoth | Self::OBottom)
    }

    /// Two-character form written to the bonds stream.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ITop => "I^",
            Self::IBoth => "I=",
            Self::IBottom => "Iv",
            Self::INone => "I:",
            Self::OTop => "0^",
            Self::OBoth => "0=",
            Self::OBottom => "0v",
            Self::ONone => "0:",
        }
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bond {
    type Err = TopstopError;

    /// Parses a config bond descriptor: a strand marker (`I`, `|`, `O` or `0`,
    /// case-insensitive) followed by a coaxial marker (`^`, `v`, `=` or `:`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || TopstopError::UnknownBond(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(unknown());
        }

        let orthogonal = match bytes[0] {
            b'I' | b'i' | b'|' => true,
            b'O' | b'o' | b'0' => false,
            _ => return Err(unknown()),
        };

        let bond = match (orthogonal, bytes[1]) {
            (true, b'^') => Self::ITop,
            (true, b'=') => Self::IBoth,
            (true, b'v') => Self::IBottom,
            (true, b':') => Self::INone,
            (false, b'^') => Self::OTop,
            (false, b'=') => Self::OBoth,
            (false, b'v') => Self::OBottom,
            (false, b':') => Self::ONone,
            _ => return Err(unknown()),
        };
        Ok(bond)
    }
}

/// Lane a tracked circuit currently runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Top,
    Bottom,
    /// Two physical circuits merged into one slot.
    Both,
}

impl Lane {
    /// The other single lane. `Both` has no opposite and maps to itself.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Both => Self::Both,
        }
    }
}

/// Half-open interval `[start, end)` on the position axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segment {
    pub start: Position,
    pub end: Position,
}

impl Segment {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// Per-position topology of the merged circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopstopSymbol {
    /// Stop: no circuit.
    S,
    /// One strand, no crossing.
    I,
    /// Overlap: the tails lie on opposite strands.
    P,
    /// Overlay: one circuit contains the other.
    Y,
    /// Cross: two chains meet without contact.
    X,
}

impl TopstopSymbol {
    #[must_use]
    pub const fn as_char(self) -> char {
        self.as_byte() as char
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::S => b's',
            Self::I => b'i',
            Self::P => b'p',
            Self::Y => b'y',
            Self::X => b'x',
        }
    }

    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte.to_ascii_lowercase() {
            b's' => Some(Self::S),
            b'i' => Some(Self::I),
            b'p' => Some(Self::P),
            b'y' => Some(Self::Y),
            b'x' => Some(Self::X),
            _ => None,
        }
    }
}

impl fmt::Display for TopstopSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Errors produced while loading configuration or processing sequence files.
#[derive(Error, Debug)]
pub enum TopstopError {
    /// Config line is neither a dinucleotide entry nor `name=value`
    #[error("Config error at line {line}: \"{text}\" does not parse")]
    ConfigFormat { line: usize, text: String },
    /// Dinucleotide entry lacks its type code or bond descriptor
    #[error("Config error at line {line}: \"{text}\" is missing the {field}")]
    MissingField {
        line: usize,
        text: String,
        field: &'static str,
    },
    /// Bond descriptor is not one of the eight recognized combinations
    #[error("Could not understand bond {0}")]
    UnknownBond(String),
    /// Bond descriptor failure with its config location
    #[error("Config error at line {line}: {source}")]
    ConfigBond {
        line: usize,
        #[source]
        source: Box<TopstopError>,
    },
    /// Config file could not be read
    #[error("Could not read config file {path}: {source}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Scalar parameter present but not usable
    #[error("Invalid value \"{value}\" for parameter {name}")]
    InvalidParameter { name: String, value: String },
    /// Histogram row that does not hold a length and a count
    #[error("Could not parse line \"{text}\" in file {path}: {reason}")]
    MalformedHistogramRow {
        path: PathBuf,
        text: String,
        reason: String,
    },
    /// Failure while processing one input file
    #[error("Error processing file {path}: {source}")]
    FileProcessing {
        path: PathBuf,
        #[source]
        source: Box<TopstopError>,
    },
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TopstopError {
    /// Wraps an error with the input file it occurred in.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::FileProcessing {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// True for errors that must abort a run before any file is processed.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigFormat { .. }
                | Self::MissingField { .. }
                | Self::UnknownBond(_)
                | Self::ConfigBond { .. }
                | Self::ConfigUnreadable { .. }
        )
    }
}
