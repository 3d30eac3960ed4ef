use crate::code_table::{BondCode, CodeTable};
use crate::constants::{UNKNOWN_BOND_FILLER, UNKNOWN_TYPE_FILLER};
use crate::types::{Bond, Dinucleotide};

/// Result of looking up one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Mapped(BondCode),
    /// The window has no config entry; acts as a hard break.
    Unknown,
}

impl Classification {
    #[must_use]
    pub const fn bond(self) -> Option<Bond> {
        match self {
            Self::Mapped(code) => Some(code.bond),
            Self::Unknown => None,
        }
    }

    /// Two characters for the bonds stream.
    #[must_use]
    pub const fn bond_text(self) -> &'static str {
        match self {
            Self::Mapped(code) => code.bond.as_str(),
            Self::Unknown => UNKNOWN_BOND_FILLER,
        }
    }

    /// One character for the type stream.
    #[must_use]
    pub const fn type_byte(self) -> u8 {
        match self {
            Self::Mapped(code) => code.type_code,
            Self::Unknown => UNKNOWN_TYPE_FILLER,
        }
    }
}

/// Pure lookup from a window to its bond classification.
#[derive(Debug, Clone, Copy)]
pub struct BondClassifier<'a> {
    table: &'a CodeTable,
}

impl<'a> BondClassifier<'a> {
    #[must_use]
    pub const fn new(table: &'a CodeTable) -> Self {
        Self { table }
    }

    /// Classifies a lowercased window.
    #[must_use]
    pub fn classify(&self, units: Dinucleotide) -> Classification {
        self.table
            .get(units)
            .map_or(Classification::Unknown, Classification::Mapped)
    }
}
