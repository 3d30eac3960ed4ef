//! Topology resolution: two segment lists in, one symbol per position out.
//!
//! The resolver walks the position axis once, keeping a cursor into each
//! list. At every position the [`cross`] checks run first; only when none of
//! them fires is the position classified by how many current segments cover
//! it:
//!
//! | covered by          | symbol |
//! |---------------------|--------|
//! | no segment          | `s`    |
//! | one segment         | `i`    |
//! | two, one contains   | `y`    |
//! | two, overlapping    | `p`    |
//! | cross               | `x`    |
//!
//! Output is produced as [`Run`]s of equal symbols so long stretches can be
//! written without materializing them.
//!
//! ## Examples
//!
//! ```rust
//! use topstop_core::topology::resolve_symbols;
//! use topstop_core::types::Segment;
//!
//! let first = [Segment::new(0, 6)];
//! let second = [Segment::new(2, 4)];
//! let text: String = resolve_symbols(&first, &second, 8)
//!     .into_iter()
//!     .map(|s| s.as_char())
//!     .collect();
//! assert_eq!(text, "iiyyiiss");
//! ```

pub mod cross;

use crate::types::{Position, Segment, TopstopSymbol};

use cross::{detect_cross, Cursors};

/// A stretch of `len` consecutive positions sharing one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub symbol: TopstopSymbol,
    pub len: u64,
}

/// Iterator over the symbol runs of positions `[0, len)`.
#[derive(Debug, Clone)]
pub struct TopologyResolver<'a> {
    cursors: Cursors<'a>,
    len: Position,
    pos: Position,
}

impl<'a> TopologyResolver<'a> {
    #[must_use]
    pub const fn new(first: &'a [Segment], second: &'a [Segment], len: Position) -> Self {
        Self {
            cursors: Cursors::new(first, second),
            len,
            pos: 0,
        }
    }

    /// Number of positions already resolved.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    #[must_use]
    pub const fn len(&self) -> Position {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolves the current position and returns its symbol together with
    /// how many positions it covers (more than one only for the trailing
    /// stretch after both lists are exhausted).
    fn step(&mut self) -> (TopstopSymbol, u64) {
        let pos = self.pos;
        let c = &mut self.cursors;

        if detect_cross(c, pos) {
            return (TopstopSymbol::X, 1);
        }

        let symbol = match (c.current(0), c.current(1)) {
            (None, None) => return (TopstopSymbol::S, self.len - pos),
            (Some(only), None) | (None, Some(only)) => {
                let list = usize::from(c.current(0).is_none());
                if only.contains(pos) {
                    TopstopSymbol::I
                } else {
                    if only.end == pos {
                        c.advance(list);
                    }
                    TopstopSymbol::S
                }
            }
            (Some(first), Some(second)) => {
                let symbol = match (first.contains(pos), second.contains(pos)) {
                    (true, true) if encloses(first, second) || encloses(second, first) => {
                        TopstopSymbol::Y
                    }
                    (true, true) => TopstopSymbol::P,
                    (true, false) | (false, true) => TopstopSymbol::I,
                    (false, false) => TopstopSymbol::S,
                };
                if first.end == pos {
                    c.advance(0);
                }
                if second.end == pos {
                    c.advance(1);
                }
                symbol
            }
        };
        (symbol, 1)
    }
}

/// `outer` contains `inner`, shared boundaries included.
const fn encloses(outer: Segment, inner: Segment) -> bool {
    outer.start <= inner.start && outer.end >= inner.end
}

impl Iterator for TopologyResolver<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        if self.pos >= self.len {
            return None;
        }

        let (symbol, count) = self.step();
        self.pos += count;
        let mut run = Run { symbol, len: count };

        while self.pos < self.len {
            let saved = (self.cursors.clone(), self.pos);
            let (next, count) = self.step();
            if next != symbol {
                (self.cursors, self.pos) = saved;
                break;
            }
            self.pos += count;
            run.len += count;
        }
        Some(run)
    }
}

/// Expands the runs of a resolver into one symbol per position.
#[must_use]
pub fn resolve_symbols(first: &[Segment], second: &[Segment], len: Position) -> Vec<TopstopSymbol> {
    let mut symbols = Vec::new();
    for run in TopologyResolver::new(first, second, len) {
        symbols.extend(std::iter::repeat(run.symbol).take(run.len as usize));
    }
    symbols
}
