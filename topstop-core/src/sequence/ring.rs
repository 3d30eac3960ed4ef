use crate::types::Dinucleotide;

/// Two-slot ring buffer holding the most recent sequence units.
///
/// Each push after the first completes a window made of the previous unit
/// and the new one, so consecutive windows overlap by one unit.
#[derive(Debug, Clone, Default)]
pub struct UnitRing {
    slots: [u8; 2],
    head: usize,
    len: usize,
}

impl UnitRing {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [0; 2],
            head: 0,
            len: 0,
        }
    }

    /// Stores `unit`, returning the completed window once two units are held.
    pub fn push(&mut self, unit: u8) -> Option<Dinucleotide> {
        let current = self.head;
        self.slots[current] = unit;
        self.head ^= 1;
        self.len = (self.len + 1).min(2);
        (self.len == 2).then(|| [self.slots[current ^ 1], unit])
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}
