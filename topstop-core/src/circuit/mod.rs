//! Circuit tracking over the bond stream.
//!
//! Up to two circuits can be open at once. Each lives in a [`CircuitSlot`]
//! that remembers its lane and where it started; when a circuit ends, the
//! slot appends a half-open [`Segment`] to its own list. The lists are
//! position-ordered and non-overlapping because a slot only ever closes the
//! circuit it has open, at a position later than its start.
//!
//! How a bond changes the slots is decided by the priority-ordered
//! [`rules::RULES`] table.
//!
//! ## Examples
//!
//! ```rust
//! use topstop_core::circuit::CircuitTracker;
//! use topstop_core::types::{Bond, Segment};
//!
//! let mut tracker = CircuitTracker::new();
//! for (pos, bond) in [Bond::OTop, Bond::OTop, Bond::ONone, Bond::IBoth].into_iter().enumerate() {
//!     tracker.process(Some(bond), pos as u64);
//! }
//! let lists = tracker.finish(5);
//! assert_eq!(lists.first, vec![Segment::new(0, 2), Segment::new(3, 5)]);
//! assert!(lists.second.is_empty());
//! ```

pub mod rules;

use crate::types::{Bond, Lane, Position, Segment};

use rules::{Flow, RULES};

/// A circuit that has been opened and not yet finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenCircuit {
    pub lane: Lane,
    pub start: Position,
}

/// One of the two tracked cursors together with its finished segments.
#[derive(Debug, Clone, Default)]
pub struct CircuitSlot {
    circuit: Option<OpenCircuit>,
    segments: Vec<Segment>,
}

impl CircuitSlot {
    /// Current lane, `None` when the slot is idle.
    #[must_use]
    pub fn lane(&self) -> Option<Lane> {
        self.circuit.map(|c| c.lane)
    }

    /// Start of the pending segment, `None` when the slot is idle.
    #[must_use]
    pub fn start(&self) -> Option<Position> {
        self.circuit.map(|c| c.start)
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.circuit.is_none()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn open(&mut self, lane: Lane, pos: Position) {
        self.circuit = Some(OpenCircuit { lane, start: pos });
    }

    /// Changes the lane of the open circuit, keeping its start.
    fn set_lane(&mut self, lane: Lane) {
        if let Some(circuit) = self.circuit.as_mut() {
            circuit.lane = lane;
        }
    }

    /// Drops the open circuit without recording a segment.
    fn discard(&mut self) {
        self.circuit = None;
    }

    /// Closes the open circuit at `pos`. No-op when idle.
    fn finalize(&mut self, pos: Position) {
        if let Some(circuit) = self.circuit.take() {
            self.segments.push(Segment::new(circuit.start, pos));
        }
    }
}

/// Finalized segments of both slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentLists {
    pub first: Vec<Segment>,
    pub second: Vec<Segment>,
}

impl SegmentLists {
    /// All segments, first list then second.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.first.iter().chain(self.second.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of segment lengths over both lists.
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.iter().map(Segment::len).sum()
    }
}

/// The circuit-tracking automaton.
///
/// Feed one bond per scanned position, in increasing position order, then
/// call [`finish`](Self::finish) with the number of positions.
#[derive(Debug, Clone, Default)]
pub struct CircuitTracker {
    slots: [CircuitSlot; 2],
    last_position: Option<Position>,
}

impl CircuitTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the bond at `pos`. `None` marks an unmapped window, which
    /// closes both circuits.
    pub fn process(&mut self, bond: Option<Bond>, pos: Position) {
        debug_assert!(
            self.last_position.map_or(true, |last| last < pos),
            "positions must increase"
        );
        self.last_position = Some(pos);

        let Some(bond) = bond else {
            self.finalize_all(pos);
            return;
        };

        for (_, rule) in RULES {
            if rule(&mut self.slots, bond, pos) == Flow::Stop {
                break;
            }
        }
    }

    /// Closes every open circuit at `pos`.
    pub fn finalize_all(&mut self, pos: Position) {
        for slot in &mut self.slots {
            slot.finalize(pos);
        }
    }

    /// Slot 0 or 1.
    #[must_use]
    pub fn slot(&self, index: usize) -> &CircuitSlot {
        &self.slots[index]
    }

    /// Flushes both slots at `end` and hands back their segment lists.
    #[must_use]
    pub fn finish(mut self, end: Position) -> SegmentLists {
        self.finalize_all(end);
        let [first, second] = self.slots;
        SegmentLists {
            first: first.segments,
            second: second.segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(bonds: &[Option<Bond>]) -> CircuitTracker {
        let mut tracker = CircuitTracker::new();
        for (pos, bond) in bonds.iter().enumerate() {
            tracker.process(*bond, pos as Position);
        }
        tracker
    }

    fn assert_ordered(segments: &[Segment]) {
        for segment in segments {
            assert!(segment.start <= segment.end, "{segment:?}");
        }
        for pair in segments.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{pair:?}");
        }
    }

    #[test]
    fn test_single_top_circuit_flushes_at_end() {
        let tracker = track(&[Some(Bond::ITop); 6]);
        assert_eq!(tracker.slot(0).lane(), Some(Lane::Top));
        assert_eq!(tracker.slot(0).start(), Some(0));
        assert!(tracker.slot(0).segments().is_empty());

        let lists = tracker.finish(6);
        assert_eq!(lists.first, vec![Segment::new(0, 6)]);
        assert!(lists.second.is_empty());
    }

    #[test]
    fn test_parallel_circuits_merge_into_earlier() {
        let mut tracker = track(&[
            Some(Bond::OTop),
            Some(Bond::OTop),
            Some(Bond::OBoth),
            Some(Bond::OBoth),
            Some(Bond::OBoth),
        ]);
        assert_eq!(tracker.slot(0).lane(), Some(Lane::Top));
        assert_eq!(tracker.slot(0).start(), Some(0));
        assert_eq!(tracker.slot(1).lane(), Some(Lane::Bottom));
        assert_eq!(tracker.slot(1).start(), Some(2));

        tracker.process(Some(Bond::IBoth), 5);
        assert_eq!(tracker.slot(0).lane(), Some(Lane::Both));
        assert_eq!(tracker.slot(0).start(), Some(0));
        assert!(tracker.slot(1).is_idle());
        assert!(tracker.slot(0).segments().is_empty());
        assert!(tracker.slot(1).segments().is_empty());

        let lists = tracker.finish(8);
        assert_eq!(lists.first, vec![Segment::new(0, 8)]);
        assert!(lists.second.is_empty());
    }

    #[test]
    fn test_later_slot_wins_when_it_started_first() {
        // slot 1 holds the earlier start, so it survives the merge
        let mut tracker = CircuitTracker::new();
        tracker.process(Some(Bond::OBottom), 0);
        tracker.process(Some(Bond::OTop), 1);
        assert!(tracker.slot(0).is_idle());
        assert_eq!(tracker.slot(1).lane(), Some(Lane::Top));
        assert_eq!(tracker.slot(1).start(), Some(1));

        tracker.process(Some(Bond::OBoth), 2);
        assert_eq!(tracker.slot(0).lane(), Some(Lane::Bottom));
        assert_eq!(tracker.slot(0).start(), Some(2));

        tracker.process(Some(Bond::IBoth), 3);
        assert!(tracker.slot(0).is_idle());
        assert_eq!(tracker.slot(1).lane(), Some(Lane::Both));
        assert_eq!(tracker.slot(1).start(), Some(1));

        let lists = tracker.finish(4);
        assert_eq!(lists.first, vec![Segment::new(0, 1)]);
        assert_eq!(lists.second, vec![Segment::new(1, 4)]);
    }

    #[test]
    fn test_unknown_window_breaks_both_slots() {
        let mut tracker = track(&[Some(Bond::OBoth), Some(Bond::OBoth), Some(Bond::OBoth)]);
        tracker.process(None, 3);
        assert!(tracker.slot(0).is_idle());
        assert!(tracker.slot(1).is_idle());

        tracker.process(Some(Bond::OTop), 4);
        let lists = tracker.finish(6);
        assert_eq!(lists.first, vec![Segment::new(0, 3), Segment::new(4, 6)]);
        assert_eq!(lists.second, vec![Segment::new(0, 3)]);
    }

    #[test]
    fn test_finalize_is_noop_when_idle() {
        let mut tracker = CircuitTracker::new();
        tracker.process(None, 0);
        tracker.process(Some(Bond::ONone), 1);
        assert!(tracker.finish(2).is_empty());
    }

    #[test]
    fn test_segment_lists_summaries() {
        let lists = SegmentLists {
            first: vec![Segment::new(0, 3), Segment::new(5, 6)],
            second: vec![Segment::new(1, 5)],
        };
        assert_eq!(lists.len(), 3);
        assert_eq!(lists.total_length(), 8);
        assert_eq!(lists.iter().count(), 3);
    }

    #[test]
    fn test_lists_stay_ordered_for_every_bond_stream() {
        let choices: Vec<Option<Bond>> = Bond::ALL
            .iter()
            .copied()
            .map(Some)
            .chain(std::iter::once(None))
            .collect();

        // xorshift keeps the stream deterministic without a rand dependency
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        for _ in 0..200 {
            let mut tracker = CircuitTracker::new();
            let len = 1 + (state % 300) as Position;
            for pos in 0..len {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                tracker.process(choices[(state % choices.len() as u64) as usize], pos);
            }
            let lists = tracker.finish(len);
            assert_ordered(&lists.first);
            assert_ordered(&lists.second);
            assert!(lists.iter().all(|s| s.end <= len));
        }
    }
}
