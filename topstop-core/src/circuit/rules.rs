//! Priority-ordered transition rules of the circuit tracker.
//!
//! Every rule sees the bond and both slots. A rule returning [`Flow::Stop`]
//! ends evaluation for the current bond; [`Flow::Continue`] hands over to the
//! next rule in [`RULES`].

use super::CircuitSlot;
use crate::types::{Bond, Lane, Position};

/// Whether evaluation moves on to the next rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub type Rule = fn(&mut [CircuitSlot; 2], Bond, Position) -> Flow;

/// Rules in evaluation order.
pub const RULES: [(&str, Rule); 4] = [
    ("merge", merge_parallel),
    ("hard-break", hard_break),
    ("single-direction", single_direction),
    ("double-direction", double_direction),
];

/// Joins a top and a bottom circuit on an orthogonal bond.
///
/// The circuit with the earlier start becomes `Both` (slot 0 on ties); the
/// other one is dropped without a segment. Always continues, so the bond is
/// still applied to the merged circuit.
pub fn merge_parallel(slots: &mut [CircuitSlot; 2], bond: Bond, _pos: Position) -> Flow {
    if !bond.is_orthogonal() {
        return Flow::Continue;
    }

    let parallel = matches!(
        (slots[0].lane(), slots[1].lane()),
        (Some(Lane::Top), Some(Lane::Bottom)) | (Some(Lane::Bottom), Some(Lane::Top))
    );
    if parallel {
        let (keep, drop) = if slots[0].start() <= slots[1].start() {
            (0, 1)
        } else {
            (1, 0)
        };
        slots[keep].set_lane(Lane::Both);
        slots[drop].discard();
    }
    Flow::Continue
}

/// Closes both circuits when the bond continues neither lane.
pub fn hard_break(slots: &mut [CircuitSlot; 2], bond: Bond, pos: Position) -> Flow {
    if bond.has_top_coaxial() || bond.has_bottom_coaxial() {
        return Flow::Continue;
    }
    for slot in slots.iter_mut() {
        slot.finalize(pos);
    }
    Flow::Stop
}

/// Routes a bond that continues exactly one lane.
pub fn single_direction(slots: &mut [CircuitSlot; 2], bond: Bond, pos: Position) -> Flow {
    let lane = match (bond.has_top_coaxial(), bond.has_bottom_coaxial()) {
        (true, false) => Lane::Top,
        (false, true) => Lane::Bottom,
        _ => return Flow::Continue,
    };

    if slots.iter().all(CircuitSlot::is_idle) {
        slots[0].open(lane, pos);
        return Flow::Stop;
    }

    if let Some(slot) = slots.iter_mut().find(|s| s.lane() == Some(Lane::Both)) {
        slot.set_lane(lane);
        return Flow::Stop;
    }

    for index in 0..2 {
        if slots[index].lane() != Some(lane.opposite()) {
            continue;
        }
        if bond.is_orthogonal() {
            slots[index].set_lane(lane);
            return Flow::Stop;
        }
        slots[index].finalize(pos);
        let other = 1 - index;
        if slots[other].is_idle() {
            slots[other].open(lane, pos);
            return Flow::Stop;
        }
    }

    // a circuit already running on `lane` just continues
    Flow::Stop
}

/// Routes a bond that continues both lanes.
pub fn double_direction(slots: &mut [CircuitSlot; 2], bond: Bond, pos: Position) -> Flow {
    if !(bond.has_top_coaxial() && bond.has_bottom_coaxial()) {
        return Flow::Continue;
    }

    if slots.iter().any(|s| s.lane() == Some(Lane::Both)) {
        return Flow::Stop;
    }

    let orthogonal = bond.is_orthogonal();
    match (slots[0].lane(), slots[1].lane()) {
        (None, None) => {
            if orthogonal {
                slots[0].open(Lane::Both, pos);
            } else {
                slots[0].open(Lane::Top, pos);
                slots[1].open(Lane::Bottom, pos);
            }
        }
        (Some(lane), _) => {
            if orthogonal {
                slots[0].set_lane(Lane::Both);
            } else if slots[1].is_idle() {
                slots[1].open(lane.opposite(), pos);
            }
        }
        (None, Some(lane)) => {
            if orthogonal {
                slots[1].set_lane(Lane::Both);
            } else {
                slots[0].open(lane.opposite(), pos);
            }
        }
    }
    Flow::Stop
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    fn slots(states: [Option<(Lane, Position)>; 2]) -> [CircuitSlot; 2] {
        states.map(|state| {
            let mut slot = CircuitSlot::default();
            if let Some((lane, start)) = state {
                slot.open(lane, start);
            }
            slot
        })
    }

    fn states(slots: &[CircuitSlot; 2]) -> [Option<(Lane, Position)>; 2] {
        [0, 1].map(|i| slots[i].lane().zip(slots[i].start()))
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["merge", "hard-break", "single-direction", "double-direction"]
        );
    }

    #[test]
    fn test_merge_keeps_earlier_start() {
        let mut s = slots([Some((Lane::Top, 0)), Some((Lane::Bottom, 2))]);
        assert_eq!(merge_parallel(&mut s, Bond::INone, 5), Flow::Continue);
        assert_eq!(states(&s), [Some((Lane::Both, 0)), None]);
        assert!(s[1].segments().is_empty());

        let mut s = slots([Some((Lane::Top, 4)), Some((Lane::Bottom, 2))]);
        merge_parallel(&mut s, Bond::ITop, 5);
        assert_eq!(states(&s), [None, Some((Lane::Both, 2))]);
    }

    #[test]
    fn test_merge_tie_goes_to_first_slot() {
        let mut s = slots([Some((Lane::Bottom, 3)), Some((Lane::Top, 3))]);
        merge_parallel(&mut s, Bond::IBottom, 7);
        assert_eq!(states(&s), [Some((Lane::Both, 3)), None]);
    }

    #[test]
    fn test_merge_ignores_open_bonds_and_same_lanes() {
        let mut s = slots([Some((Lane::Top, 0)), Some((Lane::Bottom, 2))]);
        merge_parallel(&mut s, Bond::OBoth, 5);
        assert_eq!(states(&s), [Some((Lane::Top, 0)), Some((Lane::Bottom, 2))]);

        let mut s = slots([Some((Lane::Both, 0)), None]);
        merge_parallel(&mut s, Bond::IBoth, 5);
        assert_eq!(states(&s), [Some((Lane::Both, 0)), None]);
    }

    #[test]
    fn test_hard_break_finalizes_both() {
        let mut s = slots([Some((Lane::Top, 1)), Some((Lane::Bottom, 3))]);
        assert_eq!(hard_break(&mut s, Bond::ONone, 6), Flow::Stop);
        assert_eq!(states(&s), [None, None]);
        assert_eq!(s[0].segments(), &[Segment::new(1, 6)]);
        assert_eq!(s[1].segments(), &[Segment::new(3, 6)]);

        let mut s = slots([Some((Lane::Top, 1)), None]);
        assert_eq!(hard_break(&mut s, Bond::OTop, 6), Flow::Continue);
        assert_eq!(states(&s), [Some((Lane::Top, 1)), None]);
    }

    #[test]
    fn test_single_opens_first_slot_when_idle() {
        let mut s = slots([None, None]);
        assert_eq!(single_direction(&mut s, Bond::OBottom, 4), Flow::Stop);
        assert_eq!(states(&s), [Some((Lane::Bottom, 4)), None]);
    }

    #[test]
    fn test_single_demotes_both_without_closing() {
        let mut s = slots([None, Some((Lane::Both, 2))]);
        single_direction(&mut s, Bond::OTop, 4);
        assert_eq!(states(&s), [None, Some((Lane::Top, 2))]);
        assert!(s[1].segments().is_empty());
    }

    #[test]
    fn test_single_switches_opposite_lane_on_orthogonal() {
        let mut s = slots([Some((Lane::Bottom, 1)), None]);
        single_direction(&mut s, Bond::ITop, 4);
        assert_eq!(states(&s), [Some((Lane::Top, 1)), None]);
        assert!(s[0].segments().is_empty());
    }

    #[test]
    fn test_single_closes_opposite_lane_and_reopens_in_free_slot() {
        let mut s = slots([Some((Lane::Bottom, 1)), None]);
        single_direction(&mut s, Bond::OTop, 4);
        assert_eq!(states(&s), [None, Some((Lane::Top, 4))]);
        assert_eq!(s[0].segments(), &[Segment::new(1, 4)]);

        let mut s = slots([None, Some((Lane::Top, 2))]);
        single_direction(&mut s, Bond::OBottom, 5);
        assert_eq!(states(&s), [Some((Lane::Bottom, 5)), None]);
        assert_eq!(s[1].segments(), &[Segment::new(2, 5)]);
    }

    #[test]
    fn test_single_continues_same_lane() {
        let mut s = slots([Some((Lane::Top, 1)), None]);
        assert_eq!(single_direction(&mut s, Bond::OTop, 4), Flow::Stop);
        assert_eq!(states(&s), [Some((Lane::Top, 1)), None]);
    }

    #[test]
    fn test_single_closes_opposite_and_keeps_running_lane() {
        let mut s = slots([Some((Lane::Bottom, 1)), Some((Lane::Top, 2))]);
        single_direction(&mut s, Bond::OTop, 4);
        assert_eq!(states(&s), [None, Some((Lane::Top, 2))]);
        assert_eq!(s[0].segments(), &[Segment::new(1, 4)]);
    }

    #[test]
    fn test_single_passes_other_bonds() {
        let mut s = slots([None, None]);
        assert_eq!(single_direction(&mut s, Bond::IBoth, 4), Flow::Continue);
        assert_eq!(states(&s), [None, None]);
    }

    #[test]
    fn test_double_absorbed_by_both() {
        let mut s = slots([None, Some((Lane::Both, 2))]);
        assert_eq!(double_direction(&mut s, Bond::OBoth, 4), Flow::Stop);
        assert_eq!(states(&s), [None, Some((Lane::Both, 2))]);
    }

    #[test]
    fn test_double_from_idle() {
        let mut s = slots([None, None]);
        double_direction(&mut s, Bond::IBoth, 4);
        assert_eq!(states(&s), [Some((Lane::Both, 4)), None]);

        let mut s = slots([None, None]);
        double_direction(&mut s, Bond::OBoth, 4);
        assert_eq!(states(&s), [Some((Lane::Top, 4)), Some((Lane::Bottom, 4))]);
    }

    #[test]
    fn test_double_with_one_active_slot() {
        let mut s = slots([Some((Lane::Bottom, 1)), None]);
        double_direction(&mut s, Bond::IBoth, 4);
        assert_eq!(states(&s), [Some((Lane::Both, 1)), None]);

        let mut s = slots([Some((Lane::Bottom, 1)), None]);
        double_direction(&mut s, Bond::OBoth, 4);
        assert_eq!(states(&s), [Some((Lane::Bottom, 1)), Some((Lane::Top, 4))]);

        let mut s = slots([None, Some((Lane::Top, 1))]);
        double_direction(&mut s, Bond::IBoth, 4);
        assert_eq!(states(&s), [None, Some((Lane::Both, 1))]);

        let mut s = slots([None, Some((Lane::Top, 1))]);
        double_direction(&mut s, Bond::OBoth, 4);
        assert_eq!(states(&s), [Some((Lane::Bottom, 4)), Some((Lane::Top, 1))]);
    }
}
