//! Cross detection: one circuit ends where the other one starts.
//!
//! The checks run in the fixed order of [`CROSS_RULES`], before any interval
//! classification, and the first match wins.

use crate::types::{Position, Segment};

/// Read positions into the two segment lists.
#[derive(Debug, Clone)]
pub struct Cursors<'a> {
    lists: [&'a [Segment]; 2],
    index: [usize; 2],
}

impl<'a> Cursors<'a> {
    #[must_use]
    pub const fn new(first: &'a [Segment], second: &'a [Segment]) -> Self {
        Self {
            lists: [first, second],
            index: [0, 0],
        }
    }

    /// Segment the cursor of `list` points at, `None` once exhausted.
    #[must_use]
    pub fn current(&self, list: usize) -> Option<Segment> {
        self.lists[list].get(self.index[list]).copied()
    }

    fn following(&self, list: usize) -> Option<Segment> {
        self.lists[list].get(self.index[list] + 1).copied()
    }

    pub fn advance(&mut self, list: usize) {
        self.index[list] += 1;
    }

    /// Current indices, for inspection in tests.
    #[must_use]
    pub const fn indices(&self) -> [usize; 2] {
        self.index
    }

    /// `ending` closes exactly where `starting` opens, at `pos`.
    fn meets_here(&mut self, ending: usize, starting: usize, pos: Position) -> bool {
        match (self.current(ending), self.current(starting)) {
            (Some(e), Some(s)) if e.end == s.start && e.end == pos => {
                self.advance(ending);
                true
            }
            _ => false,
        }
    }

    /// `ending` closes exactly where `starting` opens, one position ahead.
    fn meets_next(&self, ending: usize, starting: usize, pos: Position) -> bool {
        matches!(
            (self.current(ending), self.current(starting)),
            (Some(e), Some(s)) if e.end == s.start && e.end == pos + 1
        )
    }

    /// `ending` closes one position ahead, where the segment after the
    /// current one of `starting` opens.
    fn meets_following(&mut self, ending: usize, starting: usize, pos: Position) -> bool {
        match (self.current(ending), self.following(starting)) {
            (Some(e), Some(s)) if e.end == s.start && e.end == pos + 1 => {
                if self.current(starting).is_some_and(|c| c.end == pos) {
                    self.advance(starting);
                }
                true
            }
            _ => false,
        }
    }
}

pub type CrossRule = fn(&mut Cursors<'_>, Position) -> bool;

/// Cross checks in evaluation order.
pub const CROSS_RULES: [(&str, CrossRule); 6] = [
    ("second-ends-first-starts-here", second_meets_first_here),
    ("second-ends-first-starts-next", second_meets_first_next),
    ("second-ends-first-following-starts-next", second_meets_first_following),
    ("first-ends-second-starts-here", first_meets_second_here),
    ("first-ends-second-starts-next", first_meets_second_next),
    ("first-ends-second-following-starts-next", first_meets_second_following),
];

fn second_meets_first_here(c: &mut Cursors<'_>, pos: Position) -> bool {
    c.meets_here(1, 0, pos)
}

fn second_meets_first_next(c: &mut Cursors<'_>, pos: Position) -> bool {
    c.meets_next(1, 0, pos)
}

fn second_meets_first_following(c: &mut Cursors<'_>, pos: Position) -> bool {
    c.meets_following(1, 0, pos)
}

fn first_meets_second_here(c: &mut Cursors<'_>, pos: Position) -> bool {
    c.meets_here(0, 1, pos)
}

fn first_meets_second_next(c: &mut Cursors<'_>, pos: Position) -> bool {
    c.meets_next(0, 1, pos)
}

fn first_meets_second_following(c: &mut Cursors<'_>, pos: Position) -> bool {
    c.meets_following(0, 1, pos)
}

/// Runs the cross checks in order; true when one of them fired.
pub fn detect_cross(cursors: &mut Cursors<'_>, pos: Position) -> bool {
    CROSS_RULES.iter().any(|(_, rule)| rule(cursors, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: Position, end: Position) -> Segment {
        Segment::new(start, end)
    }

    #[test]
    fn test_meets_here_advances_ending_list() {
        let first = [seg(4, 8)];
        let second = [seg(0, 4)];
        let mut cursors = Cursors::new(&first, &second);
        assert!(second_meets_first_here(&mut cursors, 4));
        assert_eq!(cursors.indices(), [0, 1]);
    }

    #[test]
    fn test_meets_next_does_not_advance() {
        let first = [seg(0, 4)];
        let second = [seg(4, 8)];
        let mut cursors = Cursors::new(&first, &second);
        assert!(!first_meets_second_here(&mut cursors, 3));
        assert!(first_meets_second_next(&mut cursors, 3));
        assert_eq!(cursors.indices(), [0, 0]);
    }

    #[test]
    fn test_meets_following_advances_finished_segment() {
        let first = [seg(0, 2), seg(5, 9)];
        let second = [seg(1, 5)];
        let mut cursors = Cursors::new(&first, &second);
        assert!(!second_meets_first_following(&mut cursors, 3));
        assert_eq!(cursors.indices(), [0, 0]);

        let first = [seg(0, 4), seg(5, 9)];
        let mut cursors = Cursors::new(&first, &second);
        assert!(second_meets_first_following(&mut cursors, 4));
        assert_eq!(cursors.indices(), [1, 0]);
    }

    #[test]
    fn test_rule_priority_prefers_second_list_ending() {
        // the third and sixth checks both match; the third one decides
        let first = [seg(0, 4), seg(4, 6)];
        let second = [seg(2, 4), seg(4, 7)];
        let mut cursors = Cursors::new(&first, &second);
        assert!(detect_cross(&mut cursors, 3));
        assert_eq!(cursors.indices(), [0, 0]);

        let mut cursors = Cursors::new(&first[1..], &second);
        assert!(detect_cross(&mut cursors, 4));
        assert_eq!(cursors.indices(), [0, 1]);
    }

    #[test]
    fn test_no_cross_when_lists_exhausted() {
        let mut cursors = Cursors::new(&[], &[]);
        assert!(!detect_cross(&mut cursors, 0));
        assert_eq!(cursors.current(0), None);
    }
}
