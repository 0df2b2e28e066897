use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// The neighbouring cell, or `None` when it would fall off the low edge.
    pub fn step(self, pos: Coords) -> Option<Coords> {
        match self {
            Up => pos.1.checked_sub(1).map(|y| (pos.0, y)),
            Down => pos.1.checked_add(1).map(|y| (pos.0, y)),
            Left => pos.0.checked_sub(1).map(|x| (x, pos.1)),
            Right => pos.0.checked_add(1).map(|x| (x, pos.1)),
        }
    }
}

/// Positions the snake occupies. Index 0 is the head's cell, the rest is the
/// body ordered from the neck to the tip.
#[derive(Clone, Debug)]
pub struct Tail {
    segments: VecDeque<Coords>,
}

impl Tail {
    pub fn with_capacity(capacity: usize) -> Self {
        Tail { segments: VecDeque::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Start a fresh snake made only of its head.
    pub fn reset_to(&mut self, head: Coords) {
        self.segments.clear();
        self.segments.push_front(head);
    }

    /// Shift every segment one step toward the tip and write `new_head` at
    /// index 0. With `grow` set the tip is kept, lengthening the tail by one.
    pub fn advance(&mut self, new_head: Coords, grow: bool) {
        self.segments.push_front(new_head);
        if !grow {
            self.segments.pop_back();
        }
    }

    pub fn head(&self) -> Option<Coords> {
        self.segments.front().copied()
    }

    pub fn body(&self) -> impl Iterator<Item = Coords> + '_ {
        self.segments.iter().skip(1).copied()
    }

    pub fn neck(&self) -> Option<Coords> {
        self.segments.get(1).copied()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.segments.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_refuses_to_underflow() {
        assert_eq!(Up.step((3, 0)), None);
        assert_eq!(Left.step((0, 3)), None);
        assert_eq!(Down.step((3, 3)), Some((3, 4)));
        assert_eq!(Right.step((3, 3)), Some((4, 3)));
    }

    #[test]
    fn advance_trails_the_head() {
        let mut tail = Tail::with_capacity(16);
        tail.reset_to((5, 5));
        tail.advance((5, 6), true);
        tail.advance((5, 7), false);

        assert_eq!(tail.len(), 2);
        assert_eq!(tail.head(), Some((5, 7)));
        assert_eq!(tail.body().collect::<Vec<_>>(), vec![(5, 6)]);
    }

    #[test]
    fn clear_drops_every_segment() {
        let mut tail = Tail::with_capacity(16);
        tail.reset_to((2, 2));
        tail.advance((2, 3), true);
        tail.clear();
        assert!(tail.is_empty());
        assert!(!tail.contains((2, 2)));
        assert!(!tail.contains((2, 3)));
    }
}
