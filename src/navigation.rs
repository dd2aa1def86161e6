//! Wrap-around carousel position over a fixed-size image set.
//!
//! A [`Navigation`] is always positioned on a valid index: it cannot be built
//! for an empty set or at an out-of-range start, and no transition can move it
//! off the set.
//!
//! ```text
//! size = 3
//!
//!   next:      0 → 1 → 2 → 0
//!   previous:  0 → 2 → 1 → 0
//!   jump_to(i) sets the index when i < size, fails otherwise
//! ```
//!
//! Every successful transition returns [`Moved`] so the owner can drop any
//! index-scoped state (zoom, in the lightbox session). A jump to the current
//! index and a wrap on a one-image set both still count as a move.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Cannot navigate an empty image set")]
    EmptyImageSet,
    #[error("Image index {index} out of range for {size} images")]
    IndexOutOfRange { index: usize, size: usize },
}

/// Signal returned by every successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Moved {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    current: usize,
    size: usize,
}

impl Navigation {
    /// Position a new carousel at `start` over `size` images.
    pub fn new(size: usize, start: usize) -> Result<Self, NavigationError> {
        if size == 0 {
            return Err(NavigationError::EmptyImageSet);
        }
        if start >= size {
            return Err(NavigationError::IndexOutOfRange { index: start, size });
        }
        Ok(Self {
            current: start,
            size,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn next(&mut self) -> Moved {
        self.move_to((self.current + 1) % self.size)
    }

    pub fn previous(&mut self) -> Moved {
        self.move_to((self.current + self.size - 1) % self.size)
    }

    /// Jump directly to `index`. Out-of-range indices are rejected, never clamped.
    pub fn jump_to(&mut self, index: usize) -> Result<Moved, NavigationError> {
        if index >= self.size {
            return Err(NavigationError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(self.move_to(index))
    }

    fn move_to(&mut self, to: usize) -> Moved {
        let from = self.current;
        self.current = to;
        Moved { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cannot_build_over_empty_set() {
        assert_eq!(Navigation::new(0, 0), Err(NavigationError::EmptyImageSet));
    }

    #[test]
    fn start_must_be_in_range() {
        assert_eq!(
            Navigation::new(3, 3),
            Err(NavigationError::IndexOutOfRange { index: 3, size: 3 })
        );
        assert_eq!(Navigation::new(3, 2).unwrap().current(), 2);
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut nav = Navigation::new(3, 2).unwrap();
        let moved = nav.next();
        assert_eq!(moved, Moved { from: 2, to: 0 });
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut nav = Navigation::new(4, 0).unwrap();
        let _ = nav.previous();
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn single_image_wraps_onto_itself() {
        let mut nav = Navigation::new(1, 0).unwrap();
        assert_eq!(nav.next(), Moved { from: 0, to: 0 });
        assert_eq!(nav.previous(), Moved { from: 0, to: 0 });
    }

    #[test]
    fn jump_to_in_range() {
        let mut nav = Navigation::new(5, 0).unwrap();
        assert_eq!(nav.jump_to(4), Ok(Moved { from: 0, to: 4 }));
        assert_eq!(nav.current(), 4);
    }

    #[test]
    fn jump_to_out_of_range_leaves_position() {
        let mut nav = Navigation::new(4, 2).unwrap();
        assert_eq!(
            nav.jump_to(5),
            Err(NavigationError::IndexOutOfRange { index: 5, size: 4 })
        );
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn jump_to_current_index_still_moves() {
        let mut nav = Navigation::new(3, 1).unwrap();
        assert_eq!(nav.jump_to(1), Ok(Moved { from: 1, to: 1 }));
    }
}
