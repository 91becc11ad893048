//! Cardinal directions and their unit offsets on the room grid.

use crate::random::RandomSource;

/// One of the four cardinal directions a movable entity can step or shoot towards.
///
/// The grid's origin sits in the top-left corner, so [`Direction::Up`] decreases the row index and
/// [`Direction::Down`] increases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Away from row zero.
    Down,
    /// Towards column zero.
    Left,
    /// Away from column zero.
    Right,
}

impl Direction {
    /// All directions, in the order used by [`Direction::random`].
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the unit offset of the direction as a `(dx, dy)` pair.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Picks one of the four directions with uniform probability.
    ///
    /// This function draws a single index from the given random source and carries no state of its
    /// own, so a scripted source fully decides the outcome.
    pub fn random<R: RandomSource>(random: &mut R) -> Self {
        match random.pick(Self::ALL.len()) {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            _ => Self::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn test_offsets_are_unit_steps() {
        assert_eq!(Direction::Up.offset(), (0, -1));
        assert_eq!(Direction::Down.offset(), (0, 1));
        assert_eq!(Direction::Left.offset(), (-1, 0));
        assert_eq!(Direction::Right.offset(), (1, 0));
    }

    #[test]
    fn test_random_follows_source() {
        let mut random = ScriptedSource::new().with_picks([0, 1, 2, 3]);

        assert_eq!(Direction::random(&mut random), Direction::Up);
        assert_eq!(Direction::random(&mut random), Direction::Down);
        assert_eq!(Direction::random(&mut random), Direction::Left);
        assert_eq!(Direction::random(&mut random), Direction::Right);
    }

    #[test]
    fn test_random_asks_for_four_outcomes() {
        let mut random = ScriptedSource::new().with_picks([2]);

        let _ = Direction::random(&mut random);

        assert_eq!(random.requested_bounds(), &[4]);
    }
}
