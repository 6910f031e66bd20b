//! Last-in-first-out record of the live path from the start.

use std::fmt;
use std::str::FromStr;

use crate::simulation::direction::Direction;
use crate::simulation::error::InvalidDirection;
use crate::simulation::memory::Position;

/// Directions taken from the start to the current position.
///
/// Forward moves push, backtrack steps pop, so abandoned branches never
/// remain in the record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Direction>,
}

impl MoveHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, direction: Direction) {
        self.moves.push(direction);
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.moves.pop()
    }

    /// Most recent move.
    #[must_use]
    pub fn peek(&self) -> Option<Direction> {
        self.moves.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Iterates moves from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.moves.iter().copied()
    }

    /// Moves as a slice, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Direction] {
        &self.moves
    }

    /// Walks the history from `start` and returns where it ends.
    ///
    /// Returns `None` if the walk would leave non-negative coordinates.
    #[must_use]
    pub fn replay(&self, start: Position) -> Option<Position> {
        self.iter().try_fold(start, Position::step)
    }

    /// Every cell on the path, `start` included.
    #[must_use]
    pub fn trail(&self, start: Position) -> Vec<Position> {
        let mut trail = Vec::with_capacity(self.len() + 1);
        trail.push(start);
        let mut current = start;
        for direction in self.iter() {
            match current.step(direction) {
                Some(next) => {
                    trail.push(next);
                    current = next;
                }
                None => break,
            }
        }
        trail
    }
}

impl From<Vec<Direction>> for MoveHistory {
    fn from(moves: Vec<Direction>) -> Self {
        Self { moves }
    }
}

impl fmt::Display for MoveHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, direction) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{direction}")?;
        }
        Ok(())
    }
}

impl FromStr for MoveHistory {
    type Err = InvalidDirection;

    /// Parses whitespace, comma or arrow separated tokens such as `"U L, down -> R"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty() && *token != "->")
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from)
    }
}
