//! Error types for the navigator, its memory and the reference maze.

use std::path::PathBuf;

use thiserror::Error;

use crate::simulation::direction::Direction;
use crate::simulation::environment::MoveOutcome;
use crate::simulation::memory::{CellState, Position};

/// A direction token outside the four cardinal directions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction token: {0:?}")]
pub struct InvalidDirection(pub String);

/// Rejected before any exploration starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("memory grid {width}x{height} is too small, each side needs at least {min} cells")]
    MemoryTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("memory grid {width}x{height} exceeds the limit of {max} cells")]
    MemoryTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("step limit must be positive")]
    ZeroStepLimit,
    #[error("invalid configuration: {0}")]
    Parse(String),
    #[error("could not parse grid size {0:?}, expected WIDTHxHEIGHT")]
    BadSize(String),
}

/// Violations of the memory grid contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("position {position} moved {direction} leaves the {width}x{height} memory grid")]
    OutOfBounds {
        position: Position,
        direction: Direction,
        width: usize,
        height: usize,
    },
    #[error("cell {position} lies outside the {width}x{height} memory grid")]
    OutsideGrid {
        position: Position,
        width: usize,
        height: usize,
    },
    #[error("cell {position} cannot change from {from:?} to {to:?}")]
    IllegalTransition {
        position: Position,
        from: CellState,
        to: CellState,
    },
}

/// Fatal conditions raised by the decision loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("backtrack {direction} from {position} answered {outcome:?}, expected a reversible move")]
    EnvironmentInconsistency {
        position: Position,
        direction: Direction,
        outcome: MoveOutcome,
    },
    #[error("nothing left to explore and no move to retrace at {position}: maze is unsolvable")]
    Unsolvable { position: Position },
    #[error("step limit of {limit} iterations exceeded")]
    StepLimitExceeded { limit: u64 },
    #[error("navigator has already reached the goal")]
    AlreadyFinished,
}

/// Problems building a reference maze.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze has no start cell 'S'")]
    MissingStart,
    #[error("maze has no goal cell 'G'")]
    MissingGoal,
    #[error("maze has more than one {0:?} cell")]
    Duplicate(char),
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
    #[error("maze must have at least one room in each axis")]
    EmptyGeneration,
    #[error("a {rooms_wide}x{rooms_high} room maze exceeds the limit of {max} tiles")]
    TooLarge {
        rooms_wide: usize,
        rooms_high: usize,
        max: usize,
    },
    #[error("failed to read maze file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
