//! Extension points the navigator reports through.

use crate::simulation::agent::NavStats;
use crate::simulation::direction::Direction;
use crate::simulation::environment::MoveOutcome;
use crate::simulation::memory::Position;

/// Receives navigation events. Every method defaults to a no-op.
pub trait NavigationObserver {
    /// A forward move was attempted from `from`.
    fn on_attempt(&mut self, _from: Position, _direction: Direction, _outcome: MoveOutcome) {}

    /// `from` was marked a dead end and the navigator retreated in `direction`.
    fn on_backtrack(&mut self, _from: Position, _direction: Direction) {}

    /// The goal was reached at `at`.
    fn on_won(&mut self, _at: Position, _stats: &NavStats) {}
}

/// Default observer: forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl NavigationObserver for TracingObserver {
    fn on_attempt(&mut self, from: Position, direction: Direction, outcome: MoveOutcome) {
        tracing::debug!(x = from.x, y = from.y, %direction, ?outcome, "move attempt");
    }

    fn on_backtrack(&mut self, from: Position, direction: Direction) {
        tracing::debug!(x = from.x, y = from.y, %direction, "dead end, backtracking");
    }

    fn on_won(&mut self, at: Position, stats: &NavStats) {
        tracing::info!(
            x = at.x,
            y = at.y,
            forward = stats.forward_moves,
            backtracks = stats.backtrack_moves,
            blocked = stats.blocked_attempts,
            "goal reached"
        );
    }
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl NavigationObserver for Silent {}
