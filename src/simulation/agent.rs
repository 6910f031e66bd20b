use crate::simulation::config::NavigatorConfig;
use crate::simulation::direction::{Direction, PRIORITY};
use crate::simulation::environment::{Environment, MoveOutcome};
use crate::simulation::error::{MemoryError, NavError};
use crate::simulation::memory::{CellState, MemoryGrid, MoveHistory, Position};
use crate::simulation::observer::{NavigationObserver, TracingObserver};

/// Navigator state machine modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavMode {
    /// Exploring forward from the current cell
    #[default]
    Advancing,
    /// Retreating along the history until an unexplored neighbor shows up
    Backtracking,
    /// Goal reached; terminal
    Won,
}

/// What a single loop iteration did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// Moved forward one cell
    Moved(Direction),
    /// Bumped into a wall and stayed put
    Blocked(Direction),
    /// Retreated one cell, leaving a dead end behind
    Backtracked(Direction),
    /// No candidate direction; the next iteration detects the dead end
    Idle,
    /// Stepped onto the goal
    Won(Direction),
}

/// Counters accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavStats {
    pub iterations: u64,
    /// Successful forward moves, the goal move included
    pub forward_moves: u64,
    pub backtrack_moves: u64,
    pub blocked_attempts: u64,
}

impl NavStats {
    /// Every move request sent to the environment.
    #[must_use]
    pub const fn environment_calls(&self) -> u64 {
        self.forward_moves + self.backtrack_moves + self.blocked_attempts
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LastAttempt {
    direction: Direction,
    succeeded: bool,
}

/// Depth-first maze explorer with private memory.
///
/// The navigator never sees maze coordinates. It starts at the centre of its
/// memory grid, records what each move attempt reveals, and keeps the live
/// path from the start in a [`MoveHistory`].
#[derive(Debug)]
pub struct Navigator<O = TracingObserver> {
    memory: MemoryGrid,
    start: Position,
    position: Position,
    goal: Option<Position>,
    history: MoveHistory,
    mode: NavMode,
    last_attempt: Option<LastAttempt>,
    stats: NavStats,
    step_limit: Option<u64>,
    observer: O,
}

impl Navigator<TracingObserver> {
    /// Creates a navigator that logs through `tracing`.
    ///
    /// # Errors
    /// Returns the config validation error before any exploration.
    pub fn new(config: &NavigatorConfig) -> Result<Self, NavError> {
        Self::with_observer(config, TracingObserver)
    }
}

impl<O: NavigationObserver> Navigator<O> {
    /// Creates a navigator reporting to `observer`.
    ///
    /// # Errors
    /// Returns the config validation error before any exploration.
    pub fn with_observer(config: &NavigatorConfig, observer: O) -> Result<Self, NavError> {
        config.validate()?;
        let mut memory = MemoryGrid::new(config.memory_width, config.memory_height)?;
        let start = memory.origin();
        memory.mark(start, CellState::Visited)?;

        Ok(Self {
            memory,
            start,
            position: start,
            goal: None,
            history: MoveHistory::new(),
            mode: NavMode::Advancing,
            last_attempt: None,
            stats: NavStats::default(),
            step_limit: config.step_limit,
            observer,
        })
    }

    #[must_use]
    pub const fn memory(&self) -> &MemoryGrid {
        &self.memory
    }

    #[must_use]
    pub const fn history(&self) -> &MoveHistory {
        &self.history
    }

    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Where the goal was found, once it has been.
    #[must_use]
    pub const fn goal(&self) -> Option<Position> {
        self.goal
    }

    #[must_use]
    pub const fn mode(&self) -> NavMode {
        self.mode
    }

    #[must_use]
    pub const fn stats(&self) -> &NavStats {
        &self.stats
    }

    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.mode == NavMode::Won
    }

    /// Explores until the environment reports the goal.
    ///
    /// # Errors
    /// Any fatal [`NavError`]; memory is left as it was when the error hit.
    pub fn run<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<NavStats, NavError> {
        tracing::info!(
            x = self.start.x,
            y = self.start.y,
            "navigator starting"
        );
        while !self.is_won() {
            self.step(env)?;
        }
        Ok(self.stats)
    }

    /// Runs one iteration of the decision loop.
    ///
    /// # Errors
    /// `AlreadyFinished` after the goal, `StepLimitExceeded` past the
    /// configured limit, and any memory, environment or unsolvable-maze fault.
    pub fn step<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<StepEvent, NavError> {
        if self.is_won() {
            return Err(NavError::AlreadyFinished);
        }
        if let Some(limit) = self.step_limit {
            if self.stats.iterations >= limit {
                return Err(NavError::StepLimitExceeded { limit });
            }
        }
        self.stats.iterations += 1;

        if self.mode == NavMode::Backtracking || self.is_dead_end()? {
            return match self.find_unexplored()? {
                Some(direction) => {
                    self.mode = NavMode::Advancing;
                    self.attempt(env, direction)
                }
                None => self.backtrack(env),
            };
        }

        match self.choose_forward()? {
            Some(direction) => self.attempt(env, direction),
            None => Ok(StepEvent::Idle),
        }
    }

    /// True when every neighbor is already known.
    fn is_dead_end(&self) -> Result<bool, MemoryError> {
        Ok(self.find_unexplored()?.is_none())
    }

    /// First unknown neighbor in priority order.
    fn find_unexplored(&self) -> Result<Option<Direction>, MemoryError> {
        for direction in PRIORITY {
            if self.memory.read(self.position, direction)? == CellState::Unknown {
                return Ok(Some(direction));
            }
        }
        Ok(None)
    }

    /// Keeps going the same way while that pays off, otherwise falls back
    /// to the priority scan, skipping the direction that just failed.
    fn choose_forward(&self) -> Result<Option<Direction>, MemoryError> {
        if let Some(LastAttempt {
            direction,
            succeeded: true,
        }) = self.last_attempt
        {
            if self.memory.read(self.position, direction)? == CellState::Unknown {
                return Ok(Some(direction));
            }
        }

        let last_failed = self
            .last_attempt
            .filter(|attempt| !attempt.succeeded)
            .map(|attempt| attempt.direction);
        for direction in PRIORITY {
            if Some(direction) == last_failed {
                continue;
            }
            if self.memory.read(self.position, direction)? == CellState::Unknown {
                return Ok(Some(direction));
            }
        }
        Ok(None)
    }

    fn attempt<E: Environment + ?Sized>(
        &mut self,
        env: &mut E,
        direction: Direction,
    ) -> Result<StepEvent, NavError> {
        let target = self.memory.neighbor(self.position, direction)?;
        let outcome = env.attempt_move(direction);
        self.observer.on_attempt(self.position, direction, outcome);

        match outcome {
            MoveOutcome::Succeeded => {
                self.advance(target, direction)?;
                self.mode = NavMode::Advancing;
                Ok(StepEvent::Moved(direction))
            }
            MoveOutcome::Blocked => {
                self.memory.mark(target, CellState::Wall)?;
                self.last_attempt = Some(LastAttempt {
                    direction,
                    succeeded: false,
                });
                self.stats.blocked_attempts += 1;
                Ok(StepEvent::Blocked(direction))
            }
            MoveOutcome::GoalReached => {
                self.advance(target, direction)?;
                self.goal = Some(target);
                self.mode = NavMode::Won;
                self.observer.on_won(target, &self.stats);
                Ok(StepEvent::Won(direction))
            }
        }
    }

    fn advance(&mut self, target: Position, direction: Direction) -> Result<(), MemoryError> {
        self.memory.mark(target, CellState::Visited)?;
        self.position = target;
        self.history.push(direction);
        self.last_attempt = Some(LastAttempt {
            direction,
            succeeded: true,
        });
        self.stats.forward_moves += 1;
        Ok(())
    }

    /// Retires the current cell as a dead end and retraces the last move.
    fn backtrack<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<StepEvent, NavError> {
        let Some(last) = self.history.peek() else {
            return Err(NavError::Unsolvable {
                position: self.position,
            });
        };
        let back = last.opposite();
        let target = self.memory.neighbor(self.position, back)?;
        self.memory.mark(self.position, CellState::DeadEnd)?;
        self.observer.on_backtrack(self.position, back);

        let outcome = env.attempt_move(back);
        if outcome != MoveOutcome::Succeeded {
            return Err(NavError::EnvironmentInconsistency {
                position: self.position,
                direction: back,
                outcome,
            });
        }

        self.position = target;
        self.history.pop();
        self.mode = NavMode::Backtracking;
        self.stats.backtrack_moves += 1;
        Ok(StepEvent::Backtracked(back))
    }
}
