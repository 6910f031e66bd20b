pub mod agent;
pub mod config;
pub mod direction;
pub mod environment;
pub mod error;
pub mod memory;
pub mod observer;
pub mod params;

pub use agent::{NavMode, NavStats, Navigator, StepEvent};
pub use config::NavigatorConfig;
pub use direction::Direction;
pub use environment::{Environment, GridMaze, MoveOutcome};
pub use error::NavError;
