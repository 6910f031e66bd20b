//! Navigator defaults.

/// Memory grid side used when no maze size is known up front.
pub const DEFAULT_MEMORY_SIDE: usize = 201;
/// Delay between navigator steps in the terminal UI.
pub const DEFAULT_TICK_MS: u64 = 80;
/// Recent events kept for the terminal UI log.
pub const EVENT_LOG_LEN: usize = 8;
