//! Plain-text summary printed when a run ends.

use crate::simulation::memory::CellState;
use crate::simulation::observer::NavigationObserver;
use crate::simulation::Navigator;
use crate::ui::field::{known_field, FieldOverlay};

/// Memory map, solved path and counters for `nav`.
///
/// `maze_steps` is the environment's own count of answered requests, when known.
#[must_use]
pub fn format_report<O: NavigationObserver>(nav: &Navigator<O>, maze_steps: Option<u64>) -> String {
    let mut out = String::new();
    let stats = nav.stats();
    let memory = nav.memory();

    out.push_str("----- Navigator memory -----\n");
    for line in known_field(memory, FieldOverlay::of(nav)) {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str("legend: @ agent  S start  G goal  . visited  x dead end  # wall\n\n");

    out.push_str(&format!(
        "mode:            {:?}\n\
         path length:     {}\n\
         forward moves:   {}\n\
         backtrack moves: {}\n\
         blocked moves:   {}\n\
         cells known:     {} visited, {} dead end, {} wall\n",
        nav.mode(),
        nav.history().len(),
        stats.forward_moves,
        stats.backtrack_moves,
        stats.blocked_attempts,
        memory.count(CellState::Visited),
        memory.count(CellState::DeadEnd),
        memory.count(CellState::Wall),
    ));
    if let Some(steps) = maze_steps {
        out.push_str(&format!("maze steps:      {steps}\n"));
    }
    out.push_str(&format!("\nPath from start:\n{}\n", nav.history()));
    out
}
