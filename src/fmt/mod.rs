//! Rendering of queued entries into output lines: the per-level lookup
//! tables, the ANSI fragments, and the line builder the dispatch worker runs
//! for every enabled output.

mod color;
mod format;
mod level_map;

pub use color::{ANSI_COLOR_PREFIX, ANSI_COLOR_RESET, ANSI_COLOR_SUFFIX};
pub use format::{LineParts, build_line};
pub use level_map::LevelMap;
