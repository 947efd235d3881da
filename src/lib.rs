pub mod cell;
pub mod config;
pub mod grid;
pub mod neighbors;
pub mod pattern;
pub mod render;
pub mod rule_set;
pub mod seed;
pub mod simulation;
pub mod step;

pub use cell::Cell;
pub use grid::Grid;
pub use grid::GridError;
pub use neighbors::count_live_neighbors;
pub use step::next_generation;
