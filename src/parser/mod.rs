//! Parsing and serialization of the grid text format.
//!
//! This module handles reading and writing grids from the tab-separated
//! text format the editor stores inside a project directory.

pub mod grid_gen;
pub mod grid_text;

// Re-export commonly used functions
pub use grid_gen::{generate_grid, save_grid};
pub use grid_text::{load_grid, parse_grid_str};
