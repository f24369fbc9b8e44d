//! Mathematical utilities: Kepler orbit helpers and sample grids.

pub mod grid;
pub mod kepler;

pub use grid::*;
pub use kepler::*;
