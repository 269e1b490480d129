//! # Scanline Disparity
//!
//! This crate provides minimum cost disparity labelling along a single scanline by dynamic
//! programming, in an elementwise reference form and a vectorized form, plus a stereo front-end
//! which solves every row of a rectified frame independently.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

mod cost;
mod disparity;
mod error;
pub mod diagnostics;
pub mod elementwise;
pub mod path;
pub mod solver;
#[cfg(feature = "statistics")]
pub mod statistics;
pub mod stereo;
pub mod vectorized;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use crate::cost::{matrix_from_rows, CostModel};
pub use crate::error::{Error, InputError, Matrix, Result};
pub use crate::solver::solve;

pub mod prelude {
    pub use crate::cost::CostModel;
    pub use crate::diagnostics::{DiagnosticSink, Event, LogSink, NullSink};
    pub use crate::disparity::{DisparityAlgorithm, DisparityMap, StereoFrame};
    pub use crate::elementwise::ScanlineDp;
    pub use crate::solver::{ScanlineSolver, Solution, SolveOptions};
    pub use crate::vectorized::ScanlineDpVectorized;
}
