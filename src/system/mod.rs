//! Linear system solving by Gaussian elimination.
//!
//! A [`LinearSystem`] owns one [`Equation`] per row and solves `Ax = b` in
//! two phases:
//!
//! 1. Forward elimination. For each row the pivot is the largest-magnitude
//!    coefficient among the columns not yet fixed, searched along the row
//!    itself. The chosen column is recorded in an index mapping instead of
//!    physically swapping matrix columns. The row is normalized so the pivot
//!    becomes 1 and the pivot column is eliminated from every row below.
//! 2. Back-substitution from the last row upward, resolving each variable
//!    through the index mapping.
//!
//! ```text
//! indices[row] = column chosen as pivot for `row`
//! x[indices[row]] = b'[row] - sum_{j > row} A'[row][indices[j]] * x[indices[j]]
//! ```

mod equation;
mod linear;
mod observer;

pub use equation::Equation;
pub use linear::{LinearSystem, SolverConfig, SystemState};
pub use observer::{LogTrace, NoTrace, ReductionObserver, TraceRecorder};

/// Default pivot tolerance. Only an exactly zero pivot is singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 0.0;
