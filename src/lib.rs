//! # Gauss Solver
//!
//! Solves square linear systems `Ax = b` by Gaussian elimination.
//!
//! This library provides:
//! - An [`Equation`] row type with the arithmetic needed for elimination
//! - A [`LinearSystem`] that reduces itself in place and back-substitutes
//! - Residual computation against the reduced or the original equations
//! - A step-by-step trace through pluggable observers
//!
//! ## Architecture
//!
//! - [`system`] - Equations, the linear system and reduction observers
//! - [`input`] - Parser for the text system description
//! - [`error`] - Unified error type
//! - [`report`] - Console report (CLI only)
//!
//! ## Usage
//!
//! ```rust
//! use gauss_solver::LinearSystem;
//!
//! let mut system = LinearSystem::new(&[[2.0, 1.0], [1.0, 3.0]], &[3.0, 5.0])?;
//! let solution = system.solve()?;
//! let error = system.calculate_error(&solution)?;
//! assert!(error.iter().all(|e| e.abs() < 1e-12));
//! # Ok::<(), gauss_solver::SolverError>(())
//! ```
//!
//! ## Pivoting
//!
//! At every step the pivot is the largest-magnitude coefficient of the
//! current row among the columns not fixed by earlier steps. Columns are
//! never moved; the choice is recorded in [`LinearSystem::indices`].

pub mod error;
pub mod input;
pub mod system;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use error::{Result, SolverError};
pub use system::{Equation, LinearSystem, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLinearSystem;
