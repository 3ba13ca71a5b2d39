//! A single linear equation: coefficients plus a free term.

use std::fmt;

use crate::error::{Result, SolverError};

/// One row of a linear system, `a0*x0 + a1*x1 + ... = free_term`.
///
/// Arithmetic never mutates in place; every operation returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    coefficients: Vec<f64>,
    free_term: f64,
}

impl Equation {
    /// Create a new equation.
    pub fn new(coefficients: impl Into<Vec<f64>>, free_term: f64) -> Self {
        Self {
            coefficients: coefficients.into(),
            free_term,
        }
    }

    /// Number of variables (coefficients) in the equation.
    pub fn number_of_variables(&self) -> usize {
        self.coefficients.len()
    }

    /// Get the coefficient of variable `index`.
    pub fn coefficient(&self, index: usize) -> Result<f64> {
        self.coefficients
            .get(index)
            .copied()
            .ok_or(SolverError::IndexOutOfRange {
                index,
                len: self.coefficients.len(),
            })
    }

    /// All coefficients in variable order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Right-hand side of the equation.
    pub fn free_term(&self) -> f64 {
        self.free_term
    }

    /// Compute `free_term - sum(coefficient[i] * solution[i])`.
    pub fn residual(&self, solution: &[f64]) -> Result<f64> {
        if solution.len() != self.coefficients.len() {
            return Err(SolverError::dimension_mismatch(
                "residual solution vector",
                self.coefficients.len(),
                solution.len(),
            ));
        }

        let sum: f64 = self
            .coefficients
            .iter()
            .zip(solution)
            .map(|(a, x)| a * x)
            .sum();

        Ok(self.free_term - sum)
    }

    /// Subtract `other` element-wise, free term included.
    pub fn subtract(&self, other: &Equation) -> Result<Equation> {
        if self.number_of_variables() != other.number_of_variables() {
            return Err(SolverError::ArityMismatch {
                left: self.number_of_variables(),
                right: other.number_of_variables(),
            });
        }

        let coefficients = self
            .coefficients
            .iter()
            .zip(&other.coefficients)
            .map(|(a, b)| a - b)
            .collect::<Vec<_>>();

        Ok(Equation::new(coefficients, self.free_term - other.free_term))
    }

    /// Multiply every coefficient and the free term by `factor`.
    pub fn scale(&self, factor: f64) -> Equation {
        let coefficients = self
            .coefficients
            .iter()
            .map(|a| a * factor)
            .collect::<Vec<_>>();

        Equation::new(coefficients, self.free_term * factor)
    }

    /// Divide the equation by `divisor`.
    ///
    /// The caller is responsible for rejecting a zero divisor.
    pub fn divide(&self, divisor: f64) -> Equation {
        self.scale(1.0 / divisor)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for coefficient in &self.coefficients {
            write!(f, "{:8.3}", coefficient)?;
        }
        write!(f, " |{:8.3}", self.free_term)
    }
}
