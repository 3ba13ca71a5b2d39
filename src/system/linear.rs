//! The linear system and its elimination driver.

use std::fmt;

use crate::error::{Result, SolverError};

use super::equation::Equation;
use super::observer::{LogTrace, ReductionObserver};
use super::DEFAULT_PIVOT_TOLERANCE;

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// A pivot whose magnitude is at or below this value is treated as zero.
    pivot_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pivot tolerance.
    ///
    /// - 0.0 (default): only an exactly zero pivot fails
    /// - 1e-12 or so: also reject numerically degenerate pivots
    ///
    /// Negative values use their magnitude; NaN and infinity fall back to
    /// the default.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = if pivot_tolerance.is_finite() {
            pivot_tolerance.abs()
        } else {
            DEFAULT_PIVOT_TOLERANCE
        };
        self
    }

    /// Current pivot tolerance.
    pub fn pivot_tolerance(&self) -> f64 {
        self.pivot_tolerance
    }
}

/// Lifecycle of a [`LinearSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
    /// Built from inputs, nothing reduced yet
    Constructed,
    /// Elimination in progress, `row` is the row being reduced
    Reducing { row: usize },
    /// Fully reduced, solution available
    Reduced,
}

/// A square system of linear equations solved by Gaussian elimination.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    /// Working rows, reduced in place by [`LinearSystem::solve`]
    equations: Vec<Equation>,
    /// Rows as they were constructed
    original: Vec<Equation>,
    /// indices[row] is the column used as pivot for `row`
    indices: Vec<usize>,
    state: SystemState,
    config: SolverConfig,
}

impl LinearSystem {
    /// Create a new system from a coefficient matrix and right-hand side.
    pub fn new<R: AsRef<[f64]>>(matrix: &[R], rhs: &[f64]) -> Result<Self> {
        Self::with_config(matrix, rhs, SolverConfig::default())
    }

    /// Create a new system with a custom configuration.
    pub fn with_config<R: AsRef<[f64]>>(
        matrix: &[R],
        rhs: &[f64],
        config: SolverConfig,
    ) -> Result<Self> {
        if matrix.len() != rhs.len() {
            return Err(SolverError::dimension_mismatch(
                "right-hand side length",
                matrix.len(),
                rhs.len(),
            ));
        }

        let equations = matrix
            .iter()
            .zip(rhs)
            .map(|(row, &free_term)| Equation::new(row.as_ref(), free_term))
            .collect();

        Ok(Self::from_equations_with_config(equations, config))
    }

    /// Create a new system from prepared equations.
    pub fn from_equations(equations: Vec<Equation>) -> Self {
        Self::from_equations_with_config(equations, SolverConfig::default())
    }

    /// Create a new system from prepared equations with a custom configuration.
    pub fn from_equations_with_config(equations: Vec<Equation>, config: SolverConfig) -> Self {
        let indices = (0..equations.len()).collect();
        Self {
            original: equations.clone(),
            equations,
            indices,
            state: SystemState::Constructed,
            config,
        }
    }

    /// Current (possibly reduced) equations.
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Equations as they were before any reduction.
    pub fn original_equations(&self) -> &[Equation] {
        &self.original
    }

    /// Current row-to-column pivot mapping.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of equations.
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// True if the system has no equations.
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Number of variables per equation (taken from the first row).
    pub fn number_of_variables(&self) -> usize {
        self.equations
            .first()
            .map(Equation::number_of_variables)
            .unwrap_or(0)
    }

    /// Solve the system, sending the step trace to the `log` facade.
    pub fn solve(&mut self) -> Result<Vec<f64>> {
        self.solve_with(&mut LogTrace)
    }

    /// Solve the system, reporting every reduction step to `observer`.
    ///
    /// The returned vector is indexed by original variable position. On
    /// success the system holds its reduced form and the final pivot
    /// mapping. A system can only be solved once.
    pub fn solve_with<O>(&mut self, observer: &mut O) -> Result<Vec<f64>>
    where
        O: ReductionObserver + ?Sized,
    {
        if self.state != SystemState::Constructed {
            return Err(SolverError::AlreadySolved);
        }

        let n = self.equations.len();
        if let Some(equation) = self
            .equations
            .iter()
            .find(|eq| eq.number_of_variables() != n)
        {
            return Err(SolverError::dimension_mismatch(
                "variable count (must equal equation count)",
                n,
                equation.number_of_variables(),
            ));
        }

        log::debug!("Reducing {n}x{n} linear system");

        for row in 0..n {
            self.state = SystemState::Reducing { row };
            self.reduce(row)?;
            observer.on_reduction(row, self);
        }

        self.state = SystemState::Reduced;

        Ok(self.back_substitute())
    }

    /// Residuals of `solution` against the reduced equations.
    pub fn calculate_error(&self, solution: &[f64]) -> Result<Vec<f64>> {
        Self::residuals(&self.equations, self.number_of_variables(), solution)
    }

    /// Residuals of `solution` against the equations as constructed.
    pub fn original_residuals(&self, solution: &[f64]) -> Result<Vec<f64>> {
        Self::residuals(&self.original, self.number_of_variables(), solution)
    }

    fn residuals(equations: &[Equation], variables: usize, solution: &[f64]) -> Result<Vec<f64>> {
        if solution.len() != variables {
            return Err(SolverError::dimension_mismatch(
                "solution length",
                variables,
                solution.len(),
            ));
        }

        equations.iter().map(|eq| eq.residual(solution)).collect()
    }

    /// Pick the pivot column for `row` and record it in the index mapping.
    ///
    /// Searches `row`'s own coefficients over the columns referenced by
    /// `indices[row..]`. Only a strictly larger magnitude replaces the
    /// current candidate, so ties keep the earlier slot.
    fn find_pivot_column_index(&mut self, row: usize) -> usize {
        let coefficients = self.equations[row].coefficients();
        let mut ge_index = row;

        for i in (row + 1)..self.indices.len() {
            if coefficients[self.indices[i]].abs() > coefficients[self.indices[ge_index]].abs() {
                ge_index = i;
            }
        }

        self.indices.swap(row, ge_index);
        self.indices[row]
    }

    /// Normalize `row` by its pivot and eliminate the pivot column below it.
    fn reduce(&mut self, row: usize) -> Result<()> {
        let column = self.find_pivot_column_index(row);
        let general_element = self.equations[row].coefficients()[column];

        // Zero and NaN pivots are singular whatever the tolerance
        if general_element == 0.0
            || general_element.is_nan()
            || general_element.abs() <= self.config.pivot_tolerance
        {
            return Err(SolverError::SingularSystem { row, column });
        }

        log::debug!("row {row}: pivot column {column} ({general_element})");

        self.equations[row] = self.equations[row].divide(general_element);

        let (head, tail) = self.equations.split_at_mut(row + 1);
        let pivot = &head[row];
        for equation in tail {
            let factor = equation.coefficients()[column];
            *equation = equation.subtract(&pivot.scale(factor))?;
        }

        Ok(())
    }

    fn back_substitute(&self) -> Vec<f64> {
        let n = self.equations.len();
        let mut solution = vec![0.0; n];

        for row in (0..n).rev() {
            let equation = &self.equations[row];
            let sum: f64 = ((row + 1)..n)
                .map(|j| {
                    let column = self.indices[j];
                    equation.coefficients()[column] * solution[column]
                })
                .sum();

            solution[self.indices[row]] = equation.free_term() - sum;
        }

        solution
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for equation in &self.equations {
            writeln!(f, "{}", equation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{NoTrace, TraceRecorder};
    use approx::assert_abs_diff_eq;

    fn sample() -> LinearSystem {
        LinearSystem::new(
            &[
                [-3.0, 4.0, 1.0, 4.0],
                [0.0, 1.0, -3.0, 2.0],
                [4.0, 0.0, -2.0, -3.0],
                [1000.0, 3.0, 1.0, -5.0],
            ],
            &[-1.0, -1.0, 4.0, -2.0],
        )
        .unwrap()
    }

    #[test]
    fn test_construction() {
        let system = sample();
        assert_eq!(system.len(), 4);
        assert_eq!(system.number_of_variables(), 4);
        assert_eq!(system.indices(), &[0, 1, 2, 3]);
        assert_eq!(system.state(), SystemState::Constructed);
        assert_eq!(system.equations(), system.original_equations());
    }

    #[test]
    fn test_rhs_length_mismatch() {
        let err = LinearSystem::new(&[[1.0, 0.0], [0.0, 1.0]], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            SolverError::DimensionMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_pivot_tie_keeps_first_maximum() {
        // |4| appears in columns 1 and 3, the first one wins
        let mut system = sample();
        assert_eq!(system.find_pivot_column_index(0), 1);
        assert_eq!(system.indices(), &[1, 0, 2, 3]);
    }

    #[test]
    fn test_pivot_searches_along_row() {
        let mut system = LinearSystem::new(
            &[[1.0, -5.0, 2.0], [9.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            &[0.0, 0.0, 0.0],
        )
        .unwrap();
        // Column 0 of row 1 is larger, but only row 0 is searched
        assert_eq!(system.find_pivot_column_index(0), 1);
        assert_eq!(system.indices(), &[1, 0, 2]);
    }

    #[test]
    fn test_solve_sample_system() {
        let mut system = sample();
        let solution = system.solve().unwrap();

        let expected = [
            -0.011145815505733358,
            1.0253080609276055,
            -0.15486479548177307,
            -1.2449512236864624,
        ];
        for (x, e) in solution.iter().zip(expected) {
            assert_abs_diff_eq!(*x, e, epsilon = 1e-12);
        }

        assert_eq!(system.indices(), &[1, 2, 3, 0]);
        assert_eq!(system.state(), SystemState::Reduced);

        for r in system.original_residuals(&solution).unwrap() {
            assert!(r.abs() < 1e-9, "residual {r} too large");
        }
    }

    #[test]
    fn test_reduced_form() {
        let mut system = sample();
        system.solve_with(&mut NoTrace).unwrap();

        let indices = system.indices().to_vec();
        for (row, &column) in indices.iter().enumerate() {
            assert_abs_diff_eq!(system.equations()[row].coefficients()[column], 1.0, epsilon = 1e-12);
            for below in &system.equations()[row + 1..] {
                assert_abs_diff_eq!(below.coefficients()[column], 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_calculate_error_near_zero_and_repeatable() {
        let mut system = sample();
        let solution = system.solve_with(&mut NoTrace).unwrap();

        let first = system.calculate_error(&solution).unwrap();
        let second = system.calculate_error(&solution).unwrap();
        assert_eq!(first, second);
        for r in first {
            assert_abs_diff_eq!(r, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_calculate_error_wrong_length() {
        let system = sample();
        assert!(matches!(
            system.calculate_error(&[1.0, 2.0]),
            Err(SolverError::DimensionMismatch {
                expected: 4,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_simple_two_by_two() {
        // x + y = 3, x - y = 1
        let mut system = LinearSystem::new(&[[1.0, 1.0], [1.0, -1.0]], &[3.0, 1.0]).unwrap();
        let solution = system.solve_with(&mut NoTrace).unwrap();
        assert_abs_diff_eq!(solution[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(solution[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_square_system() {
        let mut system =
            LinearSystem::new(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], &[1.0, 2.0]).unwrap();
        assert!(matches!(
            system.solve_with(&mut NoTrace),
            Err(SolverError::DimensionMismatch {
                expected: 2,
                found: 3,
                ..
            })
        ));
        assert_eq!(system.state(), SystemState::Constructed);
    }

    #[test]
    fn test_zero_row_is_singular() {
        let mut system = LinearSystem::new(&[[0.0, 0.0], [1.0, 2.0]], &[1.0, 2.0]).unwrap();
        assert!(matches!(
            system.solve_with(&mut NoTrace),
            Err(SolverError::SingularSystem { row: 0, column: 0 })
        ));
    }

    #[test]
    fn test_dependent_rows_are_singular() {
        let mut system = LinearSystem::new(&[[1.0, 2.0], [2.0, 4.0]], &[3.0, 6.0]).unwrap();
        let err = system.solve_with(&mut NoTrace).unwrap_err();
        assert!(matches!(err, SolverError::SingularSystem { row: 1, column: 0 }));
    }

    #[test]
    fn test_pivot_tolerance() {
        assert_eq!(SolverConfig::new().with_pivot_tolerance(-1e-9).pivot_tolerance(), 1e-9);

        let mut exact = LinearSystem::new(&[[1e-20]], &[1.0]).unwrap();
        assert_abs_diff_eq!(exact.solve_with(&mut NoTrace).unwrap()[0], 1e20, epsilon = 1e6);

        let config = SolverConfig::new().with_pivot_tolerance(1e-12);
        let mut strict = LinearSystem::with_config(&[[1e-20]], &[1.0], config).unwrap();
        assert!(matches!(
            strict.solve_with(&mut NoTrace),
            Err(SolverError::SingularSystem { row: 0, column: 0 })
        ));
    }

    #[test]
    fn test_invalid_pivot_tolerance_keeps_zero_check() {
        for tolerance in [f64::NAN, f64::INFINITY, -1.0] {
            let config = SolverConfig::new().with_pivot_tolerance(tolerance);
            assert!(config.pivot_tolerance() >= 0.0);

            let mut system =
                LinearSystem::with_config(&[[0.0, 0.0], [1.0, 2.0]], &[1.0, 2.0], config).unwrap();
            assert!(matches!(
                system.solve_with(&mut NoTrace),
                Err(SolverError::SingularSystem { row: 0, column: 0 })
            ));
        }
    }

    #[test]
    fn test_nan_pivot_is_singular() {
        let mut system = LinearSystem::new(&[[f64::NAN]], &[1.0]).unwrap();
        assert!(matches!(
            system.solve_with(&mut NoTrace),
            Err(SolverError::SingularSystem { row: 0, column: 0 })
        ));
    }

    #[test]
    fn test_solve_twice_is_rejected() {
        let mut system = sample();
        system.solve_with(&mut NoTrace).unwrap();
        assert!(matches!(system.solve(), Err(SolverError::AlreadySolved)));
    }

    #[test]
    fn test_trace_recorder() {
        let mut system = sample();
        let mut recorder = TraceRecorder::new();
        system.solve_with(&mut recorder).unwrap();

        assert_eq!(recorder.steps().len(), 4);
        assert_eq!(recorder.steps()[3], system.to_string());
        assert_ne!(recorder.steps()[0], recorder.steps()[3]);
    }

    #[test]
    fn test_closure_observer() {
        let mut system = sample();
        let mut rows = Vec::new();
        let mut states = Vec::new();
        system
            .solve_with(&mut |row: usize, s: &LinearSystem| {
                rows.push(row);
                states.push(s.state());
            })
            .unwrap();

        assert_eq!(rows, vec![0, 1, 2, 3]);
        assert_eq!(states[2], SystemState::Reducing { row: 2 });
    }

    #[test]
    fn test_empty_system() {
        let mut system = LinearSystem::from_equations(Vec::new());
        assert!(system.is_empty());
        assert!(system.solve_with(&mut NoTrace).unwrap().is_empty());
        assert!(system.calculate_error(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_display_one_line_per_equation() {
        let system = sample();
        let text = system.to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("  -3.000   4.000   1.000   4.000 |  -1.000\n"));
    }
}
