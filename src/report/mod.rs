//! Console report for the CLI frontend.
//!
//! Prints the initial system, the reduced system after every step, the
//! solution and the residual vector.

use std::io::{self, Write};

use crate::error::{Result, SolverError};
use crate::system::{LinearSystem, LogTrace, ReductionObserver};

/// Render a vector as `{ a, b, c }`.
pub fn format_vector(values: &[f64]) -> String {
    if values.is_empty() {
        return "{ }".to_string();
    }

    let items = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {items} }}")
}

/// Observer that prints each reduction step to a writer.
pub struct StepPrinter<W: Write> {
    out: W,
    /// First write failure, reported once solving is done
    error: Option<io::Error>,
}

impl<W: Write> StepPrinter<W> {
    /// Create a new step printer.
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Finish printing, surfacing any write failure.
    pub fn finish(self) -> Result<W> {
        match self.error {
            Some(e) => Err(SolverError::output(e.to_string())),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> ReductionObserver for StepPrinter<W> {
    fn on_reduction(&mut self, row: usize, system: &LinearSystem) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{} step:\n\n{}", row + 1, system) {
            self.error = Some(e);
        }
    }
}

/// Solve `system` and write the full report to `out`.
///
/// With `trace` disabled only the initial system, solution and error are
/// printed; the steps still go to the `log` facade at debug level.
pub fn run<W: Write>(system: &mut LinearSystem, trace: bool, mut out: W) -> Result<()> {
    writeln!(out, "Initial linear system:\n\n{}", system).map_err(output_error)?;

    let solution = if trace {
        writeln!(out, "Reducing linear system:\n").map_err(output_error)?;
        let mut printer = StepPrinter::new(&mut out);
        let solution = system.solve_with(&mut printer)?;
        printer.finish()?;
        solution
    } else {
        system.solve_with(&mut LogTrace)?
    };

    let error = system.calculate_error(&solution)?;

    writeln!(out, "Solution:\n{}", format_vector(&solution)).map_err(output_error)?;
    writeln!(out, "Error:\n{}", format_vector(&error)).map_err(output_error)?;
    out.flush().map_err(output_error)
}

fn output_error(e: io::Error) -> SolverError {
    SolverError::output(e.to_string())
}
