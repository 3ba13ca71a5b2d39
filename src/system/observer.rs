//! Observation of the elimination steps.
//!
//! The solver never writes to an output stream itself. Instead it reports
//! every completed reduction step to a [`ReductionObserver`], which may log
//! it, print it or record it for later.

use super::LinearSystem;

/// Receives the system state after each reduction step.
pub trait ReductionObserver {
    /// Called once `row` has been reduced. `system` holds the partially
    /// reduced equations at that point.
    fn on_reduction(&mut self, row: usize, system: &LinearSystem);
}

impl<F> ReductionObserver for F
where
    F: FnMut(usize, &LinearSystem),
{
    fn on_reduction(&mut self, row: usize, system: &LinearSystem) {
        self(row, system)
    }
}

/// Observer that ignores every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl ReductionObserver for NoTrace {
    fn on_reduction(&mut self, _row: usize, _system: &LinearSystem) {}
}

/// Observer that sends each step to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl ReductionObserver for LogTrace {
    fn on_reduction(&mut self, row: usize, system: &LinearSystem) {
        log::debug!("step {}:\n{}", row + 1, system);
    }
}

/// Observer that keeps the rendered system of every step.
#[derive(Debug, Default, Clone)]
pub struct TraceRecorder {
    steps: Vec<String>,
}

impl TraceRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered systems, one per reduced row, in order.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Consume the recorder and return the recorded steps.
    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }
}

impl ReductionObserver for TraceRecorder {
    fn on_reduction(&mut self, _row: usize, system: &LinearSystem) {
        self.steps.push(system.to_string());
    }
}
