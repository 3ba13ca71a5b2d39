//! Text description of a linear system.
//!
//! One equation per line: the coefficients separated by whitespace, a `|`,
//! then the free term. Blank lines are skipped and `#` or `;` start a
//! comment that runs to the end of the line.
//!
//! # Example
//!
//! ```text
//! # 4x4 demonstration system
//!   -3  4   1   4 | -1
//!    0  1  -3   2 | -1
//!    4  0  -2  -3 |  4
//! 1000  3   1  -5 | -2
//! ```

mod parser;

pub use parser::Parser;

use crate::error::Result;
use crate::system::Equation;

/// Parse a system description string into equations.
pub fn parse(input: &str) -> Result<Vec<Equation>> {
    Parser::new(input).parse()
}

/// Parse a system description file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Vec<Equation>> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::SolverError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// The built-in demonstration system.
pub fn sample_equations() -> Vec<Equation> {
    vec![
        Equation::new(vec![-3.0, 4.0, 1.0, 4.0], -1.0),
        Equation::new(vec![0.0, 1.0, -3.0, 2.0], -1.0),
        Equation::new(vec![4.0, 0.0, -2.0, -3.0], 4.0),
        Equation::new(vec![1000.0, 3.0, 1.0, -5.0], -2.0),
    ]
}
