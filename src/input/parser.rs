//! Line parser for system descriptions.

use crate::error::{Result, SolverError};
use crate::system::Equation;

/// Separator between coefficients and the free term.
const SEPARATOR: char = '|';

/// Parser over a system description.
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Parse every equation in the input.
    ///
    /// All rows must have the same number of coefficients as the first one.
    pub fn parse(&self) -> Result<Vec<Equation>> {
        let mut equations: Vec<Equation> = Vec::new();

        for (i, raw) in self.input.lines().enumerate() {
            let line = i + 1;
            let content = strip_comment(raw).trim();
            if content.is_empty() {
                continue;
            }

            let equation = parse_equation(line, content)?;

            if let Some(first) = equations.first() {
                if first.number_of_variables() != equation.number_of_variables() {
                    return Err(SolverError::parse(
                        line,
                        format!(
                            "expected {} coefficients, found {}",
                            first.number_of_variables(),
                            equation.number_of_variables()
                        ),
                    ));
                }
            }

            equations.push(equation);
        }

        if equations.is_empty() {
            let last_line = self.input.lines().count().max(1);
            return Err(SolverError::parse(last_line, "system has no equations"));
        }

        Ok(equations)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(['#', ';']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_equation(line: usize, content: &str) -> Result<Equation> {
    let (lhs, rhs) = content
        .split_once(SEPARATOR)
        .ok_or_else(|| SolverError::parse(line, format!("missing '{SEPARATOR}' before free term")))?;

    let coefficients = lhs
        .split_whitespace()
        .map(|token| parse_number(line, token))
        .collect::<Result<Vec<_>>>()?;

    if coefficients.is_empty() {
        return Err(SolverError::parse(line, "equation has no coefficients"));
    }

    let mut terms = rhs.split_whitespace();
    let free_term = match (terms.next(), terms.next()) {
        (Some(token), None) => parse_number(line, token)?,
        (None, _) => return Err(SolverError::parse(line, "missing free term")),
        (Some(_), Some(extra)) => {
            return Err(SolverError::parse(
                line,
                format!("unexpected '{extra}' after free term"),
            ))
        }
    };

    Ok(Equation::new(coefficients, free_term))
}

fn parse_number(line: usize, token: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(SolverError::parse(line, format!("non-finite number '{token}'"))),
        Err(_) => Err(SolverError::parse(line, format!("invalid number '{token}'"))),
    }
}
