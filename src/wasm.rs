//! WASM bindings for Gauss Solver.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLinearSystem } from 'gauss_solver';
//!
//! await init();
//!
//! // Row-major 2x2 matrix and right-hand side
//! const system = new WasmLinearSystem([2, 1, 1, 3], [3, 5]);
//! const solution = system.solve();
//! const error = system.calculate_error(solution);
//! console.log(system.render());
//! ```

use wasm_bindgen::prelude::*;

use crate::input;
use crate::system::{LinearSystem, NoTrace};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: crate::error::SolverError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible linear system.
#[wasm_bindgen]
pub struct WasmLinearSystem {
    system: LinearSystem,
}

#[wasm_bindgen]
impl WasmLinearSystem {
    /// Create a system from a flattened row-major N x N matrix and a
    /// length-N right-hand side.
    #[wasm_bindgen(constructor)]
    pub fn new(matrix: &[f64], rhs: &[f64]) -> Result<WasmLinearSystem, JsValue> {
        let n = rhs.len();
        if matrix.len() != n * n {
            return Err(JsValue::from_str(&format!(
                "Matrix must have {} elements for {} equations, got {}",
                n * n,
                n,
                matrix.len()
            )));
        }

        let rows: Vec<&[f64]> = if n == 0 {
            Vec::new()
        } else {
            matrix.chunks(n).collect()
        };
        let system = LinearSystem::new(&rows, rhs).map_err(to_js)?;

        Ok(WasmLinearSystem { system })
    }

    /// Create a system from its text description.
    #[wasm_bindgen]
    pub fn from_text(source: &str) -> Result<WasmLinearSystem, JsValue> {
        let equations = input::parse(source).map_err(to_js)?;
        Ok(WasmLinearSystem {
            system: LinearSystem::from_equations(equations),
        })
    }

    /// Solve the system. Can only be called once.
    #[wasm_bindgen]
    pub fn solve(&mut self) -> Result<Vec<f64>, JsValue> {
        self.system.solve_with(&mut NoTrace).map_err(to_js)
    }

    /// Residuals of `solution` against the reduced equations.
    #[wasm_bindgen]
    pub fn calculate_error(&self, solution: &[f64]) -> Result<Vec<f64>, JsValue> {
        self.system.calculate_error(solution).map_err(to_js)
    }

    /// Current equations as fixed-width text.
    #[wasm_bindgen]
    pub fn render(&self) -> String {
        self.system.to_string()
    }

    /// Current pivot mapping.
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> {
        self.system.indices().iter().map(|&i| i as u32).collect()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
