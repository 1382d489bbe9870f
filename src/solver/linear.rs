//! Dense linear solve.

use crate::error::{CircuitError, Result};

use super::DEFAULT_PIVOT_TOLERANCE;

/// Solves a square system Ax = b.
///
/// `a` is row-major with `n * n` entries and `b` has `n` entries.
/// Implementations must return the unique solution or fail with
/// [`CircuitError::SingularMatrix`]; they never return a partial vector.
pub trait LinearSolver {
    fn solve(&self, a: &[f64], b: &[f64], n: usize) -> Result<Vec<f64>>;
}

/// LU decomposition with partial pivoting.
///
/// Singularity is judged per row: a pivot is rejected when it is at or below
/// `pivot_tolerance` times the largest magnitude of the original row it came
/// from. The test is independent of the overall scale of the system, so a
/// network of 1e16 Ω resistors solves as well as one of 1 kΩ resistors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuSolver {
    /// Relative pivot threshold
    pub pivot_tolerance: f64,
}

impl Default for LuSolver {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl LuSolver {
    /// Create a solver with a custom pivot tolerance.
    pub fn with_pivot_tolerance(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }

    /// Factor `lu` in place, recording row swaps in `pivots`.
    fn factor(&self, lu: &mut [f64], pivots: &mut [usize], n: usize) -> Result<()> {
        for (i, p) in pivots.iter_mut().enumerate() {
            *p = i;
        }

        // Largest magnitude of each original row, permuted along with the rows
        let mut row_scale: Vec<f64> = (0..n)
            .map(|i| lu[i * n..(i + 1) * n].iter().fold(0.0_f64, |m, v| m.max(v.abs())))
            .collect();

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val.is_nan() || max_val <= self.pivot_tolerance * row_scale[max_row] {
                return Err(CircuitError::SingularMatrix);
            }

            // Swap rows if needed
            if max_row != k {
                pivots.swap(k, max_row);
                row_scale.swap(k, max_row);
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        Ok(())
    }
}

impl LinearSolver for LuSolver {
    fn solve(&self, a: &[f64], b: &[f64], n: usize) -> Result<Vec<f64>> {
        debug_assert_eq!(a.len(), n * n, "matrix must be n x n");
        debug_assert_eq!(b.len(), n, "rhs must have n entries");

        let mut lu = a.to_vec();
        let mut pivots = vec![0; n];
        self.factor(&mut lu, &mut pivots, n)?;

        // Apply pivot permutation to b
        let mut x: Vec<f64> = pivots.iter().map(|&p| b[p]).collect();

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                x[i] -= lu[i * n + j] * x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= lu[i * n + j] * x[j];
            }
            x[i] /= lu[i * n + i];
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(CircuitError::SingularMatrix);
        }

        Ok(x)
    }
}
