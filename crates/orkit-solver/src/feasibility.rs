//! Point-in-region test for two-variable constraint sets.

use crate::problem::{Constraint, ConstraintOp};

/// Tolerance used for feasibility, deduplication and parallel-line checks
pub const EPSILON: f64 = 1e-3;

/// Whether `(x, y)` lies in the feasible region, using [`EPSILON`]
pub fn is_feasible(x: f64, y: f64, constraints: &[Constraint]) -> bool {
    is_feasible_within(x, y, constraints, EPSILON)
}

/// Whether `(x, y)` satisfies non-negativity and every constraint.
///
/// The tolerance widens `<=` and `>=` in the permissive direction;
/// `=` requires `|lhs - rhs| < tolerance`.
pub fn is_feasible_within(x: f64, y: f64, constraints: &[Constraint], tolerance: f64) -> bool {
    if x < 0.0 || y < 0.0 {
        return false;
    }
    constraints.iter().all(|c| c.is_satisfied_by(x, y, tolerance))
}

impl Constraint {
    pub fn is_satisfied_by(&self, x: f64, y: f64, tolerance: f64) -> bool {
        let lhs = self.lhs(x, y);
        match self.op {
            ConstraintOp::Le => lhs <= self.rhs + tolerance,
            ConstraintOp::Ge => lhs >= self.rhs - tolerance,
            ConstraintOp::Eq => (lhs - self.rhs).abs() < tolerance,
        }
    }
}
