use log::{debug, info};

use crate::error::ValidationError;
use crate::feasibility::{EPSILON, is_feasible_within};
use crate::problem::{Constraint, ConstraintOp, GraphicalProblem, Objective, Sense};
use crate::solution::{BoundaryLine, GraphicalSolution, LpOutcome, Point, VertexEvaluation};

/// Direction tests use exact geometry, not the user-facing tolerance
const RAY_TOLERANCE: f64 = 1e-9;

/// Graphical-method solver for linear programs in two variables
pub struct GraphicalSolver {
    /// Tolerance for feasibility, deduplication and parallel lines
    tolerance: f64,
    /// Margin added to the plotting window on both axes
    padding: f64,
    /// x spacing of boundary-line samples
    line_step: f64,
    /// Spacing of the feasibility grid
    grid_step: f64,
    /// Upper limit on samples per axis; the step widens past it
    max_axis_samples: usize,
}

impl Default for GraphicalSolver {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            padding: 2.0,
            line_step: 0.5,
            grid_step: 0.2,
            max_axis_samples: 1000,
        }
    }
}

impl GraphicalSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_line_step(mut self, step: f64) -> Self {
        self.line_step = step;
        self
    }

    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = step;
        self
    }

    pub fn with_max_axis_samples(mut self, max: usize) -> Self {
        self.max_axis_samples = max.max(1);
        self
    }

    /// Solve by enumerating the vertices of the feasible region
    pub fn solve(&self, problem: &GraphicalProblem) -> Result<GraphicalSolution, ValidationError> {
        problem.validate()?;
        for step in [self.line_step, self.grid_step] {
            if !(step > 0.0 && step.is_finite()) {
                return Err(ValidationError::InvalidSamplingStep(step));
            }
        }

        let constraints = &problem.constraints;
        let objective = &problem.objective;
        let (max_x, max_y) = self.bounds(constraints);

        let boundary_lines = self.boundary_lines(constraints, max_x, max_y);
        let feasible_region = self.sample_region(constraints, max_x, max_y);
        let vertices = self.find_vertices(constraints);
        debug!("found {} feasible vertices: {:?}", vertices.len(), vertices);

        // Ties go to the first vertex in angle order
        let polygon = sort_around_centroid(&vertices);
        let outcome = self.optimize(objective, constraints, &polygon);
        info!("graphical method outcome: {:?}", outcome);

        let optimal = match outcome {
            LpOutcome::Optimal { point, .. } => Some(point),
            _ => None,
        };
        let evaluations: Vec<VertexEvaluation> = vertices
            .iter()
            .map(|&point| VertexEvaluation {
                point,
                value: objective.evaluate(point.x, point.y),
                optimal: optimal.is_some_and(|o| o.approx_eq(&point, self.tolerance)),
            })
            .collect();

        let mut steps = Vec::new();
        steps.push(format!(
            "Plot {} constraint boundaries over [0, {:.2}] x [0, {:.2}]",
            constraints.len(),
            max_x,
            max_y
        ));
        steps.push(format!(
            "Identify the feasible region ({} grid samples inside)",
            feasible_region.len()
        ));
        steps.push(format!("Find the vertices of the feasible region: {} found", vertices.len()));
        for (k, e) in evaluations.iter().enumerate() {
            steps.push(format!(
                "  V{} = ({:.2}, {:.2}): Z = {:.2}",
                k + 1,
                e.point.x,
                e.point.y,
                e.value
            ));
        }
        steps.push(match outcome {
            LpOutcome::Optimal { point, value } => format!(
                "Select the best vertex: ({:.2}, {:.2}) with Z = {:.2}",
                point.x, point.y, value
            ),
            LpOutcome::Infeasible => "No point satisfies every constraint: the problem is infeasible".to_string(),
            LpOutcome::Unbounded { ray } => format!(
                "Z improves without limit along direction ({:.3}, {:.3}): the problem is unbounded",
                ray.x, ray.y
            ),
        });

        Ok(GraphicalSolution {
            outcome,
            vertices,
            evaluations,
            polygon,
            boundary_lines,
            feasible_region,
            max_x,
            max_y,
            steps,
        })
    }

    /// Plotting window: the largest `rhs / |coefficient|` per axis plus padding
    fn bounds(&self, constraints: &[Constraint]) -> (f64, f64) {
        let axis = |k: usize| {
            constraints
                .iter()
                .map(|c| {
                    let a = c.coefficients[k];
                    let denominator = if a == 0.0 { 1.0 } else { a.abs() };
                    c.rhs / denominator
                })
                // Tiny coefficients can overflow the ratio
                .filter(|ratio| ratio.is_finite())
                .reduce(f64::max)
                .unwrap_or(0.0)
                + self.padding
        };
        (axis(0), axis(1))
    }

    fn find_vertices(&self, constraints: &[Constraint]) -> Vec<Point> {
        let mut candidates = vec![Point::ORIGIN];

        for c in constraints {
            let [a1, a2] = c.coefficients;
            if a1 != 0.0 {
                let x = c.rhs / a1;
                if x >= 0.0 {
                    candidates.push(Point::new(x, 0.0));
                }
            }
            if a2 != 0.0 {
                let y = c.rhs / a2;
                if y >= 0.0 {
                    candidates.push(Point::new(0.0, y));
                }
            }
        }

        for (i, first) in constraints.iter().enumerate() {
            for second in &constraints[i + 1..] {
                if let Some(p) = self.intersection(first, second) {
                    if p.x >= 0.0 && p.y >= 0.0 {
                        candidates.push(p);
                    }
                }
            }
        }

        let mut vertices: Vec<Point> = Vec::new();
        for p in candidates {
            if !is_feasible_within(p.x, p.y, constraints, self.tolerance) {
                continue;
            }
            if !vertices.iter().any(|v| v.approx_eq(&p, self.tolerance)) {
                vertices.push(p);
            }
        }
        vertices
    }

    /// Intersection of two boundary lines by Cramer's rule
    fn intersection(&self, first: &Constraint, second: &Constraint) -> Option<Point> {
        let [a1, b1] = first.coefficients;
        let [a2, b2] = second.coefficients;
        let (c1, c2) = (first.rhs, second.rhs);

        let det = a1 * b2 - a2 * b1;
        if det.abs() < self.tolerance {
            return None;
        }

        let x = (c1 * b2 - c2 * b1) / det;
        let y = (a1 * c2 - a2 * c1) / det;
        Some(Point::new(snap(x), snap(y)))
    }

    fn optimize(&self, objective: &Objective, constraints: &[Constraint], vertices: &[Point]) -> LpOutcome {
        if vertices.is_empty() {
            return LpOutcome::Infeasible;
        }
        if let Some(ray) = improving_ray(objective, constraints) {
            return LpOutcome::Unbounded { ray };
        }

        let mut best: Option<(Point, f64)> = None;
        for &p in vertices {
            let value = objective.evaluate(p.x, p.y);
            match best {
                Some((_, incumbent)) if !objective.sense.improves(value, incumbent) => {}
                _ => best = Some((p, value)),
            }
        }

        match best {
            Some((point, value)) => LpOutcome::Optimal { point, value },
            None => LpOutcome::Infeasible,
        }
    }

    fn boundary_lines(&self, constraints: &[Constraint], max_x: f64, max_y: f64) -> Vec<BoundaryLine> {
        constraints
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let [a1, a2] = c.coefficients;
                let points = if a2 != 0.0 {
                    self.samples(max_x, self.line_step)
                        .map(|x| Point::new(x, (c.rhs - a1 * x) / a2))
                        .filter(|p| p.y >= 0.0 && p.y <= max_y)
                        .collect()
                } else if a1 != 0.0 {
                    // Vertical line x = rhs / a1
                    let x = c.rhs / a1;
                    if (0.0..=max_x).contains(&x) {
                        self.samples(max_y, self.line_step).map(|y| Point::new(x, y)).collect()
                    } else {
                        Vec::new()
                    }
                } else {
                    Vec::new()
                };
                BoundaryLine {
                    constraint: index,
                    points,
                }
            })
            .collect()
    }

    fn sample_region(&self, constraints: &[Constraint], max_x: f64, max_y: f64) -> Vec<Point> {
        let mut region = Vec::new();
        for x in self.samples(max_x, self.grid_step) {
            for y in self.samples(max_y, self.grid_step) {
                if is_feasible_within(x, y, constraints, self.tolerance) {
                    region.push(Point::new(x, y));
                }
            }
        }
        region
    }

    /// Evenly spaced values in `[0, max]`
    fn samples(&self, max: f64, step: f64) -> impl Iterator<Item = f64> + use<> {
        let mut step = step;
        let count = if !(max >= 0.0 && max.is_finite()) {
            None
        } else {
            let mut count = (max / step + RAY_TOLERANCE).floor() as usize;
            if count > self.max_axis_samples {
                count = self.max_axis_samples;
                step = max / count as f64;
            }
            Some(count)
        };
        count.into_iter().flat_map(move |n| (0..=n).map(move |k| k as f64 * step))
    }
}

/// Clears floating-point noise around zero left by Cramer's rule
fn snap(value: f64) -> f64 {
    if value.abs() < RAY_TOLERANCE { 0.0 } else { value }
}

/// A recession direction of the feasible region along which the objective
/// strictly improves, if any.
///
/// Extreme rays of the recession cone lie on an axis or on the line through
/// the origin parallel to some constraint boundary, so those are the only
/// candidates checked.
fn improving_ray(objective: &Objective, constraints: &[Constraint]) -> Option<Point> {
    let mut candidates = vec![Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
    for c in constraints {
        let [a1, a2] = c.coefficients;
        let norm = a1.hypot(a2);
        if norm > 0.0 {
            candidates.push(Point::new(snap(a2 / norm), snap(-a1 / norm)));
            candidates.push(Point::new(snap(-a2 / norm), snap(a1 / norm)));
        }
    }

    candidates.into_iter().find(|d| {
        if d.x < 0.0 || d.y < 0.0 {
            return false;
        }
        let recedes = constraints.iter().all(|c| {
            let along = c.lhs(d.x, d.y);
            match c.op {
                ConstraintOp::Le => along <= RAY_TOLERANCE,
                ConstraintOp::Ge => along >= -RAY_TOLERANCE,
                ConstraintOp::Eq => along.abs() <= RAY_TOLERANCE,
            }
        });
        let gain = objective.evaluate(d.x, d.y);
        let improves = match objective.sense {
            Sense::Max => gain > RAY_TOLERANCE,
            Sense::Min => gain < -RAY_TOLERANCE,
        };
        recedes && improves
    })
}

/// Orders vertices by ascending angle around their centroid
fn sort_around_centroid(vertices: &[Point]) -> Vec<Point> {
    let mut sorted = vertices.to_vec();
    if sorted.len() <= 2 {
        return sorted;
    }

    let n = sorted.len() as f64;
    let cx = sorted.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = sorted.iter().map(|p| p.y).sum::<f64>() / n;
    let angle = |p: &Point| (p.y - cy).atan2(p.x - cx);
    sorted.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
    sorted
}

/// Solve `sense c1*x1 + c2*x2` subject to `constraints` with default settings
pub fn solve_graphical_method(
    sense: Sense,
    c1: f64,
    c2: f64,
    constraints: &[Constraint],
) -> Result<GraphicalSolution, ValidationError> {
    let problem = GraphicalProblem {
        objective: Objective::new(sense, c1, c2),
        constraints: constraints.to_vec(),
    };
    GraphicalSolver::new().solve(&problem)
}
