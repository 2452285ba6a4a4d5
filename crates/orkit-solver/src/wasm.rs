//! WASM bindings for the orkit solvers
//!
//! Each entry point takes a plain JavaScript object shaped like the
//! corresponding problem type and returns the solution as a JavaScript
//! object. Validation failures come back as string errors.

use wasm_bindgen::prelude::*;

use crate::{
    FlowProblem, GraphicalProblem, GraphicalSolver, LpOutcome, MaxFlowSolver, SearchStrategy,
    TransportationProblem, TransportationSolver,
};

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Solve a two-variable LP by the graphical method
#[wasm_bindgen]
pub fn solve_graphical_method(problem: JsValue) -> Result<JsValue, JsValue> {
    let problem: GraphicalProblem = serde_wasm_bindgen::from_value(problem).map_err(to_js_error)?;
    let solution = GraphicalSolver::new().solve(&problem).map_err(to_js_error)?;

    let (status, optimal_point, optimal_value, unbounded_ray) = match solution.outcome {
        LpOutcome::Optimal { point, value } => ("optimal", Some([point.x, point.y]), Some(value), None),
        LpOutcome::Infeasible => ("infeasible", None, None, None),
        LpOutcome::Unbounded { ray } => ("unbounded", None, None, Some([ray.x, ray.y])),
    };

    let result = GraphicalResult {
        status: status.to_string(),
        optimal_point,
        optimal_value,
        unbounded_ray,
        vertices: solution.vertices.iter().map(|p| [p.x, p.y]).collect(),
        sorted_vertices: solution.polygon.iter().map(|p| [p.x, p.y]).collect(),
        evaluations: solution
            .evaluations
            .iter()
            .map(|e| VertexRow {
                x: e.point.x,
                y: e.point.y,
                z: e.value,
                optimal: e.optimal,
            })
            .collect(),
        constraint_lines: solution
            .boundary_lines
            .iter()
            .map(|line| {
                line.points
                    .iter()
                    .map(|p| LinePoint {
                        x: p.x,
                        y: p.y,
                        constraint: line.constraint,
                    })
                    .collect()
            })
            .collect(),
        feasible_region: solution.feasible_region.iter().map(|p| [p.x, p.y]).collect(),
        max_x: solution.max_x,
        max_y: solution.max_y,
        steps: solution.steps,
    };

    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}

/// Solve a maximum-flow problem.
///
/// `strategy` is `"ford-fulkerson"` or `"edmonds-karp"`; `max_iterations`
/// defaults to 10 when omitted.
#[wasm_bindgen]
pub fn solve_max_flow(problem: JsValue, strategy: &str, max_iterations: Option<u32>) -> Result<JsValue, JsValue> {
    let problem: FlowProblem = serde_wasm_bindgen::from_value(problem).map_err(to_js_error)?;
    let strategy: SearchStrategy =
        serde_wasm_bindgen::from_value(JsValue::from_str(strategy)).map_err(to_js_error)?;

    let mut solver = MaxFlowSolver::new().with_strategy(strategy);
    if let Some(max) = max_iterations {
        solver = solver.with_max_iterations(max as usize);
    }
    let solution = solver.solve(&problem).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&solution).map_err(to_js_error)
}

/// Allocate a balanced transportation problem by the northwest-corner method
#[wasm_bindgen]
pub fn solve_transportation(problem: JsValue) -> Result<JsValue, JsValue> {
    let problem: TransportationProblem = serde_wasm_bindgen::from_value(problem).map_err(to_js_error)?;
    let solution = TransportationSolver::new().solve(&problem).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&solution).map_err(to_js_error)
}

#[derive(serde::Serialize)]
struct GraphicalResult {
    status: String,
    optimal_point: Option<[f64; 2]>,
    optimal_value: Option<f64>,
    unbounded_ray: Option<[f64; 2]>,
    vertices: Vec<[f64; 2]>,
    sorted_vertices: Vec<[f64; 2]>,
    evaluations: Vec<VertexRow>,
    constraint_lines: Vec<Vec<LinePoint>>,
    feasible_region: Vec<[f64; 2]>,
    max_x: f64,
    max_y: f64,
    steps: Vec<String>,
}

#[derive(serde::Serialize)]
struct VertexRow {
    x: f64,
    y: f64,
    z: f64,
    optimal: bool,
}

#[derive(serde::Serialize)]
struct LinePoint {
    x: f64,
    y: f64,
    constraint: usize,
}
