mod error;
pub mod feasibility;
mod graphical;
mod maxflow;
pub mod network;
mod problem;
mod search;
mod solution;
mod transport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::ValidationError;
pub use feasibility::{EPSILON, is_feasible, is_feasible_within};
pub use graphical::{GraphicalSolver, solve_graphical_method};
pub use maxflow::{MaxFlowSolver, solve_max_flow};
pub use network::{FlowNetwork, NodeId};
pub use problem::{
    Constraint, ConstraintOp, FlowEdge, FlowProblem, GraphicalProblem, Objective, Sense,
    TransportationProblem,
};
pub use search::SearchStrategy;
pub use solution::{
    AllocationCell, AugmentingPath, BoundaryLine, EdgeFlow, FlowSolution, FlowTermination,
    GraphicalSolution, LpOutcome, MinCut, Point, TransportationSolution, VertexEvaluation,
};
pub use transport::{TransportationSolver, solve_transportation};
