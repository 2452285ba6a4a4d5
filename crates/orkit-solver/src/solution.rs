/// A point in the (x1, x2) plane
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates differ by less than `tolerance`
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

/// The result of solving a two-variable LP graphically
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct GraphicalSolution {
    /// Optimal, infeasible or unbounded
    pub outcome: LpOutcome,
    /// Unique feasible vertices, in discovery order
    pub vertices: Vec<Point>,
    /// Objective value at each vertex
    pub evaluations: Vec<VertexEvaluation>,
    /// Vertices ordered by angle around their centroid, for drawing the region
    pub polygon: Vec<Point>,
    /// Sampled boundary line of each constraint
    pub boundary_lines: Vec<BoundaryLine>,
    /// Grid samples lying inside the feasible region
    pub feasible_region: Vec<Point>,
    /// Upper bound of the plotting window on the x1 axis
    pub max_x: f64,
    /// Upper bound of the plotting window on the x2 axis
    pub max_y: f64,
    /// Human-readable trace of the solve
    pub steps: Vec<String>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LpOutcome {
    /// An optimal vertex was found
    Optimal { point: Point, value: f64 },
    /// No point satisfies every constraint
    Infeasible,
    /// The objective improves without limit along `ray`
    Unbounded { ray: Point },
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexEvaluation {
    pub point: Point,
    /// Objective value at `point`
    pub value: f64,
    /// Whether this is the reported optimum
    pub optimal: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLine {
    /// Index of the constraint this line belongs to
    pub constraint: usize,
    pub points: Vec<Point>,
}

impl GraphicalSolution {
    pub fn optimal_point(&self) -> Option<Point> {
        match self.outcome {
            LpOutcome::Optimal { point, .. } => Some(point),
            _ => None,
        }
    }

    pub fn optimal_value(&self) -> Option<f64> {
        match self.outcome {
            LpOutcome::Optimal { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self.outcome, LpOutcome::Optimal { .. })
    }
}

/// The result of a maximum-flow run
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct FlowSolution {
    /// Total flow pushed from source to sink
    pub max_flow: f64,
    /// Augmenting paths in the order they were used
    pub paths: Vec<AugmentingPath>,
    /// Whether the search ran dry or hit the iteration cap
    pub termination: FlowTermination,
    /// Final flow on each input edge
    pub edge_flows: Vec<EdgeFlow>,
    /// Minimum cut certificate, present only on convergence
    pub min_cut: Option<MinCut>,
    /// Human-readable trace of the solve
    pub steps: Vec<String>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTermination {
    /// No augmenting path remains; the flow is maximum
    Converged,
    /// The iteration cap stopped the search while augmenting paths remained
    IterationCapReached,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentingPath {
    /// Node labels from source to sink
    pub nodes: Vec<String>,
    /// Bottleneck flow pushed along the path
    pub flow: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeFlow {
    pub from: String,
    pub to: String,
    pub capacity: f64,
    pub flow: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MinCut {
    /// Nodes reachable from the source in the final residual graph
    pub source_side: Vec<String>,
    /// Total capacity of edges leaving `source_side`
    pub capacity: f64,
}

impl FlowSolution {
    pub fn is_converged(&self) -> bool {
        self.termination == FlowTermination::Converged
    }
}

/// The northwest-corner allocation of a transportation problem
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct TransportationSolution {
    /// Quantity shipped from each source (row) to each destination (column)
    pub allocation: Vec<Vec<f64>>,
    /// Sum of quantity times unit cost over all cells
    pub total_cost: f64,
    /// Cells visited by the northwest-corner walk, in order
    pub cells: Vec<AllocationCell>,
    /// Human-readable trace of the solve
    pub steps: Vec<String>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationCell {
    pub source: usize,
    pub destination: usize,
    pub quantity: f64,
    /// Unit cost of the cell
    pub unit_cost: f64,
}

impl TransportationSolution {
    /// Total quantity leaving source `i`
    pub fn shipped_from(&self, i: usize) -> f64 {
        self.allocation.get(i).map(|row| row.iter().sum()).unwrap_or(0.0)
    }

    /// Total quantity arriving at destination `j`
    pub fn shipped_to(&self, j: usize) -> f64 {
        self.allocation.iter().filter_map(|row| row.get(j)).sum()
    }

    pub fn total_shipped(&self) -> f64 {
        self.allocation.iter().flatten().sum()
    }
}
