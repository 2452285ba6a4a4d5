use thiserror::Error;

/// Malformed input, reported before any solver runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Objective coefficient c{0} is not a finite number")]
    NonFiniteObjective(usize),
    #[error("Constraint {index} has a non-finite {field}")]
    NonFiniteConstraint { index: usize, field: &'static str },
    #[error("Sampling step must be positive, got {0}")]
    InvalidSamplingStep(f64),
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),
    #[error("Edge {index} references unknown node: {label}")]
    UnknownNode { index: usize, label: String },
    #[error("Edge {index} has invalid capacity {capacity}")]
    InvalidCapacity { index: usize, capacity: f64 },
    #[error("Network has no {role} node '{label}'")]
    MissingTerminal { role: &'static str, label: String },
    #[error("Source and sink must be different nodes, both are '{0}'")]
    SameTerminals(String),
    #[error("Transportation problem needs at least one source and one destination")]
    EmptyTransportation,
    #[error("Supply at source {index} must be a non-negative number, got {value}")]
    InvalidSupply { index: usize, value: f64 },
    #[error("Demand at destination {index} must be a non-negative number, got {value}")]
    InvalidDemand { index: usize, value: f64 },
    #[error("Cost matrix has {found} rows, expected {expected}")]
    CostRowCount { expected: usize, found: usize },
    #[error("Cost row {row} has {found} columns, expected {expected}")]
    CostColumnCount { row: usize, expected: usize, found: usize },
    #[error("Cost at ({row}, {column}) is not a finite number")]
    NonFiniteCost { row: usize, column: usize },
    #[error("Total supply {supply} does not equal total demand {demand}")]
    Unbalanced { supply: f64, demand: f64 },
}
