use crate::error::ValidationError;

/// A two-variable linear program solved by the graphical method
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicalProblem {
    /// Objective function to optimize
    pub objective: Objective,
    /// Constraints, in addition to the implicit x1 >= 0, x2 >= 0
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    /// Whether to maximize or minimize
    pub sense: Sense,
    /// Coefficients (c1, c2)
    pub coefficients: [f64; 2],
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Max,
    Min,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    /// Coefficients (a1, a2)
    pub coefficients: [f64; 2],
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    #[cfg_attr(feature = "serde", serde(rename = "<=", alias = "le"))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">=", alias = "ge"))]
    Ge,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "=", alias = "eq"))]
    Eq,
}

impl Sense {
    /// True when `candidate` is strictly better than `incumbent`
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Sense::Max => candidate > incumbent,
            Sense::Min => candidate < incumbent,
        }
    }
}

impl Objective {
    pub fn new(sense: Sense, c1: f64, c2: f64) -> Self {
        Self {
            sense,
            coefficients: [c1, c2],
        }
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.coefficients[0] * x + self.coefficients[1] * y
    }
}

impl Constraint {
    pub fn new(a1: f64, a2: f64, op: ConstraintOp, rhs: f64) -> Self {
        Self {
            coefficients: [a1, a2],
            op,
            rhs,
        }
    }

    /// Left-hand side `a1*x + a2*y`
    pub fn lhs(&self, x: f64, y: f64) -> f64 {
        self.coefficients[0] * x + self.coefficients[1] * y
    }
}

impl GraphicalProblem {
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
        }
    }

    pub fn add_constraint(&mut self, a1: f64, a2: f64, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint::new(a1, a2, op, rhs));
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (i, c) in self.objective.coefficients.iter().enumerate() {
            if !c.is_finite() {
                return Err(ValidationError::NonFiniteObjective(i + 1));
            }
        }
        for (index, c) in self.constraints.iter().enumerate() {
            if !c.coefficients.iter().all(|a| a.is_finite()) {
                return Err(ValidationError::NonFiniteConstraint {
                    index,
                    field: "coefficient",
                });
            }
            if !c.rhs.is_finite() {
                return Err(ValidationError::NonFiniteConstraint {
                    index,
                    field: "right-hand side",
                });
            }
        }
        Ok(())
    }
}

/// A capacitated directed network
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FlowProblem {
    /// Node labels, in display order
    pub nodes: Vec<String>,
    /// Directed edges
    pub edges: Vec<FlowEdge>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    pub capacity: f64,
}

impl FlowEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, capacity: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            capacity,
        }
    }
}

impl FlowProblem {
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
            edges: Vec::new(),
        }
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, capacity: f64) {
        self.edges.push(FlowEdge::new(from, to, capacity));
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// A balanced transportation problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TransportationProblem {
    /// Supply available at each source
    pub supply: Vec<f64>,
    /// Demand required at each destination
    pub demand: Vec<f64>,
    /// Unit shipping cost, one row per source
    pub costs: Vec<Vec<f64>>,
}

impl TransportationProblem {
    pub fn new(supply: Vec<f64>, demand: Vec<f64>, costs: Vec<Vec<f64>>) -> Self {
        Self {
            supply,
            demand,
            costs,
        }
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    /// Checks shape, finiteness and balance before any allocation runs
    pub fn validate(&self, tolerance: f64) -> Result<(), ValidationError> {
        if self.supply.is_empty() || self.demand.is_empty() {
            return Err(ValidationError::EmptyTransportation);
        }
        for (index, &value) in self.supply.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidSupply { index, value });
            }
        }
        for (index, &value) in self.demand.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidDemand { index, value });
            }
        }
        if self.costs.len() != self.supply.len() {
            return Err(ValidationError::CostRowCount {
                expected: self.supply.len(),
                found: self.costs.len(),
            });
        }
        for (row, costs) in self.costs.iter().enumerate() {
            if costs.len() != self.demand.len() {
                return Err(ValidationError::CostColumnCount {
                    row,
                    expected: self.demand.len(),
                    found: costs.len(),
                });
            }
            if let Some(column) = costs.iter().position(|c| !c.is_finite()) {
                return Err(ValidationError::NonFiniteCost { row, column });
            }
        }

        let supply = self.total_supply();
        let demand = self.total_demand();
        if (supply - demand).abs() > tolerance {
            return Err(ValidationError::Unbalanced { supply, demand });
        }
        Ok(())
    }
}
