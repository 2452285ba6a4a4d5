//! Residual-capacity model of a directed flow network.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::problem::FlowProblem;

/// Index of a node inside a [`FlowNetwork`]
pub type NodeId = usize;

/// Capacities and flows keyed by ordered node pairs.
///
/// Every edge registers both directions in the adjacency lists so a search
/// can either use forward capacity or cancel flow on the reverse pair.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<NodeId>>,
    capacity: HashMap<(NodeId, NodeId), f64>,
    flow: HashMap<(NodeId, NodeId), f64>,
    /// Distinct input edges in first-seen order
    edges: Vec<(NodeId, NodeId)>,
}

impl FlowNetwork {
    /// Build the network, rejecting unknown nodes and invalid capacities.
    ///
    /// Parallel edges with the same endpoints have their capacities summed.
    pub fn new(problem: &FlowProblem) -> Result<Self, ValidationError> {
        let mut index = HashMap::with_capacity(problem.nodes.len());
        for (id, label) in problem.nodes.iter().enumerate() {
            if index.insert(label.clone(), id).is_some() {
                return Err(ValidationError::DuplicateNode(label.clone()));
            }
        }

        let mut network = Self {
            labels: problem.nodes.clone(),
            index,
            adjacency: vec![Vec::new(); problem.nodes.len()],
            capacity: HashMap::new(),
            flow: HashMap::new(),
            edges: Vec::new(),
        };

        for (i, edge) in problem.edges.iter().enumerate() {
            if !edge.capacity.is_finite() || edge.capacity < 0.0 {
                return Err(ValidationError::InvalidCapacity {
                    index: i,
                    capacity: edge.capacity,
                });
            }
            let u = network.require(i, &edge.from)?;
            let v = network.require(i, &edge.to)?;

            if !network.adjacency[u].contains(&v) {
                network.adjacency[u].push(v);
            }
            if !network.adjacency[v].contains(&u) {
                network.adjacency[v].push(u);
            }

            if !network.edges.contains(&(u, v)) {
                network.edges.push((u, v));
            }
            *network.capacity.entry((u, v)).or_insert(0.0) += edge.capacity;
            network.capacity.entry((v, u)).or_insert(0.0);
        }

        network.flow = network.capacity.keys().map(|&key| (key, 0.0)).collect();
        Ok(network)
    }

    fn require(&self, edge: usize, label: &str) -> Result<NodeId, ValidationError> {
        self.node_id(label).ok_or_else(|| ValidationError::UnknownNode {
            index: edge,
            label: label.to_string(),
        })
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    pub fn label(&self, node: NodeId) -> &str {
        &self.labels[node]
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node]
    }

    /// Distinct input edges as `(from, to)` pairs
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn capacity(&self, u: NodeId, v: NodeId) -> f64 {
        self.capacity.get(&(u, v)).copied().unwrap_or(0.0)
    }

    pub fn flow(&self, u: NodeId, v: NodeId) -> f64 {
        self.flow.get(&(u, v)).copied().unwrap_or(0.0)
    }

    pub fn residual(&self, u: NodeId, v: NodeId) -> f64 {
        self.capacity(u, v) - self.flow(u, v)
    }

    /// Push `amount` along `(u, v)`, mirroring it as negative flow on `(v, u)`
    pub fn push(&mut self, u: NodeId, v: NodeId, amount: f64) {
        *self.flow.entry((u, v)).or_insert(0.0) += amount;
        *self.flow.entry((v, u)).or_insert(0.0) -= amount;
    }

    /// Smallest residual capacity along consecutive pairs of `path`
    pub fn bottleneck(&self, path: &[NodeId]) -> f64 {
        path.windows(2)
            .map(|hop| self.residual(hop[0], hop[1]))
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    pub fn augment(&mut self, path: &[NodeId], amount: f64) {
        for hop in path.windows(2) {
            self.push(hop[0], hop[1], amount);
        }
    }

    /// Nodes reachable from `source` through positive residual capacity
    pub fn reachable_from(&self, source: NodeId) -> Vec<bool> {
        let mut seen = vec![false; self.node_count()];
        seen[source] = true;
        let mut stack = vec![source];
        while let Some(u) = stack.pop() {
            for &v in self.neighbors(u) {
                if !seen[v] && self.residual(u, v) > 0.0 {
                    seen[v] = true;
                    stack.push(v);
                }
            }
        }
        seen
    }
}
