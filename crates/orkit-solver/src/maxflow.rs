use log::{debug, info, warn};

use crate::error::ValidationError;
use crate::network::{FlowNetwork, NodeId};
use crate::problem::{FlowEdge, FlowProblem};
use crate::search::SearchStrategy;
use crate::solution::{AugmentingPath, EdgeFlow, FlowSolution, FlowTermination, MinCut};

/// Augmenting-path maximum flow solver
pub struct MaxFlowSolver {
    /// Path search used on every round
    strategy: SearchStrategy,
    /// Maximum augmentations before giving up
    max_iterations: usize,
    source: String,
    sink: String,
}

impl Default for MaxFlowSolver {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            max_iterations: 10,
            source: "S".to_string(),
            sink: "T".to_string(),
        }
    }
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_terminals(mut self, source: impl Into<String>, sink: impl Into<String>) -> Self {
        self.source = source.into();
        self.sink = sink.into();
        self
    }

    /// Push flow along augmenting paths until none remain or the cap is hit
    pub fn solve(&self, problem: &FlowProblem) -> Result<FlowSolution, ValidationError> {
        let mut network = FlowNetwork::new(problem)?;
        let source = self.terminal(&network, "source", &self.source)?;
        let sink = self.terminal(&network, "sink", &self.sink)?;
        if source == sink {
            return Err(ValidationError::SameTerminals(self.source.clone()));
        }

        let mut max_flow = 0.0;
        let mut paths = Vec::new();
        let mut steps = vec![format!(
            "Initialize {} nodes with their capacities; search with {}",
            network.node_count(),
            self.strategy.name()
        )];
        let mut termination = FlowTermination::Converged;

        while let Some(path) = self.strategy.find_path(&network, source, sink) {
            if paths.len() >= self.max_iterations {
                warn!(
                    "stopping after {} augmentations with augmenting paths remaining",
                    self.max_iterations
                );
                termination = FlowTermination::IterationCapReached;
                break;
            }

            let bottleneck = network.bottleneck(&path);
            if bottleneck <= 0.0 {
                debug!("zero-capacity path found, stopping");
                break;
            }

            network.augment(&path, bottleneck);
            max_flow += bottleneck;

            let nodes: Vec<String> = path.iter().map(|&n| network.label(n).to_string()).collect();
            debug!("augmenting {} along {:?}", bottleneck, nodes);
            steps.push(format!("Augment {} along {}", bottleneck, nodes.join(" -> ")));
            paths.push(AugmentingPath {
                nodes,
                flow: bottleneck,
            });
        }

        let min_cut = match termination {
            FlowTermination::Converged => Some(min_cut(&network, source)),
            FlowTermination::IterationCapReached => None,
        };
        steps.push(match termination {
            FlowTermination::Converged => {
                format!("No augmenting path remains: maximum flow is {}", max_flow)
            }
            FlowTermination::IterationCapReached => format!(
                "Stopped after {} augmentations: flow so far is {}",
                self.max_iterations, max_flow
            ),
        });
        info!("max flow {} after {} augmentations ({:?})", max_flow, paths.len(), termination);

        Ok(FlowSolution {
            max_flow,
            paths,
            termination,
            edge_flows: edge_flows(&network),
            min_cut,
            steps,
        })
    }

    fn terminal(&self, network: &FlowNetwork, role: &'static str, label: &str) -> Result<NodeId, ValidationError> {
        network.node_id(label).ok_or_else(|| ValidationError::MissingTerminal {
            role,
            label: label.to_string(),
        })
    }
}

fn edge_flows(network: &FlowNetwork) -> Vec<EdgeFlow> {
    network
        .edges()
        .iter()
        .map(|&(u, v)| EdgeFlow {
            from: network.label(u).to_string(),
            to: network.label(v).to_string(),
            capacity: network.capacity(u, v),
            flow: network.flow(u, v).max(0.0),
        })
        .collect()
}

fn min_cut(network: &FlowNetwork, source: NodeId) -> MinCut {
    let reachable = network.reachable_from(source);
    let capacity = network
        .edges()
        .iter()
        .filter(|&&(u, v)| reachable[u] && !reachable[v])
        .map(|&(u, v)| network.capacity(u, v))
        .sum();
    let source_side = (0..network.node_count())
        .filter(|&n| reachable[n])
        .map(|n| network.label(n).to_string())
        .collect();
    MinCut { source_side, capacity }
}

/// Maximum flow from `"S"` to `"T"` with the default iteration cap
pub fn solve_max_flow(
    nodes: &[String],
    edges: &[FlowEdge],
    strategy: SearchStrategy,
) -> Result<FlowSolution, ValidationError> {
    let problem = FlowProblem {
        nodes: nodes.to_vec(),
        edges: edges.to_vec(),
    };
    MaxFlowSolver::new().with_strategy(strategy).solve(&problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [SearchStrategy; 2] = [SearchStrategy::FordFulkerson, SearchStrategy::EdmondsKarp];

    fn network(nodes: &[&str], edges: &[(&str, &str, f64)]) -> FlowProblem {
        let mut problem = FlowProblem::new(nodes.iter().copied());
        for &(from, to, capacity) in edges {
            problem.add_edge(from, to, capacity);
        }
        problem
    }

    /// Smallest s-t cut by enumerating every node partition
    fn brute_force_min_cut(problem: &FlowProblem) -> f64 {
        let n = problem.nodes.len();
        let s = problem.nodes.iter().position(|l| l == "S").unwrap();
        let t = problem.nodes.iter().position(|l| l == "T").unwrap();
        let position = |label: &str| problem.nodes.iter().position(|l| l == label).unwrap();

        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << n) {
            if mask & (1 << s) == 0 || mask & (1 << t) != 0 {
                continue;
            }
            let cut: f64 = problem
                .edges
                .iter()
                .filter(|e| mask & (1 << position(&e.from)) != 0 && mask & (1 << position(&e.to)) == 0)
                .map(|e| e.capacity)
                .sum();
            best = best.min(cut);
        }
        best
    }

    fn classic() -> FlowProblem {
        network(
            &["S", "A", "B", "C", "D", "T"],
            &[
                ("S", "A", 10.0),
                ("S", "C", 10.0),
                ("A", "B", 4.0),
                ("A", "C", 2.0),
                ("A", "D", 8.0),
                ("C", "D", 9.0),
                ("B", "T", 10.0),
                ("D", "B", 6.0),
                ("D", "T", 10.0),
            ],
        )
    }

    #[test]
    fn test_scenario_b_single_path() {
        let problem = network(&["S", "A", "T"], &[("S", "A", 10.0), ("A", "T", 5.0)]);
        for strategy in STRATEGIES {
            let solution = MaxFlowSolver::new().with_strategy(strategy).solve(&problem).unwrap();
            assert_eq!(solution.max_flow, 5.0);
            assert_eq!(solution.paths.len(), 1);
            assert_eq!(solution.paths[0].nodes, vec!["S", "A", "T"]);
            assert_eq!(solution.paths[0].flow, 5.0);
            assert!(solution.is_converged());
        }
    }

    #[test]
    fn test_disconnected_network() {
        let problem = network(&["S", "A", "B", "T"], &[("S", "A", 3.0), ("B", "T", 3.0)]);
        for strategy in STRATEGIES {
            let solution = MaxFlowSolver::new().with_strategy(strategy).solve(&problem).unwrap();
            assert_eq!(solution.max_flow, 0.0);
            assert!(solution.paths.is_empty());
            assert_eq!(solution.termination, FlowTermination::Converged);
            assert_eq!(solution.min_cut.unwrap().capacity, 0.0);
        }
    }

    #[test]
    fn test_strategies_agree_with_min_cut() {
        let problem = classic();
        let expected = brute_force_min_cut(&problem);
        assert_eq!(expected, 19.0);

        for strategy in STRATEGIES {
            let solution = MaxFlowSolver::new().with_strategy(strategy).solve(&problem).unwrap();
            assert!(solution.is_converged(), "{} hit the cap", strategy.name());
            assert!((solution.max_flow - expected).abs() < 1e-9);

            let cut = solution.min_cut.as_ref().unwrap();
            assert!((cut.capacity - solution.max_flow).abs() < 1e-9);
            assert!(cut.source_side.contains(&"S".to_string()));
            assert!(!cut.source_side.contains(&"T".to_string()));
        }
    }

    #[test]
    fn test_edge_flows_respect_capacity_and_conservation() {
        let problem = classic();
        let solution = MaxFlowSolver::new()
            .with_strategy(SearchStrategy::EdmondsKarp)
            .solve(&problem)
            .unwrap();

        for e in &solution.edge_flows {
            assert!(e.flow >= 0.0 && e.flow <= e.capacity + 1e-9, "{:?}", e);
        }
        for node in ["A", "B", "C", "D"] {
            let inflow: f64 = solution.edge_flows.iter().filter(|e| e.to == node).map(|e| e.flow).sum();
            let outflow: f64 = solution.edge_flows.iter().filter(|e| e.from == node).map(|e| e.flow).sum();
            assert!((inflow - outflow).abs() < 1e-9, "{} not conserved", node);
        }
        let into_sink: f64 = solution.edge_flows.iter().filter(|e| e.to == "T").map(|e| e.flow).sum();
        assert!((into_sink - solution.max_flow).abs() < 1e-9);
    }

    #[test]
    fn test_flow_never_exceeds_min_cut() {
        let problem = network(
            &["S", "A", "B", "T"],
            &[("S", "A", 1.0), ("A", "B", 7.0), ("S", "B", 2.5), ("B", "T", 3.0), ("A", "T", 0.5)],
        );
        let bound = brute_force_min_cut(&problem);
        for strategy in STRATEGIES {
            let solution = MaxFlowSolver::new().with_strategy(strategy).solve(&problem).unwrap();
            assert!(solution.max_flow <= bound + 1e-9);
            assert!((solution.max_flow - bound).abs() < 1e-9);
        }
    }

    #[test]
    fn test_iteration_cap_reported() {
        // Five parallel unit routes need five augmentations
        let mut problem = FlowProblem::new(["S", "T"]);
        for i in 0..5 {
            let mid = format!("M{}", i);
            problem.nodes.push(mid.clone());
            problem.add_edge("S", mid.clone(), 1.0);
            problem.add_edge(mid, "T", 1.0);
        }

        let capped = MaxFlowSolver::new().with_max_iterations(3).solve(&problem).unwrap();
        assert_eq!(capped.termination, FlowTermination::IterationCapReached);
        assert_eq!(capped.paths.len(), 3);
        assert_eq!(capped.max_flow, 3.0);
        assert!(capped.min_cut.is_none());

        // Reaching the cap exactly as paths run out counts as convergence
        let exact = MaxFlowSolver::new().with_max_iterations(5).solve(&problem).unwrap();
        assert_eq!(exact.termination, FlowTermination::Converged);
        assert_eq!(exact.max_flow, 5.0);
    }

    #[test]
    fn test_default_cap_is_ten() {
        let mut problem = FlowProblem::new(["S", "T"]);
        for i in 0..12 {
            let mid = format!("M{}", i);
            problem.nodes.push(mid.clone());
            problem.add_edge("S", mid.clone(), 1.0);
            problem.add_edge(mid, "T", 1.0);
        }
        let solution = MaxFlowSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.paths.len(), 10);
        assert_eq!(solution.termination, FlowTermination::IterationCapReached);
    }

    #[test]
    fn test_terminal_validation() {
        let problem = network(&["S", "A"], &[("S", "A", 1.0)]);
        assert_eq!(
            MaxFlowSolver::new().solve(&problem).unwrap_err(),
            ValidationError::MissingTerminal { role: "sink", label: "T".to_string() }
        );

        let same = MaxFlowSolver::new().with_terminals("S", "S").solve(&problem);
        assert_eq!(same.unwrap_err(), ValidationError::SameTerminals("S".to_string()));
    }

    #[test]
    fn test_custom_terminals() {
        let problem = network(&["src", "mid", "dst"], &[("src", "mid", 4.0), ("mid", "dst", 6.0)]);
        let solution = MaxFlowSolver::new().with_terminals("src", "dst").solve(&problem).unwrap();
        assert_eq!(solution.max_flow, 4.0);
    }

    #[test]
    fn test_free_function() {
        let nodes: Vec<String> = ["S", "A", "T"].iter().map(|s| s.to_string()).collect();
        let edges = vec![FlowEdge::new("S", "A", 10.0), FlowEdge::new("A", "T", 5.0)];
        let solution = solve_max_flow(&nodes, &edges, SearchStrategy::EdmondsKarp).unwrap();
        assert_eq!(solution.max_flow, 5.0);
        assert_eq!(solution.steps.len(), 3);
    }
}
