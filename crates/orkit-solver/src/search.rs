use std::collections::VecDeque;

use crate::network::{FlowNetwork, NodeId};

/// How augmenting paths are searched for in the residual graph
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// FIFO frontier, nodes marked visited when expanded.
    ///
    /// A node may sit in the frontier several times through different
    /// parents; the first copy dequeued wins.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "dfs"))]
    FordFulkerson,
    /// FIFO frontier, nodes marked visited when enqueued (shortest paths)
    #[cfg_attr(feature = "serde", serde(alias = "bfs"))]
    EdmondsKarp,
}

impl SearchStrategy {
    /// First augmenting path from `source` to `sink`, as node ids
    pub fn find_path(self, network: &FlowNetwork, source: NodeId, sink: NodeId) -> Option<Vec<NodeId>> {
        match self {
            SearchStrategy::FordFulkerson => expand_visited(network, source, sink),
            SearchStrategy::EdmondsKarp => enqueue_visited(network, source, sink),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::FordFulkerson => "Ford-Fulkerson",
            SearchStrategy::EdmondsKarp => "Edmonds-Karp",
        }
    }
}

fn expand_visited(network: &FlowNetwork, source: NodeId, sink: NodeId) -> Option<Vec<NodeId>> {
    // Frontier entries point back to the entry they were reached from
    let mut entries: Vec<(NodeId, Option<usize>)> = vec![(source, None)];
    let mut queue = VecDeque::from([0]);
    let mut visited = vec![false; network.node_count()];

    while let Some(entry) = queue.pop_front() {
        let (node, _) = entries[entry];
        if node == sink {
            return Some(trace_entries(&entries, entry));
        }
        if visited[node] {
            continue;
        }
        visited[node] = true;

        for &next in network.neighbors(node) {
            if !visited[next] && network.residual(node, next) > 0.0 {
                entries.push((next, Some(entry)));
                queue.push_back(entries.len() - 1);
            }
        }
    }
    None
}

fn trace_entries(entries: &[(NodeId, Option<usize>)], last: usize) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut cursor = Some(last);
    while let Some(i) = cursor {
        let (node, parent) = entries[i];
        path.push(node);
        cursor = parent;
    }
    path.reverse();
    path
}

fn enqueue_visited(network: &FlowNetwork, source: NodeId, sink: NodeId) -> Option<Vec<NodeId>> {
    let mut parent: Vec<Option<NodeId>> = vec![None; network.node_count()];
    let mut visited = vec![false; network.node_count()];
    visited[source] = true;
    let mut queue = VecDeque::from([source]);

    while let Some(node) = queue.pop_front() {
        if node == sink {
            let mut path = vec![sink];
            let mut cursor = sink;
            while let Some(p) = parent[cursor] {
                path.push(p);
                cursor = p;
            }
            path.reverse();
            return Some(path);
        }

        for &next in network.neighbors(node) {
            if !visited[next] && network.residual(node, next) > 0.0 {
                visited[next] = true;
                parent[next] = Some(node);
                queue.push_back(next);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::FlowProblem;

    fn labels(network: &FlowNetwork, path: &[NodeId]) -> Vec<String> {
        path.iter().map(|&n| network.label(n).to_string()).collect()
    }

    fn ids(network: &FlowNetwork, labels: &[&str]) -> Vec<NodeId> {
        labels.iter().map(|l| network.node_id(l).unwrap()).collect()
    }

    #[test]
    fn test_both_strategies_find_simple_path() {
        let mut problem = FlowProblem::new(["S", "A", "T"]);
        problem.add_edge("S", "A", 10.0);
        problem.add_edge("A", "T", 5.0);
        let network = FlowNetwork::new(&problem).unwrap();
        let (s, t) = (network.node_id("S").unwrap(), network.node_id("T").unwrap());

        for strategy in [SearchStrategy::FordFulkerson, SearchStrategy::EdmondsKarp] {
            let path = strategy.find_path(&network, s, t).unwrap();
            assert_eq!(labels(&network, &path), vec!["S", "A", "T"], "{}", strategy.name());
        }
    }

    #[test]
    fn test_shortest_path_preferred() {
        // S -> A -> B -> T is listed first, but S -> T is one hop
        let mut problem = FlowProblem::new(["S", "A", "B", "T"]);
        problem.add_edge("S", "A", 1.0);
        problem.add_edge("A", "B", 1.0);
        problem.add_edge("B", "T", 1.0);
        problem.add_edge("S", "T", 1.0);
        let network = FlowNetwork::new(&problem).unwrap();
        let (s, t) = (network.node_id("S").unwrap(), network.node_id("T").unwrap());

        let path = SearchStrategy::EdmondsKarp.find_path(&network, s, t).unwrap();
        assert_eq!(path, ids(&network, &["S", "T"]));
        let path = SearchStrategy::FordFulkerson.find_path(&network, s, t).unwrap();
        assert_eq!(path, ids(&network, &["S", "T"]));
    }

    #[test]
    fn test_saturated_edges_block_search() {
        let mut problem = FlowProblem::new(["S", "A", "T"]);
        problem.add_edge("S", "A", 2.0);
        problem.add_edge("A", "T", 2.0);
        let mut network = FlowNetwork::new(&problem).unwrap();
        let path = ids(&network, &["S", "A", "T"]);
        network.augment(&path, 2.0);

        let (s, t) = (path[0], path[2]);
        assert!(SearchStrategy::FordFulkerson.find_path(&network, s, t).is_none());
        assert!(SearchStrategy::EdmondsKarp.find_path(&network, s, t).is_none());
    }

    #[test]
    fn test_search_uses_reverse_residual() {
        // After S->A->B->T is saturated, S->B->A->T cancels flow on A->B
        let mut problem = FlowProblem::new(["S", "A", "B", "T"]);
        problem.add_edge("S", "A", 1.0);
        problem.add_edge("A", "B", 1.0);
        problem.add_edge("B", "T", 1.0);
        problem.add_edge("S", "B", 1.0);
        problem.add_edge("A", "T", 1.0);
        let mut network = FlowNetwork::new(&problem).unwrap();
        network.augment(&ids(&network, &["S", "A", "B", "T"]), 1.0);

        let (s, t) = (network.node_id("S").unwrap(), network.node_id("T").unwrap());
        for strategy in [SearchStrategy::FordFulkerson, SearchStrategy::EdmondsKarp] {
            let path = strategy.find_path(&network, s, t).unwrap();
            assert_eq!(labels(&network, &path), vec!["S", "B", "A", "T"]);
        }
    }

    #[test]
    fn test_disconnected() {
        let mut problem = FlowProblem::new(["S", "A", "B", "T"]);
        problem.add_edge("S", "A", 1.0);
        problem.add_edge("B", "T", 1.0);
        let network = FlowNetwork::new(&problem).unwrap();
        let (s, t) = (network.node_id("S").unwrap(), network.node_id("T").unwrap());
        assert!(SearchStrategy::FordFulkerson.find_path(&network, s, t).is_none());
        assert!(SearchStrategy::EdmondsKarp.find_path(&network, s, t).is_none());
    }
}
