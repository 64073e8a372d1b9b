//! Stop adjacency for branching route diagrams.
//!
//! The server sends the tree in its snake_case wire shape
//! ([`StopTreeData`]); the direction view works with a [`StopTree`], built
//! once per render by moving the three fields across unchanged.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Stop identifier as used in the tree.
pub type StopId = String;

/// A stop as it appears on a route diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStop {
    pub id: StopId,
    pub name: String,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub is_beginning: bool,
    #[serde(default)]
    pub is_terminus: bool,
    #[serde(default)]
    pub stop_features: Vec<String>,
}

/// A node of the tree: the stop id plus the stop it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTreeNode {
    pub id: StopId,
    pub value: RouteStop,
}

/// Directed adjacency of a single stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTreeEdges {
    #[serde(default)]
    pub next: Vec<StopId>,
    #[serde(default)]
    pub previous: Vec<StopId>,
}

/// Wire shape of the stop tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTreeData {
    pub by_id: HashMap<StopId, StopTreeNode>,
    pub edges: HashMap<StopId, StopTreeEdges>,
    pub starting_nodes: Vec<StopId>,
}

/// Stop adjacency used by the direction view. Not mutated after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopTree {
    pub by_id: HashMap<StopId, StopTreeNode>,
    pub edges: HashMap<StopId, StopTreeEdges>,
    pub starting_nodes: Vec<StopId>,
}

impl StopTree {
    /// Build a tree from its wire shape. Values are moved, not transformed.
    pub fn from_stop_tree_data(data: StopTreeData) -> Self {
        Self {
            by_id: data.by_id,
            edges: data.edges,
            starting_nodes: data.starting_nodes,
        }
    }

    /// Look up a node.
    pub fn node(&self, id: &str) -> Option<&StopTreeNode> {
        self.by_id.get(id)
    }

    /// Ids of the stops directly after `id`.
    pub fn next_node_ids(&self, id: &str) -> &[StopId] {
        self.edges
            .get(id)
            .map(|e| e.next.as_slice())
            .unwrap_or_default()
    }

    /// Ids of the stops directly before `id`.
    pub fn previous_node_ids(&self, id: &str) -> &[StopId] {
        self.edges
            .get(id)
            .map(|e| e.previous.as_slice())
            .unwrap_or_default()
    }

    pub fn is_start_node(&self, id: &str) -> bool {
        self.starting_nodes.iter().any(|s| s == id)
    }

    /// The route splits after this stop.
    pub fn is_branch_node(&self, id: &str) -> bool {
        self.next_node_ids(id).len() > 1
    }

    /// Branches rejoin at this stop.
    pub fn is_merge_node(&self, id: &str) -> bool {
        self.previous_node_ids(id).len() > 1
    }

    /// Depth-first walk from the starting nodes, in starting-node order,
    /// yielding every reachable node once. Ids referenced by edges but
    /// missing from `by_id` are skipped.
    pub fn flatten(&self) -> Vec<&StopTreeNode> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::with_capacity(self.by_id.len());
        let mut stack: Vec<&str> = self.starting_nodes.iter().rev().map(String::as_str).collect();

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.by_id.get(id) {
                out.push(node);
            }
            // Reverse so the first branch is visited first
            for next in self.next_node_ids(id).iter().rev() {
                if !seen.contains(next.as_str()) {
                    stack.push(next.as_str());
                }
            }
        }

        out
    }
}

impl From<StopTreeData> for StopTree {
    fn from(data: StopTreeData) -> Self {
        StopTree::from_stop_tree_data(data)
    }
}

#[cfg(test)]
pub(crate) fn stop(id: &str) -> StopTreeNode {
    StopTreeNode {
        id: id.to_string(),
        value: RouteStop {
            id: id.to_string(),
            name: id.to_uppercase(),
            zone: None,
            is_beginning: false,
            is_terminus: false,
            stop_features: Vec::new(),
        },
    }
}

/// Build tree data from `(from, to)` pairs.
#[cfg(test)]
pub(crate) fn tree_data(starts: &[&str], links: &[(&str, &str)]) -> StopTreeData {
    let mut data = StopTreeData {
        starting_nodes: starts.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    for s in starts {
        data.by_id.insert(s.to_string(), stop(s));
        data.edges.entry(s.to_string()).or_default();
    }
    for (from, to) in links {
        data.by_id.entry(from.to_string()).or_insert_with(|| stop(from));
        data.by_id.entry(to.to_string()).or_insert_with(|| stop(to));
        data.edges
            .entry(from.to_string())
            .or_default()
            .next
            .push(to.to_string());
        data.edges
            .entry(to.to_string())
            .or_default()
            .previous
            .push(from.to_string());
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a - b - c - d
    ///      \     /
    ///        e -
    fn branching() -> StopTree {
        StopTree::from_stop_tree_data(tree_data(
            &["a"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("b", "e"), ("e", "d")],
        ))
    }

    fn ids(nodes: Vec<&StopTreeNode>) -> Vec<&str> {
        nodes.into_iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn from_stop_tree_data_moves_fields() {
        let data = tree_data(&["a"], &[("a", "b")]);
        let tree = StopTree::from_stop_tree_data(data.clone());
        assert_eq!(tree.by_id, data.by_id);
        assert_eq!(tree.edges, data.edges);
        assert_eq!(tree.starting_nodes, data.starting_nodes);
    }

    #[test]
    fn deserialize_wire_shape() {
        let json = r#"{
            "by_id": {
                "place-alfcl": {"id": "place-alfcl", "value": {"id": "place-alfcl", "name": "Alewife", "is_beginning": true}},
                "place-davis": {"id": "place-davis", "value": {"id": "place-davis", "name": "Davis"}}
            },
            "edges": {
                "place-alfcl": {"next": ["place-davis"], "previous": []},
                "place-davis": {"next": [], "previous": ["place-alfcl"]}
            },
            "starting_nodes": ["place-alfcl"]
        }"#;
        let data: StopTreeData = serde_json::from_str(json).unwrap();
        let tree = StopTree::from(data);
        assert!(tree.node("place-alfcl").unwrap().value.is_beginning);
        assert_eq!(tree.next_node_ids("place-alfcl"), ["place-davis".to_string()]);
        assert_eq!(tree.previous_node_ids("place-davis"), ["place-alfcl".to_string()]);
    }

    #[test]
    fn adjacency_queries() {
        let tree = branching();
        assert!(tree.is_start_node("a"));
        assert!(!tree.is_start_node("b"));
        assert!(tree.is_branch_node("b"));
        assert!(!tree.is_branch_node("c"));
        assert!(tree.is_merge_node("d"));
        assert!(!tree.is_merge_node("c"));
        assert!(tree.next_node_ids("missing").is_empty());
    }

    #[test]
    fn flatten_visits_each_stop_once() {
        let tree = branching();
        assert_eq!(ids(tree.flatten()), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn flatten_multiple_starting_nodes() {
        let tree = StopTree::from_stop_tree_data(tree_data(
            &["x", "y"],
            &[("x", "z"), ("y", "z"), ("z", "w")],
        ));
        assert_eq!(ids(tree.flatten()), vec!["x", "z", "w", "y"]);
    }

    #[test]
    fn flatten_skips_dangling_edges() {
        let mut data = tree_data(&["a"], &[("a", "b")]);
        data.by_id.remove("b");
        let tree = StopTree::from_stop_tree_data(data);
        assert_eq!(ids(tree.flatten()), vec!["a"]);
    }

    #[test]
    fn flatten_empty_tree() {
        assert!(StopTree::default().flatten().is_empty());
    }
}
