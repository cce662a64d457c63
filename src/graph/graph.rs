use crate::error::{Result, TrafficError};
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};
use std::collections::HashMap;

/// Immutable road network. Node and edge ids are dense indices in declaration order.
#[derive(Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adj: Vec<Vec<EdgeId>>,
    radj: Vec<Vec<EdgeId>>,
    names: HashMap<String, NodeId>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut adj: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
        let mut radj: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
        edges.iter().for_each(|e| {
            adj[e.from().index()].push(e.id());
            radj[e.to().index()].push(e.id());
        });
        let names = nodes
            .iter()
            .map(|n| (n.name().to_string(), n.id()))
            .collect::<HashMap<String, NodeId>>();
        Self {
            nodes,
            edges,
            adj,
            radj,
            names,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_by_id(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn edge_by_id(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn outgoing(&self, id: NodeId) -> &[EdgeId] {
        &self.adj[id.index()]
    }

    pub fn incoming(&self, id: NodeId) -> &[EdgeId] {
        &self.radj[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `"u -> v"` label used by the reports.
    pub fn edge_label(&self, id: EdgeId) -> String {
        let edge = self.edge_by_id(id);
        format!(
            "{} -> {}",
            self.node_by_id(edge.from()).name(),
            self.node_by_id(edge.to()).name()
        )
    }
}

/// Incremental construction with the validation every loader needs.
#[derive(Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    names: HashMap<String, NodeId>,
    pairs: HashMap<(NodeId, NodeId), EdgeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `name`, declaring it if it is new.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name));
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn add_edge(&mut self, from: &str, to: &str, a: f64, b: f64) -> Result<EdgeId> {
        for (label, value) in [("a", a), ("b", b)] {
            if !value.is_finite() || value < 0.0 {
                return Err(TrafficError::input(format!(
                    "edge {} -> {}: coefficient '{}' must be a non-negative number, got {}",
                    from, to, label, value
                )));
            }
        }
        let from_id = self.add_node(from);
        let to_id = self.add_node(to);
        if self.pairs.contains_key(&(from_id, to_id)) {
            return Err(TrafficError::input(format!(
                "duplicate edge {} -> {}",
                from, to
            )));
        }
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(id, from_id, to_id, a, b));
        self.pairs.insert((from_id, to_id), id);
        Ok(id)
    }

    pub fn build(self) -> Graph {
        Graph::new(self.nodes, self.edges)
    }
}
