use crate::graph::node::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Directed link whose traversal cost is `a * flow + b`.
#[derive(Debug)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    /// a >= 0.0
    a: f64,
    /// b >= 0.0
    b: f64,
}

impl Edge {
    pub const DEFAULT_A: f64 = 1.0;
    pub const DEFAULT_B: f64 = 0.0;

    pub fn new(id: EdgeId, from: NodeId, to: NodeId, a: f64, b: f64) -> Self {
        Self { id, from, to, a, b }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}
