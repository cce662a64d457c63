pub mod edge;
pub mod graph;
pub mod loader;
pub mod node;
