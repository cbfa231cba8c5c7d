pub use base_graph::DirectedGraph;
pub use hash_map_graph::{GraphError, HashMapDiGraph};
pub use mutable_graph::MutableDiGraph;

mod base_graph;
mod hash_map_graph;
mod mutable_graph;
