use crate::graph::base_graph::DirectedGraph;
use crate::graph::hash_map_graph::GraphError;

pub trait MutableDiGraph: DirectedGraph {
    fn new() -> Self;
    fn with_capacity(capacity: usize) -> Self;
    fn add_vertex(&mut self, u: Self::Vertex);
    fn remove_vertex(&mut self, u: Self::Vertex);
    /// Inserts the edge `u -> v`, adding missing endpoints. Returns whether
    /// the edge is new. Self-loops are rejected.
    fn add_edge(&mut self, u: Self::Vertex, v: Self::Vertex) -> Result<bool, GraphError>;
    fn remove_edge(&mut self, u: Self::Vertex, v: Self::Vertex) -> bool;

    fn from_edges<I, E>(vertices: I, edges: E) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Self::Vertex>,
        E: IntoIterator<Item = (Self::Vertex, Self::Vertex)>,
        Self: Sized,
    {
        let mut graph = Self::new();
        for u in vertices {
            graph.add_vertex(u);
        }
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }
}
