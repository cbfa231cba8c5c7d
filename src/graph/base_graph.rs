use crate::datastructures::VertexSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view of a directed graph without self-loops.
///
/// `vertices` yields vertices in a fixed order. Every algorithm in this crate
/// scans vertices in that order, so it doubles as the tie-breaking order.
pub trait DirectedGraph: Clone + Debug {
    type Vertex: Copy + Eq + Hash + Debug;

    fn order(&self) -> usize;
    fn edge_count(&self) -> usize;
    fn has_vertex(&self, u: Self::Vertex) -> bool;
    fn has_edge(&self, u: Self::Vertex, v: Self::Vertex) -> bool;
    fn vertices(&self) -> Box<dyn Iterator<Item = Self::Vertex> + '_>;
    fn successors(&self, u: Self::Vertex) -> Box<dyn Iterator<Item = Self::Vertex> + '_>;
    fn predecessors(&self, u: Self::Vertex) -> Box<dyn Iterator<Item = Self::Vertex> + '_>;
    fn out_degree(&self, u: Self::Vertex) -> usize;
    fn in_degree(&self, u: Self::Vertex) -> usize;

    /// Subgraph on `vertices` keeping only edges with both endpoints inside.
    /// The subgraph's vertex order is the iteration order of `vertices`;
    /// members that are not vertices of `self` are ignored.
    fn vertex_induced(&self, vertices: &VertexSet<Self::Vertex>) -> Self;

    fn vertex_set(&self) -> VertexSet<Self::Vertex> {
        self.vertices().collect()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (Self::Vertex, Self::Vertex)> + '_> {
        Box::new(
            self.vertices()
                .flat_map(move |u| self.successors(u).map(move |v| (u, v))),
        )
    }
}
