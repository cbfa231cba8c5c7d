use crate::datastructures::VertexSet;
use crate::graph::DirectedGraph;

/// Decides whether no edge leaves `candidate`.
///
/// Members are examined in the set's iteration order, charging one basic
/// operation per member whose successors are inspected. The scan stops at the
/// first member with a successor outside the set, so the returned count never
/// exceeds `|candidate|`: it is `|candidate|` for a closure and the 1-based
/// position of the first escaping member otherwise. The empty set is a closure
/// and costs nothing.
pub fn is_closure<G: DirectedGraph>(graph: &G, candidate: &VertexSet<G::Vertex>) -> (bool, usize) {
    if candidate.is_empty() {
        return (true, 0);
    }
    let mut basic_ops = 0;
    for u in candidate.iter() {
        basic_ops += 1;
        if graph.successors(u).any(|v| !candidate.contains(&v)) {
            return (false, basic_ops);
        }
    }
    (true, basic_ops)
}

/// First edge `(u, v)` with `u` inside and `v` outside `candidate`, scanning
/// members in order.
pub fn escaping_edge<G: DirectedGraph>(
    graph: &G,
    candidate: &VertexSet<G::Vertex>,
) -> Option<(G::Vertex, G::Vertex)> {
    candidate.iter().find_map(|u| {
        graph
            .successors(u)
            .find(|v| !candidate.contains(v))
            .map(|v| (u, v))
    })
}
