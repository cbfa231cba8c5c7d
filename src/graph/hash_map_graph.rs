use crate::datastructures::VertexSet;
use crate::graph::base_graph::DirectedGraph;
use crate::graph::mutable_graph::MutableDiGraph;
use fxhash::{FxHashMap, FxHashSet};
use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    SelfLoop(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::SelfLoop(v) => write!(f, "Self-loop on vertex {}", v),
        }
    }
}

impl Error for GraphError {}

/// Adjacency-set digraph keyed by vertex label.
///
/// Vertices are kept in insertion order, successor and predecessor sets are
/// hashed, so `successors`, `predecessors` and both degrees are O(1) lookups.
#[derive(Clone, Debug)]
pub struct HashMapDiGraph<V = usize> {
    order: Vec<V>,
    out_edges: FxHashMap<V, FxHashSet<V>>,
    in_edges: FxHashMap<V, FxHashSet<V>>,
    edge_count: usize,
}

impl<V: Copy + Eq + Hash + Debug> HashMapDiGraph<V> {
    fn insert_edge(&mut self, u: V, v: V) -> bool {
        self.add_vertex(u);
        self.add_vertex(v);
        let inserted = self
            .out_edges
            .get_mut(&u)
            .map(|s| s.insert(v))
            .unwrap_or(false);
        if inserted {
            if let Some(s) = self.in_edges.get_mut(&v) {
                s.insert(u);
            }
            self.edge_count += 1;
        }
        inserted
    }
}

impl<V: Copy + Eq + Hash + Debug> DirectedGraph for HashMapDiGraph<V> {
    type Vertex = V;

    fn order(&self) -> usize {
        self.order.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn has_vertex(&self, u: V) -> bool {
        self.out_edges.contains_key(&u)
    }

    fn has_edge(&self, u: V, v: V) -> bool {
        self.out_edges
            .get(&u)
            .map(|s| s.contains(&v))
            .unwrap_or(false)
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = V> + '_> {
        Box::new(self.order.iter().copied())
    }

    fn successors(&self, u: V) -> Box<dyn Iterator<Item = V> + '_> {
        match self.out_edges.get(&u) {
            Some(s) => Box::new(s.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn predecessors(&self, u: V) -> Box<dyn Iterator<Item = V> + '_> {
        match self.in_edges.get(&u) {
            Some(s) => Box::new(s.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn out_degree(&self, u: V) -> usize {
        self.out_edges.get(&u).map(|s| s.len()).unwrap_or(0)
    }

    fn in_degree(&self, u: V) -> usize {
        self.in_edges.get(&u).map(|s| s.len()).unwrap_or(0)
    }

    fn vertex_induced(&self, vertices: &VertexSet<V>) -> Self {
        let mut graph = Self::with_capacity(vertices.len());
        for u in vertices.iter().filter(|u| self.has_vertex(*u)) {
            graph.add_vertex(u);
        }
        for u in vertices.iter().filter(|u| self.has_vertex(*u)) {
            for v in self.successors(u).filter(|v| vertices.contains(v)) {
                graph.insert_edge(u, v);
            }
        }
        graph
    }
}

impl<V: Copy + Eq + Hash + Debug> MutableDiGraph for HashMapDiGraph<V> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            out_edges: FxHashMap::default(),
            in_edges: FxHashMap::default(),
            edge_count: 0,
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            out_edges: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            in_edges: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            edge_count: 0,
        }
    }

    fn add_vertex(&mut self, u: V) {
        if !self.out_edges.contains_key(&u) {
            self.order.push(u);
            self.out_edges.insert(u, FxHashSet::default());
            self.in_edges.insert(u, FxHashSet::default());
        }
    }

    fn remove_vertex(&mut self, u: V) {
        let (out_set, in_set) = match (self.out_edges.remove(&u), self.in_edges.remove(&u)) {
            (Some(out_set), Some(in_set)) => (out_set, in_set),
            _ => return,
        };
        for v in &out_set {
            if let Some(s) = self.in_edges.get_mut(v) {
                s.remove(&u);
            }
        }
        for v in &in_set {
            if let Some(s) = self.out_edges.get_mut(v) {
                s.remove(&u);
            }
        }
        self.edge_count -= out_set.len() + in_set.len();
        self.order.retain(|v| *v != u);
    }

    fn add_edge(&mut self, u: V, v: V) -> Result<bool, GraphError> {
        if u == v {
            return Err(GraphError::SelfLoop(format!("{:?}", u)));
        }
        Ok(self.insert_edge(u, v))
    }

    fn remove_edge(&mut self, u: V, v: V) -> bool {
        let removed = self
            .out_edges
            .get_mut(&u)
            .map(|s| s.remove(&v))
            .unwrap_or(false);
        if removed {
            if let Some(s) = self.in_edges.get_mut(&v) {
                s.remove(&u);
            }
            self.edge_count -= 1;
        }
        removed
    }
}
