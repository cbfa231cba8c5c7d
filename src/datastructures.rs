use fxhash::FxHashSet;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::iter::FromIterator;

/// A set of vertices that remembers insertion order.
///
/// Iteration always follows the order in which vertices were inserted, which
/// makes every scan over a candidate set deterministic. Sets obtained from a
/// graph (see [`crate::graph::DirectedGraph::vertex_set`]) therefore iterate
/// in the graph's vertex order, and removing a vertex keeps the relative order
/// of the remaining ones.
#[derive(Clone)]
pub struct VertexSet<V> {
    members: Vec<V>,
    lookup: FxHashSet<V>,
}

impl<V: Copy + Eq + Hash> VertexSet<V> {
    #[inline]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            lookup: FxHashSet::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            lookup: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, v: &V) -> bool {
        self.lookup.contains(v)
    }

    /// Appends `v` unless it is already a member. Returns whether it was added.
    pub fn insert(&mut self, v: V) -> bool {
        if self.lookup.insert(v) {
            self.members.push(v);
            true
        } else {
            false
        }
    }

    /// Removes `v` while keeping the order of the remaining members.
    pub fn remove(&mut self, v: &V) -> bool {
        if !self.lookup.remove(v) {
            return false;
        }
        if let Some(idx) = self.members.iter().position(|u| u == v) {
            self.members.remove(idx);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = V> + '_ {
        self.members.iter().copied()
    }

}

impl<V: Copy + Eq + Hash> Default for VertexSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy + Eq + Hash> PartialEq for VertexSet<V> {
    fn eq(&self, other: &Self) -> bool {
        self.lookup == other.lookup
    }
}

impl<V: Copy + Eq + Hash> Eq for VertexSet<V> {}

impl<V: Debug> Debug for VertexSet<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.members.iter()).finish()
    }
}

impl<V: Copy + Eq + Hash> FromIterator<V> for VertexSet<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<V: Copy + Eq + Hash> Extend<V> for VertexSet<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<V: Copy + Eq + Hash> From<Vec<V>> for VertexSet<V> {
    fn from(vertices: Vec<V>) -> Self {
        vertices.into_iter().collect()
    }
}
