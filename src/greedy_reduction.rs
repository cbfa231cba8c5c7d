use crate::datastructures::VertexSet;
use crate::graph::DirectedGraph;
use crate::solver::{ClosureSolver, Outcome, SearchResult};
use crate::stats::{Stats, Stopwatch};
use std::marker::PhantomData;

#[cfg(feature = "log")]
use log::{debug, info};

/// Picks the next vertex to peel off the current closure.
///
/// `sub_graph` is induced by `candidates`, and a selector may only return a
/// vertex without predecessors in it. Every in-degree check is charged to
/// `basic_ops`.
pub trait PeelSelector {
    fn select<G: DirectedGraph>(
        sub_graph: &G,
        candidates: &VertexSet<G::Vertex>,
        basic_ops: &mut usize,
    ) -> Option<G::Vertex>;
}

/// First source in scan order.
pub struct FirstSourceSelector;

impl PeelSelector for FirstSourceSelector {
    fn select<G: DirectedGraph>(
        sub_graph: &G,
        candidates: &VertexSet<G::Vertex>,
        basic_ops: &mut usize,
    ) -> Option<G::Vertex> {
        for u in candidates.iter() {
            *basic_ops += 1;
            if sub_graph.in_degree(u) == 0 {
                return Some(u);
            }
        }
        None
    }
}

/// Source with the fewest successors inside the current set, earliest in scan
/// order on ties. Always checks every candidate.
pub struct MinOutDegreeSelector;

impl PeelSelector for MinOutDegreeSelector {
    fn select<G: DirectedGraph>(
        sub_graph: &G,
        candidates: &VertexSet<G::Vertex>,
        basic_ops: &mut usize,
    ) -> Option<G::Vertex> {
        let mut best: Option<(G::Vertex, usize)> = None;
        for u in candidates.iter() {
            *basic_ops += 1;
            if sub_graph.in_degree(u) != 0 {
                continue;
            }
            let out_degree = sub_graph.out_degree(u);
            match best {
                Some((_, d)) if d <= out_degree => {}
                _ => best = Some((u, out_degree)),
            }
        }
        best.map(|(u, _)| u)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeelStep<V> {
    Removed(V),
    /// No member of the current set is a source.
    Stuck,
    /// The current set has reached the target size.
    Done,
}

/// Shrinks the full vertex set towards `k` vertices by removing sources of the
/// induced subgraph.
///
/// A vertex without predecessors in the current closure is not the target of
/// any remaining member, so removing it keeps the set a closure. Starting from
/// the whole vertex set, every intermediate set is therefore a closure. The
/// reduction never backtracks, and when no source is left it is stuck even if
/// some closure of size `k` exists.
pub struct GreedyReducer<'a, G: DirectedGraph, S: PeelSelector = FirstSourceSelector> {
    graph: &'a G,
    k: usize,
    current: VertexSet<G::Vertex>,
    started: bool,
    basic_ops: usize,
    selector: PhantomData<S>,
}

impl<'a, G: DirectedGraph, S: PeelSelector> GreedyReducer<'a, G, S> {
    /// The closure the reduction has reached so far. Empty until the first
    /// step copies the full vertex set.
    pub fn current(&self) -> &VertexSet<G::Vertex> {
        &self.current
    }

    pub fn basic_ops(&self) -> usize {
        self.basic_ops
    }

    /// Performs one reduction round: builds the subgraph induced by the
    /// current set and removes the vertex chosen by the selector.
    pub fn step(&mut self) -> PeelStep<G::Vertex> {
        if !self.started {
            self.current = self.graph.vertex_set();
            self.started = true;
        }
        if self.current.len() <= self.k {
            return PeelStep::Done;
        }
        let sub_graph = self.graph.vertex_induced(&self.current);
        self.basic_ops += 1;
        match S::select(&sub_graph, &self.current, &mut self.basic_ops) {
            Some(v) => {
                self.current.remove(&v);
                PeelStep::Removed(v)
            }
            None => PeelStep::Stuck,
        }
    }
}

impl<'a, G: DirectedGraph, S: PeelSelector> ClosureSolver<'a, G> for GreedyReducer<'a, G, S> {
    fn with_graph(graph: &'a G, k: usize) -> Self {
        Self {
            graph,
            k,
            current: VertexSet::new(),
            started: false,
            basic_ops: 0,
            selector: PhantomData,
        }
    }

    fn compute(mut self) -> SearchResult<G::Vertex> {
        let stopwatch = Stopwatch::start();
        let n = self.graph.order();

        if self.k > n {
            return SearchResult::new(Outcome::Infeasible, Stats::zeroed(false));
        }
        if self.k == 0 {
            return SearchResult::new(Outcome::Found(VertexSet::new()), stopwatch.finish(0, None));
        }

        #[cfg(feature = "log")]
        info!("greedy reduction from {} to {} vertices", n, self.k);

        loop {
            match self.step() {
                PeelStep::Removed(_) => {}
                PeelStep::Stuck => {
                    #[cfg(feature = "log")]
                    debug!("greedy reduction stuck at {} vertices", self.current.len());
                    return SearchResult::new(
                        Outcome::Stuck(self.current),
                        stopwatch.finish(self.basic_ops, None),
                    );
                }
                PeelStep::Done => break,
            }
        }

        SearchResult::new(
            Outcome::Found(self.current),
            stopwatch.finish(self.basic_ops, None),
        )
    }
}
