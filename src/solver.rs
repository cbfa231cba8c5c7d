use crate::datastructures::VertexSet;
use crate::exact::ExhaustiveSearcher;
use crate::graph::DirectedGraph;
use crate::greedy_reduction::{FirstSourceSelector, GreedyReducer, MinOutDegreeSelector};
use crate::stats::Stats;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

pub use crate::closure::is_closure;

/// How a search ended.
#[derive(Clone, Debug)]
pub enum Outcome<V> {
    /// A closure of the requested size.
    Found(VertexSet<V>),
    /// Every candidate of the requested size was rejected.
    Exhausted,
    /// The requested size exceeds the number of vertices.
    Infeasible,
    /// The greedy reduction ran out of removable vertices. Holds the
    /// oversized closure it had reduced the graph to.
    Stuck(VertexSet<V>),
}

impl<V: Copy + Eq + Hash> PartialEq for Outcome<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Outcome::Found(a), Outcome::Found(b)) | (Outcome::Stuck(a), Outcome::Stuck(b)) => {
                a == b
            }
            (Outcome::Exhausted, Outcome::Exhausted) | (Outcome::Infeasible, Outcome::Infeasible) => {
                true
            }
            _ => false,
        }
    }
}

impl<V: Copy + Eq + Hash> Eq for Outcome<V> {}

#[derive(Clone, Debug)]
pub struct SearchResult<V> {
    pub outcome: Outcome<V>,
    pub stats: Stats,
}

impl<V> SearchResult<V> {
    pub fn new(outcome: Outcome<V>, stats: Stats) -> Self {
        Self { outcome, stats }
    }

    pub fn found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }

    /// The closure for a successful search, the partially reduced set for a
    /// stuck greedy reduction, `None` otherwise.
    pub fn closure(&self) -> Option<&VertexSet<V>> {
        match &self.outcome {
            Outcome::Found(c) | Outcome::Stuck(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_tuple(self) -> (bool, Option<VertexSet<V>>, Stats) {
        let found = self.found();
        let closure = match self.outcome {
            Outcome::Found(c) | Outcome::Stuck(c) => Some(c),
            _ => None,
        };
        (found, closure, self.stats)
    }
}

pub trait ClosureSolver<'a, G: DirectedGraph> {
    /// Prepares a search for a closure with exactly `k` vertices.
    fn with_graph(graph: &'a G, k: usize) -> Self
    where
        Self: Sized;
    fn compute(self) -> SearchResult<G::Vertex>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverType {
    Exhaustive,
    Greedy,
    GreedyMinOutDegree,
}

impl Default for SolverType {
    fn default() -> Self {
        Self::Exhaustive
    }
}

impl SolverType {
    pub fn compute<G: DirectedGraph>(&self, graph: &G, k: usize) -> SearchResult<G::Vertex> {
        match self {
            SolverType::Exhaustive => ExhaustiveSearcher::with_graph(graph, k).compute(),
            SolverType::Greedy => {
                GreedyReducer::<G, FirstSourceSelector>::with_graph(graph, k).compute()
            }
            SolverType::GreedyMinOutDegree => {
                GreedyReducer::<G, MinOutDegreeSelector>::with_graph(graph, k).compute()
            }
        }
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverType::Exhaustive => f.write_str("exhaustive"),
            SolverType::Greedy => f.write_str("greedy"),
            SolverType::GreedyMinOutDegree => f.write_str("greedy-min-out-degree"),
        }
    }
}

impl FromStr for SolverType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exhaustive" => Ok(SolverType::Exhaustive),
            "greedy" => Ok(SolverType::Greedy),
            "greedy-min-out-degree" => Ok(SolverType::GreedyMinOutDegree),
            _ => Err(format!("unknown solver: {}", s)),
        }
    }
}

/// Searches every `k`-subset in lexicographic order of the graph's vertex
/// order and returns the first closure.
pub fn find_closure_exhaustive<G: DirectedGraph>(graph: &G, k: usize) -> SearchResult<G::Vertex> {
    SolverType::Exhaustive.compute(graph, k)
}

/// Peels zero in-degree vertices off the full vertex set until `k` remain.
pub fn find_closure_greedy<G: DirectedGraph>(graph: &G, k: usize) -> SearchResult<G::Vertex> {
    SolverType::Greedy.compute(graph, k)
}

#[cfg(test)]
mod tests {
    use crate::closure::is_closure;
    use crate::datastructures::VertexSet;
    use crate::graph::{DirectedGraph, HashMapDiGraph, MutableDiGraph};
    use crate::solver::{find_closure_exhaustive, find_closure_greedy, Outcome, SolverType};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cycle_with_isolated() -> HashMapDiGraph {
        HashMapDiGraph::from_edges(0..4, vec![(0, 1), (1, 2), (2, 0)]).unwrap()
    }

    fn random_graph(rng: &mut StdRng, n: usize, p: f64) -> HashMapDiGraph {
        let mut graph = HashMapDiGraph::with_capacity(n);
        for u in 0..n {
            graph.add_vertex(u);
        }
        for u in 0..n {
            for v in (0..n).filter(|v| *v != u) {
                if rng.gen_bool(p) {
                    graph.add_edge(u, v).unwrap();
                }
            }
        }
        graph
    }

    fn brute_force_exists(graph: &HashMapDiGraph, k: usize) -> bool {
        let n = graph.order();
        (0u32..(1 << n))
            .filter(|mask| mask.count_ones() as usize == k)
            .any(|mask| {
                graph
                    .edges()
                    .all(|(u, v)| mask & (1 << u) == 0 || mask & (1 << v) != 0)
            })
    }

    #[test]
    fn cycle_with_isolated_vertex() {
        let graph = cycle_with_isolated();

        let exhaustive = find_closure_exhaustive(&graph, 1);
        assert_eq!(exhaustive.outcome, Outcome::Found(vec![3].into()));

        // 3 is the only source, peeling it first strands the cycle
        let greedy = find_closure_greedy(&graph, 1);
        assert_eq!(greedy.outcome, Outcome::Stuck(vec![0, 1, 2].into()));
        assert!(!greedy.found());

        assert_eq!(find_closure_exhaustive(&graph, 2).outcome, Outcome::Exhausted);
        assert!(!find_closure_greedy(&graph, 2).found());

        let three: VertexSet<usize> = vec![0, 1, 2].into();
        assert_eq!(find_closure_exhaustive(&graph, 3).outcome, Outcome::Found(three.clone()));
        assert_eq!(find_closure_greedy(&graph, 3).outcome, Outcome::Found(three));
    }

    #[test]
    fn edgeless_graph() {
        let graph: HashMapDiGraph<char> =
            HashMapDiGraph::from_edges(vec!['a', 'b', 'c'], vec![]).unwrap();
        for k in 0..=3 {
            for solver in &[
                SolverType::Exhaustive,
                SolverType::Greedy,
                SolverType::GreedyMinOutDegree,
            ] {
                let result = solver.compute(&graph, k);
                assert!(result.found(), "{} failed for k = {}", solver, k);
                assert_eq!(result.closure().map(|c| c.len()), Some(k));
            }
        }
    }

    #[test]
    fn infeasible_sizes() {
        let graph = cycle_with_isolated();
        let (found, closure, stats) = find_closure_exhaustive(&graph, 5).into_tuple();
        assert!(!found);
        assert!(closure.is_none());
        assert_eq!(stats.basic_ops, 0);
        assert_eq!(stats.solutions_tested, Some(0));
        assert_eq!(stats.time, 0.0);

        let (found, closure, stats) = find_closure_greedy(&graph, 5).into_tuple();
        assert!(!found);
        assert!(closure.is_none());
        assert_eq!(stats.basic_ops, 0);
        assert_eq!(stats.solutions_tested, None);
    }

    #[test]
    fn stuck_result_keeps_partial_closure() {
        let graph = cycle_with_isolated();
        let (found, closure, _) = find_closure_greedy(&graph, 2).into_tuple();
        assert!(!found);
        assert_eq!(closure, Some(vec![0, 1, 2].into()));
    }

    #[test]
    fn exhaustive_is_complete() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=7 {
            for p in &[0.1, 0.25, 0.5] {
                let graph = random_graph(&mut rng, n, *p);
                for k in 0..=n {
                    let result = find_closure_exhaustive(&graph, k);
                    assert_eq!(result.found(), brute_force_exists(&graph, k));
                }
            }
        }
    }

    #[test]
    fn reported_closures_are_sound() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=8 {
            for p in &[0.05, 0.15, 0.3, 0.6] {
                let graph = random_graph(&mut rng, n, *p);
                for k in 0..=n {
                    let exhaustive = find_closure_exhaustive(&graph, k);
                    for solver in &[SolverType::Greedy, SolverType::GreedyMinOutDegree] {
                        let greedy = solver.compute(&graph, k);
                        if let Outcome::Found(closure) = &greedy.outcome {
                            assert_eq!(closure.len(), k);
                            assert!(is_closure(&graph, closure).0);
                            assert!(exhaustive.found());
                        }
                        if let Outcome::Stuck(partial) = &greedy.outcome {
                            assert!(partial.len() > k);
                            assert!(is_closure(&graph, partial).0);
                        }
                    }
                    if let Outcome::Found(closure) = &exhaustive.outcome {
                        assert_eq!(closure.len(), k);
                        assert!(is_closure(&graph, closure).0);
                    }
                }
            }
        }
    }

    #[test]
    fn parse_solver_type() {
        for solver in &[
            SolverType::Exhaustive,
            SolverType::Greedy,
            SolverType::GreedyMinOutDegree,
        ] {
            assert_eq!(solver.to_string().parse::<SolverType>(), Ok(*solver));
        }
        assert!("quick-bb".parse::<SolverType>().is_err());
    }
}
