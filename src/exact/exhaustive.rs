use crate::closure::is_closure;
use crate::datastructures::VertexSet;
use crate::exact::Combinations;
use crate::graph::DirectedGraph;
use crate::solver::{ClosureSolver, Outcome, SearchResult};
use crate::stats::{Stats, Stopwatch};

#[cfg(feature = "log")]
use crate::exact::search_space_size;
#[cfg(feature = "log")]
use log::{debug, info};

/// First-match search over all `k`-subsets of the vertex set.
///
/// Candidates are produced in lexicographic order over the graph's vertex
/// order and checked with [`is_closure`]. The search stops at the first
/// closure, so later candidates are never built or checked.
pub struct ExhaustiveSearcher<'a, G: DirectedGraph> {
    graph: &'a G,
    k: usize,
}

impl<'a, G: DirectedGraph> ClosureSolver<'a, G> for ExhaustiveSearcher<'a, G> {
    fn with_graph(graph: &'a G, k: usize) -> Self {
        Self { graph, k }
    }

    fn compute(self) -> SearchResult<G::Vertex> {
        let stopwatch = Stopwatch::start();
        let n = self.graph.order();
        let k = self.k;

        if k > n {
            return SearchResult::new(Outcome::Infeasible, Stats::zeroed(true));
        }
        if k == 0 {
            return SearchResult::new(Outcome::Found(VertexSet::new()), stopwatch.finish(0, Some(1)));
        }

        #[cfg(feature = "log")]
        info!(
            "exhaustive search for k = {} on {} vertices, {} candidates",
            k,
            n,
            search_space_size(n, k)
        );

        let vertices: Vec<G::Vertex> = self.graph.vertices().collect();
        let mut combinations = Combinations::new(n, k);
        let mut solutions_tested = 0;
        let mut basic_ops = 0;

        while let Some(indices) = combinations.advance() {
            let candidate: VertexSet<G::Vertex> = indices.iter().map(|i| vertices[*i]).collect();
            solutions_tested += 1;
            let (valid, ops) = is_closure(self.graph, &candidate);
            basic_ops += ops;
            if valid {
                #[cfg(feature = "log")]
                debug!("closure found after {} candidates", solutions_tested);
                return SearchResult::new(
                    Outcome::Found(candidate),
                    stopwatch.finish(basic_ops, Some(solutions_tested)),
                );
            }
        }

        #[cfg(feature = "log")]
        debug!("no closure among {} candidates", solutions_tested);
        SearchResult::new(
            Outcome::Exhausted,
            stopwatch.finish(basic_ops, Some(solutions_tested)),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::datastructures::VertexSet;
    use crate::exact::{search_space_size, ExhaustiveSearcher};
    use crate::graph::{HashMapDiGraph, MutableDiGraph};
    use crate::solver::{ClosureSolver, Outcome};
    use num::BigUint;

    fn cycle_with_isolated() -> HashMapDiGraph {
        HashMapDiGraph::from_edges(0..4, vec![(0, 1), (1, 2), (2, 0)]).unwrap()
    }

    #[test]
    fn finds_isolated_vertex() {
        let graph = cycle_with_isolated();
        let result = ExhaustiveSearcher::with_graph(&graph, 1).compute();
        assert_eq!(result.outcome, Outcome::Found(vec![3].into()));
        // {0}, {1}, {2} each fail on their first vertex
        assert_eq!(result.stats.solutions_tested, Some(4));
        assert_eq!(result.stats.basic_ops, 4);
    }

    #[test]
    fn exhausts_search_space() {
        let graph = cycle_with_isolated();
        let result = ExhaustiveSearcher::with_graph(&graph, 2).compute();
        assert_eq!(result.outcome, Outcome::Exhausted);
        assert!(result.closure().is_none());
        assert_eq!(
            result.stats.solutions_tested.map(BigUint::from),
            Some(search_space_size(4, 2))
        );
        // {0,1} and {1,2} examine two vertices before escaping, the rest one
        assert_eq!(result.stats.basic_ops, 8);
    }

    #[test]
    fn stops_at_first_match() {
        // {1, 2} is a closure as well but {0, 1} comes first
        let graph = HashMapDiGraph::from_edges(0..4, vec![(0, 1), (3, 0)]).unwrap();
        let result = ExhaustiveSearcher::with_graph(&graph, 2).compute();
        assert_eq!(result.outcome, Outcome::Found(vec![0, 1].into()));
        assert_eq!(result.stats.solutions_tested, Some(1));
        assert_eq!(result.stats.basic_ops, 2);

        // {0,1}, {0,2}, {0,3} and {1,2} all escape, {1,3} is the fifth candidate
        let graph = HashMapDiGraph::from_edges(0..4, vec![(0, 1), (1, 3), (2, 1)]).unwrap();
        let result = ExhaustiveSearcher::with_graph(&graph, 2).compute();
        assert_eq!(result.outcome, Outcome::Found(vec![1, 3].into()));
        assert_eq!(result.stats.solutions_tested, Some(5));
    }

    #[test]
    fn empty_target() {
        let graph = cycle_with_isolated();
        let result = ExhaustiveSearcher::with_graph(&graph, 0).compute();
        assert_eq!(result.outcome, Outcome::Found(VertexSet::new()));
        assert_eq!(result.stats.solutions_tested, Some(1));
        assert_eq!(result.stats.basic_ops, 0);
        assert!(result.stats.time >= 0.0);
    }

    #[test]
    fn whole_graph() {
        let graph = cycle_with_isolated();
        let result = ExhaustiveSearcher::with_graph(&graph, 4).compute();
        assert!(result.found());
        assert_eq!(result.stats.solutions_tested, Some(1));
        assert_eq!(result.stats.basic_ops, 4);
    }

    #[test]
    fn empty_graph() {
        let graph: HashMapDiGraph = HashMapDiGraph::new();
        assert!(ExhaustiveSearcher::with_graph(&graph, 0).compute().found());
        let result = ExhaustiveSearcher::with_graph(&graph, 1).compute();
        assert_eq!(result.outcome, Outcome::Infeasible);
        assert_eq!(result.stats.solutions_tested, Some(0));
    }
}
