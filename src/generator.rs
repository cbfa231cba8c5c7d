use crate::graph::{HashMapDiGraph, MutableDiGraph};
use fxhash::FxHashSet;
use rand::prelude::{SliceRandom, StdRng};
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fmt;

pub const DEFAULT_SEED: u64 = 130_449;
pub const DEFAULT_MIN_DIST: f64 = 5.0;
pub const DEFAULT_COORD_MIN: i32 = 1;
pub const DEFAULT_COORD_MAX: i32 = 500;
pub const DEFAULT_DENSITIES: [f64; 4] = [0.125, 0.25, 0.50, 0.75];

/// Lattice point in the plane, used as vertex label of generated graphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    TooDense {
        requested: usize,
        placed: usize,
        min_dist: f64,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::TooDense {
                requested,
                placed,
                min_dist,
            } => write!(
                f,
                "Could only place {} of {} vertices with min_dist = {}",
                placed, requested, min_dist
            ),
        }
    }
}

impl Error for GeneratorError {}

/// Random digraph generator with a single seeded source of randomness.
///
/// Graphs produced one after another from the same generator differ, but the
/// whole sequence is reproducible from the seed.
pub struct GraphGenerator {
    rng: StdRng,
    min_dist: f64,
    coord_min: i32,
    coord_max: i32,
}

impl Default for GraphGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl GraphGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            min_dist: DEFAULT_MIN_DIST,
            coord_min: DEFAULT_COORD_MIN,
            coord_max: DEFAULT_COORD_MAX,
        }
    }

    pub fn min_dist(mut self, min_dist: f64) -> Self {
        self.min_dist = min_dist;
        self
    }

    /// Inclusive coordinate range for both axes, bounds in either order.
    pub fn coord_range(mut self, a: i32, b: i32) -> Self {
        self.coord_min = a.min(b);
        self.coord_max = a.max(b);
        self
    }

    /// Places `n` distinct points with pairwise distance at least `min_dist`
    /// by rejection sampling, giving up after `n * 1000` draws.
    pub fn generate_vertices(&mut self, n: usize) -> Result<Vec<Point>, GeneratorError> {
        let mut points: Vec<Point> = Vec::with_capacity(n);
        let max_attempts = n * 1000;
        let mut attempts = 0;

        while points.len() < n && attempts < max_attempts {
            attempts += 1;
            let candidate = Point::new(
                self.rng.gen_range(self.coord_min..=self.coord_max),
                self.rng.gen_range(self.coord_min..=self.coord_max),
            );
            if points
                .iter()
                .all(|p| *p != candidate && p.distance(&candidate) >= self.min_dist)
            {
                points.push(candidate);
            }
        }

        if points.len() < n {
            return Err(GeneratorError::TooDense {
                requested: n,
                placed: points.len(),
                min_dist: self.min_dist,
            });
        }
        Ok(points)
    }

    /// Digraph on `vertices` with `floor(n * (n - 1) * density)` distinct
    /// edges drawn uniformly, never a self-loop.
    pub fn generate_digraph<V>(&mut self, vertices: &[V], density: f64) -> HashMapDiGraph<V>
    where
        V: Copy + Eq + std::hash::Hash + fmt::Debug,
    {
        let n = vertices.len();
        let density = density.max(0.0).min(1.0);
        let max_edges = n * n.saturating_sub(1);
        let num_edges = (max_edges as f64 * density).floor() as usize;

        let mut graph = HashMapDiGraph::with_capacity(n);
        for v in vertices {
            graph.add_vertex(*v);
        }

        if num_edges * 2 > max_edges {
            // dense: shuffle all candidate pairs instead of rejection sampling
            let mut pairs: Vec<(usize, usize)> = (0..n)
                .flat_map(|u| (0..n).filter(move |v| *v != u).map(move |v| (u, v)))
                .collect();
            pairs.shuffle(&mut self.rng);
            for (u, v) in pairs.into_iter().take(num_edges) {
                let _ = graph.add_edge(vertices[u], vertices[v]);
            }
        } else {
            let mut chosen: FxHashSet<(usize, usize)> = FxHashSet::default();
            while chosen.len() < num_edges {
                let u = self.rng.gen_range(0..n);
                let v = self.rng.gen_range(0..n);
                if u != v && chosen.insert((u, v)) {
                    let _ = graph.add_edge(vertices[u], vertices[v]);
                }
            }
        }
        graph
    }

    /// Geometric vertex placement followed by [`Self::generate_digraph`].
    pub fn generate(&mut self, n: usize, density: f64) -> Result<HashMapDiGraph<Point>, GeneratorError> {
        let vertices = self.generate_vertices(n)?;
        Ok(self.generate_digraph(&vertices, density))
    }

    /// Every ordered pair `u != v` of `0..n` becomes an edge independently
    /// with probability `p`.
    pub fn gnp(&mut self, n: usize, p: f64) -> HashMapDiGraph {
        let p = p.max(0.0).min(1.0);
        let mut graph = HashMapDiGraph::with_capacity(n);
        for u in 0..n {
            graph.add_vertex(u);
        }
        for u in 0..n {
            for v in (0..n).filter(|v| *v != u) {
                if self.rng.gen_bool(p) {
                    let _ = graph.add_edge(u, v);
                }
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::{GeneratorError, GraphGenerator, Point, DEFAULT_DENSITIES};
    use crate::graph::DirectedGraph;

    #[test]
    fn vertices_keep_distance() {
        let mut generator = GraphGenerator::new(1);
        let points = generator.generate_vertices(40).unwrap();
        assert_eq!(points.len(), 40);
        for (i, p) in points.iter().enumerate() {
            assert!(p.x >= 1 && p.x <= 500 && p.y >= 1 && p.y <= 500);
            for q in points.iter().skip(i + 1) {
                assert!(p.distance(q) >= 5.0);
            }
        }
    }

    #[test]
    fn too_dense() {
        let mut generator = GraphGenerator::new(1).coord_range(1, 3).min_dist(5.0);
        match generator.generate_vertices(2) {
            Err(GeneratorError::TooDense {
                requested, placed, ..
            }) => {
                assert_eq!(requested, 2);
                assert_eq!(placed, 1);
            }
            Ok(_) => panic!("placed two points in a 3x3 square"),
        }
    }

    #[test]
    fn reversed_coord_range() {
        let mut generator = GraphGenerator::new(4).coord_range(60, 1).min_dist(1.0);
        let points = generator.generate_vertices(30).unwrap();
        assert!(points
            .iter()
            .all(|p| p.x >= 1 && p.x <= 60 && p.y >= 1 && p.y <= 60));
    }

    #[test]
    fn edge_counts_follow_density() {
        let mut generator = GraphGenerator::new(2);
        for n in 4..12 {
            let vertices = generator.generate_vertices(n).unwrap();
            for density in DEFAULT_DENSITIES.iter().chain([0.0, 1.0].iter()) {
                let graph = generator.generate_digraph(&vertices, *density);
                let expected = ((n * (n - 1)) as f64 * density).floor() as usize;
                assert_eq!(graph.order(), n);
                assert_eq!(graph.edge_count(), expected);
                assert!(graph.edges().all(|(u, v)| u != v));
            }
        }
    }

    #[test]
    fn reproducible() {
        let a = GraphGenerator::new(9).generate(10, 0.5).unwrap();
        let b = GraphGenerator::new(9).generate(10, 0.5).unwrap();
        assert_eq!(
            a.vertices().collect::<Vec<_>>(),
            b.vertices().collect::<Vec<_>>()
        );
        let mut edges_a: Vec<(Point, Point)> = a.edges().collect();
        let mut edges_b: Vec<(Point, Point)> = b.edges().collect();
        edges_a.sort();
        edges_b.sort();
        assert_eq!(edges_a, edges_b);
    }

    #[test]
    fn gnp_extremes() {
        let mut generator = GraphGenerator::new(3);
        let complete = generator.gnp(20, 1.0);
        assert_eq!(complete.edge_count(), 20 * 19);
        let empty = generator.gnp(20, 0.0);
        assert_eq!(empty.edge_count(), 0);
        assert_eq!(empty.order(), 20);
    }
}
