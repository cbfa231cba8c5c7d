use crate::closure::escaping_edge;
use crate::exact::search_space_size;
use crate::generator::{GraphGenerator, DEFAULT_DENSITIES, DEFAULT_SEED};
use crate::graph::{DirectedGraph, HashMapDiGraph};
use crate::io::DigraphReader;
use crate::solver::{find_closure_exhaustive, find_closure_greedy};
use crate::stats::Stopwatch;
use num::BigUint;
use std::convert::TryFrom;
use std::fs::File;
use std::io;
use std::io::{BufReader, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

#[cfg(feature = "log")]
use log::{info, warn};

#[cfg(feature = "handle-ctrlc")]
use crate::signals::received_ctrl_c;

const DEFAULT_MAX_EXHAUSTIVE_CANDIDATES: u64 = 50_000_000;

pub const DENSE_INSTANCES: [(usize, usize, f64); 5] = [
    (100, 50, 1.0),
    (500, 250, 1.0),
    (1000, 500, 1.0),
    (1500, 750, 1.0),
    (5000, 2500, 1.0),
];

/// Parameters of a sweep over vertex counts and edge densities.
#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    vertices: RangeInclusive<usize>,
    densities: Vec<f64>,
    seed: u64,
    max_exhaustive_candidates: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            vertices: 4..=15,
            densities: DEFAULT_DENSITIES.to_vec(),
            seed: DEFAULT_SEED,
            max_exhaustive_candidates: DEFAULT_MAX_EXHAUSTIVE_CANDIDATES,
        }
    }
}

impl ExperimentConfig {
    pub fn vertices(mut self, vertices: RangeInclusive<usize>) -> Self {
        self.vertices = vertices;
        self
    }

    pub fn densities(mut self, densities: Vec<f64>) -> Self {
        self.densities = densities;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Exhaustive search is skipped for instances whose search space is
    /// larger than this.
    pub fn max_exhaustive_candidates(mut self, max_exhaustive_candidates: u64) -> Self {
        self.max_exhaustive_candidates = max_exhaustive_candidates;
        self
    }

    /// Sweep files are named `graph_n{n}_d{percent}.dg`.
    pub fn graph_file(dir: &Path, n: usize, density: f64) -> PathBuf {
        dir.join(format!(
            "graph_n{}_d{}.dg",
            n,
            (density * 100.0).floor() as usize
        ))
    }

    /// Target size used for an instance with `n` vertices.
    pub fn target_size(n: usize) -> usize {
        n / 2
    }

    /// Runs both searches on graphs generated in memory.
    pub fn run_generated(&self) -> Vec<ExperimentRecord> {
        let mut generator = GraphGenerator::new(self.seed);
        let mut records = vec![];
        'sweep: for n in self.vertices.clone() {
            let vertices = match generator.generate_vertices(n) {
                Ok(vertices) => vertices,
                Err(_e) => {
                    #[cfg(feature = "log")]
                    warn!("stopping sweep: {}", _e);
                    break;
                }
            };
            for density in &self.densities {
                if interrupted() {
                    break 'sweep;
                }
                let graph = generator.generate_digraph(&vertices, *density);
                records.push(self.run_instance(&graph, *density));
            }
        }
        records
    }

    /// Runs both searches on the sweep files in `dir`, skipping missing ones.
    pub fn run_directory(&self, dir: &Path) -> io::Result<Vec<ExperimentRecord>> {
        let mut records = vec![];
        'sweep: for n in self.vertices.clone() {
            for density in &self.densities {
                if interrupted() {
                    break 'sweep;
                }
                let path = Self::graph_file(dir, n, *density);
                if !path.exists() {
                    #[cfg(feature = "log")]
                    warn!("graph file not found, skipping: {}", path.display());
                    continue;
                }
                let reader = DigraphReader(BufReader::new(File::open(&path)?));
                let graph = HashMapDiGraph::try_from(reader)?;
                records.push(self.run_instance(&graph, *density));
            }
        }
        Ok(records)
    }

    /// Runs the exhaustive search (unless the instance is too large) and the
    /// greedy reduction on `graph` with `k = n / 2`.
    pub fn run_instance<G: DirectedGraph>(&self, graph: &G, density: f64) -> ExperimentRecord {
        let n = graph.order();
        let k = Self::target_size(n);
        #[cfg(feature = "log")]
        info!("instance n = {}, k = {}, density = {}", n, k, density);

        let exhaustive = if search_space_size(n, k) <= BigUint::from(self.max_exhaustive_candidates)
        {
            Some(find_closure_exhaustive(graph, k))
        } else {
            #[cfg(feature = "log")]
            warn!("skipping exhaustive search for n = {}, k = {}", n, k);
            None
        };
        let greedy = find_closure_greedy(graph, k);
        debug_assert!(exhaustive
            .iter()
            .chain(std::iter::once(&greedy))
            .filter_map(|r| r.closure())
            .all(|c| escaping_edge(graph, c).is_none()));

        let ex_found = exhaustive.as_ref().map(|r| r.found());
        ExperimentRecord {
            n,
            k,
            density,
            max_edges: n * n.saturating_sub(1),
            edges: graph.edge_count(),
            ex_found,
            ex_time: exhaustive.as_ref().map(|r| r.stats.time),
            ex_basic_ops: exhaustive.as_ref().map(|r| r.stats.basic_ops),
            ex_solutions_tested: exhaustive.as_ref().and_then(|r| r.stats.solutions_tested),
            gr_found: greedy.found(),
            gr_time: greedy.stats.time,
            gr_basic_ops: greedy.stats.basic_ops,
            heuristic_recall: heuristic_recall(ex_found, greedy.found()),
        }
    }
}

#[cfg(feature = "handle-ctrlc")]
fn interrupted() -> bool {
    received_ctrl_c()
}

#[cfg(not(feature = "handle-ctrlc"))]
fn interrupted() -> bool {
    false
}

/// Recall of the greedy reduction on a single instance: defined only when a
/// closure exists, in which case it is 1 if the reduction found one as well.
/// The reduction never reports a closure that is not one, so precision is
/// always 1 and not tracked.
pub fn heuristic_recall(ex_found: Option<bool>, gr_found: bool) -> Option<f64> {
    match ex_found {
        Some(true) if gr_found => Some(1.0),
        Some(true) => Some(0.0),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentRecord {
    pub n: usize,
    pub k: usize,
    pub density: f64,
    pub max_edges: usize,
    pub edges: usize,
    /// `None` when the exhaustive search was skipped.
    pub ex_found: Option<bool>,
    pub ex_time: Option<f64>,
    pub ex_basic_ops: Option<usize>,
    pub ex_solutions_tested: Option<usize>,
    pub gr_found: bool,
    pub gr_time: f64,
    pub gr_basic_ops: usize,
    pub heuristic_recall: Option<f64>,
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn write_records<W: Write>(records: &[ExperimentRecord], mut writer: W) -> io::Result<()> {
    writeln!(
        writer,
        "n,k,density,max_edges,edges,ex_found,ex_time_sec,ex_basic_ops,ex_solutions_tested,gr_found,gr_time_sec,gr_basic_ops,heuristic_recall"
    )?;
    for r in records {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            r.n,
            r.k,
            r.density,
            r.max_edges,
            r.edges,
            cell(r.ex_found),
            cell(r.ex_time),
            cell(r.ex_basic_ops),
            cell(r.ex_solutions_tested),
            r.gr_found,
            r.gr_time,
            r.gr_basic_ops,
            cell(r.heuristic_recall)
        )?;
    }
    writer.flush()
}

#[derive(Clone, Debug, PartialEq)]
pub struct LargeGreedyRecord {
    pub n: usize,
    pub k: usize,
    pub density: f64,
    pub gen_time: f64,
    pub algo_time: f64,
    pub total_time: f64,
    pub basic_ops: usize,
}

/// Greedy reduction on random `G(n, p)` digraphs, timing generation and
/// reduction separately.
pub fn run_large_greedy(
    instances: &[(usize, usize, f64)],
    generator: &mut GraphGenerator,
) -> Vec<LargeGreedyRecord> {
    let mut records = Vec::with_capacity(instances.len());
    for &(n, k, density) in instances {
        if interrupted() {
            break;
        }
        let stopwatch = Stopwatch::start();
        let graph = generator.gnp(n, density);
        let gen_time = stopwatch.elapsed_secs();
        #[cfg(feature = "log")]
        info!(
            "generated G({}, {}) with {} edges in {:.4}s",
            n,
            density,
            graph.edge_count(),
            gen_time
        );

        let result = find_closure_greedy(&graph, k);
        let algo_time = result.stats.time;
        records.push(LargeGreedyRecord {
            n,
            k,
            density,
            gen_time,
            algo_time,
            total_time: gen_time + algo_time,
            basic_ops: result.stats.basic_ops,
        });
    }
    records
}

pub fn write_large_greedy_records<W: Write>(
    records: &[LargeGreedyRecord],
    mut writer: W,
) -> io::Result<()> {
    writeln!(writer, "n,k,density,gen_time,algo_time,total_time,basic_ops")?;
    for r in records {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            r.n, r.k, r.density, r.gen_time, r.algo_time, r.total_time, r.basic_ops
        )?;
    }
    writer.flush()
}

/// Fixed-width summary table of large greedy runs.
pub fn summarize<W: Write>(records: &[LargeGreedyRecord], mut writer: W) -> io::Result<()> {
    writeln!(
        writer,
        "{:>6} | {:>6} | {:>7} | {:>12} | {:>12} | {:>12} | {:>10}",
        "n", "k", "density", "gen (s)", "algo (s)", "total (s)", "ops"
    )?;
    writeln!(writer, "{}", "-".repeat(86))?;
    for r in records {
        writeln!(
            writer,
            "{:>6} | {:>6} | {:>7.4} | {:>12.6} | {:>12.6} | {:>12.6} | {:>10}",
            r.n, r.k, r.density, r.gen_time, r.algo_time, r.total_time, r.basic_ops
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::experiment::{
        heuristic_recall, run_large_greedy, summarize, write_records, ExperimentConfig,
    };
    use crate::generator::GraphGenerator;
    use crate::graph::{HashMapDiGraph, MutableDiGraph};
    use crate::io::DigraphWriter;
    use std::fs;
    use std::fs::File;
    use std::path::PathBuf;

    #[test]
    fn recall() {
        assert_eq!(heuristic_recall(Some(true), true), Some(1.0));
        assert_eq!(heuristic_recall(Some(true), false), Some(0.0));
        assert_eq!(heuristic_recall(Some(false), false), None);
        assert_eq!(heuristic_recall(None, true), None);
    }

    #[test]
    fn small_sweep() {
        let config = ExperimentConfig::default().vertices(4..=8).seed(5);
        let records = config.run_generated();
        assert_eq!(records.len(), 5 * 4);
        for r in &records {
            assert_eq!(r.k, r.n / 2);
            assert_eq!(r.max_edges, r.n * (r.n - 1));
            assert!(r.ex_found.is_some());
            // greedy successes are always confirmed by the exhaustive search
            if r.gr_found {
                assert_eq!(r.ex_found, Some(true));
                assert_eq!(r.heuristic_recall, Some(1.0));
            }
        }
    }

    #[test]
    fn skips_large_exhaustive_searches() {
        let config = ExperimentConfig::default().max_exhaustive_candidates(10);
        let graph: HashMapDiGraph = HashMapDiGraph::from_edges(0..8, vec![(0, 1)]).unwrap();
        let record = config.run_instance(&graph, 0.0);
        assert_eq!(record.ex_found, None);
        assert_eq!(record.ex_solutions_tested, None);
        assert_eq!(record.heuristic_recall, None);
        assert!(record.gr_found);
    }

    #[test]
    fn csv_output() {
        let graph: HashMapDiGraph = HashMapDiGraph::from_edges(0..4, vec![(0, 1)]).unwrap();
        let record = ExperimentConfig::default().run_instance(&graph, 0.125);
        let mut buffer = Vec::new();
        write_records(&[record], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("n,k,density,max_edges,edges,ex_found"));
        assert!(lines[1].starts_with("4,2,0.125,12,1,true,"));
        assert!(lines[1].ends_with(",1"));
    }

    #[test]
    fn reads_sweep_directory() {
        let dir: PathBuf = std::env::temp_dir().join("closure_search_sweep_test");
        fs::create_dir_all(&dir).unwrap();

        let mut generator = GraphGenerator::new(11);
        let graph = generator.generate(6, 0.25).unwrap();
        let path = ExperimentConfig::graph_file(&dir, 6, 0.25);
        DigraphWriter::new(&graph, File::create(&path).unwrap())
            .output()
            .unwrap();

        let records = ExperimentConfig::default()
            .vertices(5..=6)
            .densities(vec![0.25])
            .run_directory(&dir)
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].n, 6);
        assert_eq!(records[0].edges, 7);
    }

    #[test]
    fn large_greedy_on_complete_graphs() {
        let mut generator = GraphGenerator::new(1);
        let records = run_large_greedy(&[(30, 15, 1.0), (10, 5, 0.0)], &mut generator);
        assert_eq!(records.len(), 2);
        // a complete digraph has no source, the reduction stops after one round
        assert_eq!(records[0].basic_ops, 1 + 30);
        // an edgeless one peels a vertex per round
        assert_eq!(records[1].basic_ops, 5 * 2);
        for r in &records {
            assert!((r.total_time - (r.gen_time + r.algo_time)).abs() < 1e-9);
        }

        let mut buffer = Vec::new();
        summarize(&records, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 4);
    }
}
