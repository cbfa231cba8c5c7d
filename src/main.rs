use closure_search::experiment::{
    run_large_greedy, summarize, write_large_greedy_records, write_records, ExperimentConfig,
    DENSE_INSTANCES,
};
use closure_search::generator::GraphGenerator;
use closure_search::graph::HashMapDiGraph;
use closure_search::io::{DigraphReader, DigraphWriter};
use closure_search::solver::{Outcome, SearchResult, SolverType};
use closure_search::stats::Stats;
use std::convert::TryFrom;
use std::fs;
use std::fs::{File, OpenOptions};
use std::io;
use std::io::{stdin, stdout, BufReader, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "closure-search-cli",
    about = "Finds closures of a given size in directed graphs."
)]
enum Opt {
    /// Writes random sweep graphs, one file per vertex count and density.
    Generate {
        /// Target directory, created if missing.
        #[structopt(parse(from_os_str), default_value = "graphs")]
        dir: PathBuf,

        #[structopt(long, default_value = "4")]
        min_vertices: usize,

        #[structopt(long, default_value = "15")]
        max_vertices: usize,

        #[structopt(
            long,
            use_delimiter = true,
            default_value = "0.125,0.25,0.5,0.75"
        )]
        densities: Vec<f64>,

        #[structopt(long, default_value = "130449")]
        seed: u64,
    },

    /// Searches one graph for a closure with `k` vertices.
    Solve {
        /// Closure size. Negative sizes are infeasible.
        #[structopt(allow_hyphen_values = true)]
        k: i64,

        /// Input file in the `p dg` edge list format. `stdin` if not specified.
        #[structopt(parse(from_os_str))]
        input: Option<PathBuf>,

        /// exhaustive, greedy or greedy-min-out-degree. Runs exhaustive and
        /// greedy if not specified.
        #[structopt(short, long)]
        solver: Option<SolverType>,
    },

    /// Runs both searches over a sweep with `k = n / 2` and writes CSV.
    Experiment {
        /// Directory of sweep files. Graphs are generated in memory if not
        /// specified.
        #[structopt(short, long, parse(from_os_str))]
        dir: Option<PathBuf>,

        /// Output file. `stdout` if not specified.
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,

        #[structopt(long, default_value = "4")]
        min_vertices: usize,

        #[structopt(long, default_value = "15")]
        max_vertices: usize,

        #[structopt(long, default_value = "130449")]
        seed: u64,

        /// Skips the exhaustive search when it would test more candidates.
        #[structopt(long, default_value = "50000000")]
        max_exhaustive_candidates: u64,
    },

    /// Runs the greedy reduction on large complete digraphs.
    LargeGreedy {
        /// CSV output file. Only the summary table is printed if not specified.
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,

        #[structopt(long, default_value = "130449")]
        seed: u64,
    },
}

fn output_writer(path: Option<PathBuf>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?,
        ),
        None => Box::new(stdout()),
    })
}

fn read_graph(input: Option<PathBuf>) -> io::Result<HashMapDiGraph> {
    match input {
        Some(path) => {
            let file = File::open(path)?;
            HashMapDiGraph::try_from(DigraphReader(BufReader::new(file)))
        }
        None => {
            let stdin = stdin();
            let reader = DigraphReader(stdin.lock());
            HashMapDiGraph::try_from(reader)
        }
    }
}

fn print_result(solver: SolverType, result: &SearchResult<usize>) {
    let status = match result.outcome {
        Outcome::Found(_) => "found",
        Outcome::Exhausted => "no closure",
        Outcome::Infeasible => "infeasible",
        Outcome::Stuck(_) => "stuck",
    };
    println!("{}: {}", solver, status);
    if let Some(closure) = result.closure() {
        let mut members: Vec<usize> = closure.iter().map(|v| v + 1).collect();
        members.sort_unstable();
        println!("  vertices: {:?}", members);
    }
    println!("  time: {:.6}s", result.stats.time);
    println!("  basic ops: {}", result.stats.basic_ops);
    if let Some(tested) = result.stats.solutions_tested {
        println!("  solutions tested: {}", tested);
    }
}

fn solve(k: i64, input: Option<PathBuf>, solver: Option<SolverType>) -> io::Result<()> {
    let graph = read_graph(input)?;
    let solvers = match solver {
        Some(solver) => vec![solver],
        None => vec![SolverType::Exhaustive, SolverType::Greedy],
    };
    for solver in solvers {
        let result = if k < 0 {
            let track_solutions = solver == SolverType::Exhaustive;
            SearchResult::new(Outcome::Infeasible, Stats::zeroed(track_solutions))
        } else {
            solver.compute(&graph, k as usize)
        };
        print_result(solver, &result);
    }
    Ok(())
}

fn generate(
    dir: PathBuf,
    vertices: std::ops::RangeInclusive<usize>,
    densities: Vec<f64>,
    seed: u64,
) -> io::Result<()> {
    fs::create_dir_all(&dir)?;
    let mut generator = GraphGenerator::new(seed);
    for n in vertices {
        let points = generator
            .generate_vertices(n)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        for density in &densities {
            let graph = generator.generate_digraph(&points, *density);
            let path = ExperimentConfig::graph_file(&dir, n, *density);
            DigraphWriter::new(&graph, File::create(&path)?).output()?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    #[cfg(feature = "logging")]
    closure_search::logger::build_logger();

    #[cfg(feature = "handle-ctrlc")]
    closure_search::signals::initialize()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    match Opt::from_args() {
        Opt::Generate {
            dir,
            min_vertices,
            max_vertices,
            densities,
            seed,
        } => generate(dir, min_vertices..=max_vertices, densities, seed),
        Opt::Solve { k, input, solver } => solve(k, input, solver),
        Opt::Experiment {
            dir,
            output,
            min_vertices,
            max_vertices,
            seed,
            max_exhaustive_candidates,
        } => {
            let config = ExperimentConfig::default()
                .vertices(min_vertices..=max_vertices)
                .seed(seed)
                .max_exhaustive_candidates(max_exhaustive_candidates);
            let records = match dir {
                Some(dir) => config.run_directory(&dir)?,
                None => config.run_generated(),
            };
            write_records(&records, output_writer(output)?)
        }
        Opt::LargeGreedy { output, seed } => {
            let mut generator = GraphGenerator::new(seed);
            let records = run_large_greedy(&DENSE_INSTANCES, &mut generator);
            if let Some(path) = output {
                write_large_greedy_records(&records, output_writer(Some(path))?)?;
            }
            summarize(&records, stdout())
        }
    }
}
