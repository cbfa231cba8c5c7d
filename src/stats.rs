use std::time::{Duration, Instant};

/// Per-run measurements handed back with every search result.
///
/// `basic_ops` counts vertices examined by the closure check for the
/// exhaustive search, and subgraph constructions plus in-degree checks for the
/// greedy reduction. `solutions_tested` is only tracked by the exhaustive
/// search.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    /// Wall-clock seconds.
    pub time: f64,
    pub basic_ops: usize,
    pub solutions_tested: Option<usize>,
}

impl Stats {
    /// All-zero record used for infeasible target sizes.
    pub fn zeroed(track_solutions: bool) -> Self {
        Self {
            time: 0.0,
            basic_ops: 0,
            solutions_tested: if track_solutions { Some(0) } else { None },
        }
    }
}

pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Packages the counters together with the time elapsed so far.
    pub fn finish(&self, basic_ops: usize, solutions_tested: Option<usize>) -> Stats {
        Stats {
            time: self.elapsed_secs(),
            basic_ops,
            solutions_tested,
        }
    }
}
