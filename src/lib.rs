pub mod datastructures;
pub use datastructures::VertexSet;

pub mod closure;
pub mod exact;
pub mod experiment;
pub mod generator;
pub mod graph;
pub mod greedy_reduction;
pub mod io;
pub mod solver;
pub mod stats;

#[cfg(feature = "logging")]
pub mod logger;
#[cfg(feature = "handle-ctrlc")]
pub mod signals;

pub use solver::{find_closure_exhaustive, find_closure_greedy, is_closure};
