pub use combinations::{search_space_size, Combinations};
pub use exhaustive::ExhaustiveSearcher;

mod combinations;
mod exhaustive;
