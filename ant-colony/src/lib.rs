pub mod ant;
pub mod colony;
pub mod cost;
pub mod distance;
pub mod error;
pub mod graph;
pub mod nearest_neighbor;
pub mod params;
pub mod pheromone;
pub mod rng;

pub use colony::{solve, Colony, IterationReport, Solution};
pub use cost::Cost;
pub use error::{AcoError, AcoResult, ConfigError, LoadError};
pub use params::AcoParams;
