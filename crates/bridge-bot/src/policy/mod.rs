mod fixed;
mod heuristic;
mod random;

pub use fixed::PassStrategy;
pub use heuristic::HeuristicStrategy;
pub use random::RandomStrategy;
