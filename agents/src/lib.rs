pub mod heuristic;
pub mod random;

pub use heuristic::HeuristicPolicy;
pub use random::RandomPolicy;

// The `Policy` trait itself lives in the engine, since the engine
// invokes it mid-action; re-exported here for convenience.
pub use tank_engine::Policy;
