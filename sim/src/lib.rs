pub mod matrix;
pub mod runner;

pub use matrix::{run_matrix, MatrixReport};
pub use runner::{run_game, run_simulation, run_simulation_with, PolicyChoice, SimConfig, SimStats};
