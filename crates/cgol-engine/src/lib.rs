//! Game of Life simulation engine.
//!
//! A bounded B3/S23 grid is stepped generation by generation until it dies
//! out, stops changing, falls into a short cycle, or hits the generation cap.
//! Cycles are found by fingerprinting every grid state.

pub mod fingerprint;
pub mod grid;
pub mod seed;
pub mod simulation;

pub use fingerprint::{Fingerprinter, Sha256Fingerprinter};
pub use grid::{Grid, StepResult};
pub use seed::{run_word, seed_grid, word_to_bitmask};
pub use simulation::{run_simulation, RunLimits, Simulation};
