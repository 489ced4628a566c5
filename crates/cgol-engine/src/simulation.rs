//! Run controller: drives the generation loop and decides when to stop.

use crate::fingerprint::{Fingerprinter, Sha256Fingerprinter};
use crate::grid::{Grid, StepResult};
use cgol_core::{EngineConfig, Error, GameOutcome, Result, StopReason};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

/// Bounds on a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub max_generations: u32,
    /// A recurrence with a period below this counts as a repeated pattern
    pub repeat_pattern_threshold: u32,
}

impl RunLimits {
    pub fn validate(&self) -> Result<()> {
        if self.repeat_pattern_threshold < 1 {
            return Err(Error::Validation(
                "repeat_pattern_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&EngineConfig> for RunLimits {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_generations: config.max_generations,
            repeat_pattern_threshold: config.repeat_pattern_threshold,
        }
    }
}

/// One simulation run. All state lives and dies with the value.
pub struct Simulation<F: Fingerprinter = Sha256Fingerprinter> {
    grid: Grid,
    fingerprinter: F,
    /// Fingerprint -> generation it was last recorded at
    history: HashMap<F::Digest, u32>,
    limits: RunLimits,
    generation: u32,
    score: u64,
}

impl Simulation<Sha256Fingerprinter> {
    pub fn new(grid: Grid, limits: RunLimits) -> Result<Self> {
        Self::with_fingerprinter(grid, limits, Sha256Fingerprinter)
    }
}

impl<F: Fingerprinter> Simulation<F> {
    pub fn with_fingerprinter(grid: Grid, limits: RunLimits, fingerprinter: F) -> Result<Self> {
        limits.validate()?;

        let mut history = HashMap::new();
        history.insert(fingerprinter.fingerprint(grid.as_bytes()), 0);

        Ok(Self {
            grid,
            fingerprinter,
            history,
            limits,
            generation: 0,
            score: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Run until a stop condition fires or the generation cap is reached
    #[instrument(skip(self), fields(
        rows = self.grid.rows(),
        cols = self.grid.cols(),
        max_generations = self.limits.max_generations
    ))]
    pub fn run(mut self) -> GameOutcome {
        let stop_reason = loop {
            if self.generation >= self.limits.max_generations {
                break StopReason::GenerationLimitReached;
            }
            if let Some(reason) = self.advance() {
                break reason;
            }
        };

        debug!(
            generation = self.generation,
            score = self.score,
            stop_reason = %stop_reason,
            "Simulation stopped"
        );

        GameOutcome {
            num_generations: self.generation,
            score: self.score,
            stop_reason,
        }
    }

    /// Compute one generation and check the stop conditions in order
    fn advance(&mut self) -> Option<StopReason> {
        let StepResult {
            grid,
            births,
            unchanged,
        } = self.grid.step();

        self.grid = grid;
        self.generation += 1;
        self.score += u64::from(births);

        trace!(
            generation = self.generation,
            births,
            score = self.score,
            "Generation computed"
        );

        if self.grid.is_extinct() {
            return Some(StopReason::Extinction);
        }

        if unchanged {
            return Some(StopReason::PersistentState);
        }

        let digest = self.fingerprinter.fingerprint(self.grid.as_bytes());
        match self.history.entry(digest) {
            Entry::Vacant(entry) => {
                entry.insert(self.generation);
                None
            }
            Entry::Occupied(mut entry) => {
                let period = self.generation - *entry.get();
                if period < self.limits.repeat_pattern_threshold {
                    trace!(period, "Short-period recurrence");
                    Some(StopReason::RepeatedPattern)
                } else {
                    entry.insert(self.generation);
                    None
                }
            }
        }
    }
}

/// Single-call entry point over a raw row-major 0/1 buffer.
///
/// The caller's buffer is copied; it is never modified.
pub fn run_simulation(
    cells: &[u8],
    rows: usize,
    cols: usize,
    max_generations: u32,
    repeat_pattern_threshold: u32,
) -> Result<GameOutcome> {
    let grid = Grid::from_cells(rows, cols, cells.to_vec())?;
    let limits = RunLimits {
        max_generations,
        repeat_pattern_threshold,
    };
    Ok(Simulation::new(grid, limits)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BLOCK: [u8; 16] = [
        0, 0, 0, 0, //
        0, 1, 1, 0, //
        0, 1, 1, 0, //
        0, 0, 0, 0,
    ];

    const BLINKER: [u8; 25] = [
        0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, //
        0, 1, 1, 1, 0, //
        0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0,
    ];

    fn outcome(num_generations: u32, score: u64, stop_reason: StopReason) -> GameOutcome {
        GameOutcome {
            num_generations,
            score,
            stop_reason,
        }
    }

    /// Fingerprints by cloning the bytes, to exercise the injected seam
    struct IdentityFingerprinter;

    impl Fingerprinter for IdentityFingerprinter {
        type Digest = Vec<u8>;

        fn fingerprint(&self, bytes: &[u8]) -> Self::Digest {
            bytes.to_vec()
        }
    }

    #[test]
    fn test_all_dead_goes_extinct() {
        let result = run_simulation(&[0; 9], 3, 3, 100, 10).unwrap();
        assert_eq!(result, outcome(1, 0, StopReason::Extinction));
    }

    #[test]
    fn test_lonely_cell_goes_extinct() {
        let mut cells = [0u8; 9];
        cells[4] = 1;
        let result = run_simulation(&cells, 3, 3, 100, 10).unwrap();
        assert_eq!(result, outcome(1, 0, StopReason::Extinction));
    }

    #[test]
    fn test_block_is_persistent_state() {
        let result = run_simulation(&BLOCK, 4, 4, 100, 10).unwrap();
        assert_eq!(result, outcome(1, 0, StopReason::PersistentState));
    }

    #[test]
    fn test_blinker_is_repeated_pattern() {
        let result = run_simulation(&BLINKER, 5, 5, 100, 3).unwrap();
        assert_eq!(result, outcome(2, 4, StopReason::RepeatedPattern));
    }

    #[test]
    fn test_blinker_below_threshold_runs_to_limit() {
        let result = run_simulation(&BLINKER, 5, 5, 10, 1).unwrap();
        assert_eq!(result, outcome(10, 20, StopReason::GenerationLimitReached));
    }

    #[test]
    fn test_long_recurrence_resets_clock() {
        // Period 2 is not shorter than 2, so every recurrence just updates the history
        let result = run_simulation(&BLINKER, 5, 5, 7, 2).unwrap();
        assert_eq!(result, outcome(7, 14, StopReason::GenerationLimitReached));
    }

    #[test]
    fn test_zero_generations_is_noop() {
        let result = run_simulation(&BLINKER, 5, 5, 0, 10).unwrap();
        assert_eq!(result, outcome(0, 0, StopReason::GenerationLimitReached));
    }

    #[test]
    fn test_condition_on_last_generation_beats_limit() {
        let result = run_simulation(&BLOCK, 4, 4, 1, 10).unwrap();
        assert_eq!(result, outcome(1, 0, StopReason::PersistentState));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let err = run_simulation(&BLINKER, 5, 5, 10, 0).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_rejects_buffer_mismatch() {
        let err = run_simulation(&BLINKER, 4, 5, 10, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions(_)));
    }

    #[test]
    fn test_input_buffer_untouched() {
        let cells = BLINKER;
        run_simulation(&cells, 5, 5, 10, 3).unwrap();
        assert_eq!(cells, BLINKER);
    }

    #[test]
    fn test_custom_fingerprinter() {
        let grid = Grid::from_cells(5, 5, BLINKER.to_vec()).unwrap();
        let limits = RunLimits {
            max_generations: 100,
            repeat_pattern_threshold: 3,
        };
        let sim = Simulation::with_fingerprinter(grid, limits, IdentityFingerprinter).unwrap();
        assert_eq!(sim.run(), outcome(2, 4, StopReason::RepeatedPattern));
    }

    #[test]
    fn test_accessors_track_progress() {
        let grid = Grid::from_cells(5, 5, BLINKER.to_vec()).unwrap();
        let limits = RunLimits {
            max_generations: 100,
            repeat_pattern_threshold: 3,
        };
        let mut sim = Simulation::new(grid, limits).unwrap();
        assert_eq!(sim.generation(), 0);

        assert_eq!(sim.advance(), None);
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.score(), 2);
        assert_eq!(sim.grid().population(), 3);

        assert_eq!(sim.advance(), Some(StopReason::RepeatedPattern));
    }

    fn arb_cells() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
        (1usize..10, 1usize..10).prop_flat_map(|(rows, cols)| {
            (Just(rows), Just(cols), prop::collection::vec(0u8..=1, rows * cols))
        })
    }

    proptest! {
        #[test]
        fn prop_runs_are_deterministic(
            (rows, cols, cells) in arb_cells(),
            max_generations in 0u32..60,
            threshold in 1u32..12,
        ) {
            let first = run_simulation(&cells, rows, cols, max_generations, threshold).unwrap();
            let second = run_simulation(&cells, rows, cols, max_generations, threshold).unwrap();
            prop_assert_eq!(first, second);
            prop_assert!(first.num_generations <= max_generations);
        }

        #[test]
        fn prop_score_is_sum_of_births(
            (rows, cols, cells) in arb_cells(),
            max_generations in 0u32..60,
        ) {
            let result = run_simulation(&cells, rows, cols, max_generations, 10).unwrap();

            let mut grid = Grid::from_cells(rows, cols, cells).unwrap();
            let mut births = 0u64;
            for _ in 0..result.num_generations {
                let step = grid.step();
                births += u64::from(step.births);
                grid = step.grid;
            }
            prop_assert_eq!(result.score, births);
        }
    }
}
