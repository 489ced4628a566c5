//! Seeding a grid from a word.
//!
//! Each ASCII character contributes its 8 bits (most significant first). The
//! resulting bitmask is folded into the most square rectangle that fits the
//! grid and placed at the grid's center.

use crate::grid::Grid;
use crate::simulation::{RunLimits, Simulation};
use cgol_core::{EngineConfig, Error, GameOutcome, GameRequest, Result};
use tracing::{debug, instrument};

/// Expand a word into one 0/1 byte per bit
pub fn word_to_bitmask(word: &str) -> Result<Vec<u8>> {
    GameRequest::new(word).validate()?;

    Ok(word
        .bytes()
        .flat_map(|byte| (0..8).rev().map(move |bit| (byte >> bit) & 1))
        .collect())
}

/// Most square `(rows, cols)` factorisation of `len` that fits within the bounds.
///
/// Only pairs with `rows <= cols` are considered.
pub fn optimal_shape(len: usize, max_rows: usize, max_cols: usize) -> Option<(usize, usize)> {
    (1..)
        .take_while(|&rows| rows * rows <= len)
        .filter(|&rows| len % rows == 0)
        .map(|rows| (rows, len / rows))
        .filter(|&(rows, cols)| rows <= max_rows && cols <= max_cols)
        .min_by_key(|&(rows, cols)| cols - rows)
}

/// Build the starting grid for a word
pub fn seed_grid(word: &str, rows: usize, cols: usize) -> Result<Grid> {
    let mut bitmask = word_to_bitmask(word)?;
    let mut grid = Grid::new(rows, cols)?;
    let capacity = rows * cols;

    if bitmask.len() >= capacity {
        bitmask.truncate(capacity);
        return Grid::from_cells(rows, cols, bitmask);
    }

    let (seed_rows, seed_cols) = optimal_shape(bitmask.len(), rows, cols).ok_or_else(|| {
        Error::Validation(format!(
            "Word of {} characters cannot be shaped into a {}x{} grid",
            word.len(),
            rows,
            cols
        ))
    })?;

    let top = rows / 2 - seed_rows / 2;
    let left = cols / 2 - seed_cols / 2;
    for (i, &cell) in bitmask.iter().enumerate() {
        grid.set(top + i / seed_cols, left + i % seed_cols, cell == 1);
    }

    debug!(seed_rows, seed_cols, top, left, "Seeded grid from word");
    Ok(grid)
}

/// Seed a grid from a word and run it to completion
#[instrument(skip(config))]
pub fn run_word(word: &str, config: &EngineConfig) -> Result<GameOutcome> {
    config.validate()?;
    let grid = seed_grid(word, config.grid_rows, config.grid_cols)?;
    Ok(Simulation::new(grid, RunLimits::from(config))?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgol_core::StopReason;

    #[test]
    fn test_word_to_bitmask() {
        assert_eq!(word_to_bitmask("A").unwrap(), vec![0, 1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(word_to_bitmask("ab").unwrap().len(), 16);
    }

    #[test]
    fn test_word_to_bitmask_rejects_bad_words() {
        assert!(matches!(word_to_bitmask(""), Err(Error::Validation(_))));
        assert!(matches!(word_to_bitmask("ÿ"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_optimal_shape() {
        assert_eq!(optimal_shape(8, 60, 40), Some((2, 4)));
        assert_eq!(optimal_shape(56, 60, 40), Some((7, 8)));
        assert_eq!(optimal_shape(64, 60, 40), Some((8, 8)));
        // 8 * 41 only splits into shapes wider than 40 columns
        assert_eq!(optimal_shape(328, 60, 40), None);
    }

    #[test]
    fn test_seed_grid_centers_word() {
        let grid = seed_grid("A", 60, 40).unwrap();
        // "A" = 0100 / 0001, a 2x4 block at (29, 18)
        assert_eq!(grid.population(), 2);
        assert!(grid.get(29, 19));
        assert!(grid.get(30, 21));
    }

    #[test]
    fn test_seed_grid_truncates_long_words() {
        let word = "z".repeat(10);
        let grid = seed_grid(&word, 4, 5).unwrap();
        let expected: Vec<u8> = word_to_bitmask(&word).unwrap()[..20].to_vec();
        assert_eq!(grid.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_seed_grid_rejects_unshapeable_word() {
        let word = "a".repeat(41);
        assert!(matches!(seed_grid(&word, 60, 40), Err(Error::Validation(_))));
    }

    #[test]
    fn test_run_word() {
        let outcome = run_word("A", &EngineConfig::default()).unwrap();
        assert_eq!(outcome.num_generations, 1);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.stop_reason, StopReason::Extinction);
    }

    #[test]
    fn test_run_word_is_deterministic() {
        let config = EngineConfig::default();
        let first = run_word("conway", &config).unwrap();
        let second = run_word("conway", &config).unwrap();
        assert_eq!(first, second);
        assert!(first.num_generations >= 1);
    }

    #[test]
    fn test_run_word_validates_config() {
        let config = EngineConfig {
            repeat_pattern_threshold: 0,
            ..Default::default()
        };
        assert!(run_word("conway", &config).is_err());
    }
}
