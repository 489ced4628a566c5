//! Bounded 2D cell grid and the B3/S23 step rule.

use cgol_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

const NEIGHBOR_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A 2D grid with hard edges: cells outside `[0, rows) x [0, cols)` count as dead.
///
/// `rows * cols == cells.len()` and every cell is 0 or 1; deserialization
/// goes through [`Grid::from_cells`] to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

/// Unchecked wire form of a [`Grid`]
#[derive(Deserialize)]
struct GridData {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl TryFrom<GridData> for Grid {
    type Error = Error;

    fn try_from(data: GridData) -> Result<Self> {
        Grid::from_cells(data.rows, data.cols, data.cells)
    }
}

/// Output of a single generation
#[derive(Debug, Clone)]
pub struct StepResult {
    pub grid: Grid,
    /// Cells that went from dead to alive
    pub births: u32,
    /// The new grid is identical to the previous one
    pub unchanged: bool,
}

impl Grid {
    /// All-dead grid
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let size = checked_size(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![DEAD; size],
        })
    }

    /// Build a grid from a row-major buffer of 0/1 bytes
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self> {
        let size = checked_size(rows, cols)?;
        if cells.len() != size {
            return Err(Error::InvalidDimensions(format!(
                "{}x{} grid needs {} cells, got {}",
                rows,
                cols,
                size,
                cells.len()
            )));
        }
        if let Some(index) = cells.iter().position(|&cell| cell > ALIVE) {
            return Err(Error::Validation(format!(
                "cell {} has state {}, expected 0 or 1",
                index, cells[index]
            )));
        }

        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Panics if the cell is outside the grid
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)] == ALIVE
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let index = self.index(row, col);
        self.cells[index] = if alive { ALIVE } else { DEAD };
    }

    /// Count live cells in the Moore neighborhood of an in-bounds cell
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for (dr, dc) in NEIGHBOR_DELTAS {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                continue;
            };
            if r < self.rows && c < self.cols {
                count += self.cells[self.index(r, c)];
            }
        }
        count
    }

    /// Compute the next generation from this one
    pub fn step(&self) -> StepResult {
        let mut next = vec![DEAD; self.cells.len()];
        let mut births = 0;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let index = self.index(row, col);
                let neighbors = self.live_neighbors(row, col);

                match (self.cells[index], neighbors) {
                    (ALIVE, 2) | (ALIVE, 3) => next[index] = ALIVE,
                    (DEAD, 3) => {
                        next[index] = ALIVE;
                        births += 1;
                    }
                    _ => {}
                }
            }
        }

        let unchanged = next == self.cells;
        StepResult {
            grid: Grid {
                rows: self.rows,
                cols: self.cols,
                cells: next,
            },
            births,
            unchanged,
        }
    }

    pub fn is_extinct(&self) -> bool {
        self.cells.iter().all(|&cell| cell == DEAD)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == ALIVE).count()
    }

    /// Raw row-major cell states
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        self.cols * row + col
    }
}

fn checked_size(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions(format!(
            "grid must have at least one cell, got {}x{}",
            rows, cols
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        Error::InvalidDimensions(format!("{}x{} grid is too large", rows, cols))
    })
}
