//! Escape-time evaluation of a rectangular grid of sample points.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{
    complex::Complex,
    config::{Execution, GridConfig},
    error::{Error, Result},
};

// ------------------------- Iteration grid -------------------------

/// Dense row-major `rows × cols` grid of iteration counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationGrid {
    rows: usize,
    cols: usize,
    data: Vec<u32>,
}

/// Number of cells in a `rows × cols` grid, or `None` when the grid
/// would be empty or could not be allocated.
pub fn cell_count(rows: usize, cols: usize) -> Option<usize> {
    if rows == 0 || cols == 0 {
        return None;
    }
    rows.checked_mul(cols)
        .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<u32>())
}

impl IterationGrid {
    /// Zero-filled grid, to be overwritten cell by cell.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let cells = cell_count(rows, cols).ok_or_else(|| unusable_shape(rows, cols))?;
        Ok(Self {
            rows,
            cols,
            data: vec![0; cells],
        })
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<u32>) -> Result<Self> {
        let cells = cell_count(rows, cols).ok_or_else(|| unusable_shape(rows, cols))?;
        if data.len() != cells {
            return Err(Error::DimensionMismatch {
                rows,
                cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: u32) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::CellOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> {
        self.data.chunks(self.cols)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.data
    }
}

fn unusable_shape(rows: usize, cols: usize) -> Error {
    Error::InvalidConfiguration(format!("cannot hold a {rows}x{cols} grid"))
}

// ------------------------- Escape time -------------------------

/// Iterates `z ← z² + c` from `z = 0` and returns the step at which
/// `|z| >= max_modulus`, or `max_iterations` if the orbit stays bounded.
pub fn escape_time(c: Complex, max_iterations: u32, max_modulus: f64) -> u32 {
    let mut z = Complex::ZERO;
    let mut count = 0;
    while count < max_iterations {
        z = z * z + c;
        count += 1;
        // a NaN modulus (inf - inf after overflow) counts as escaped
        if !(z.modulus() < max_modulus) {
            return count;
        }
    }
    max_iterations
}

/// Validates `config` and evaluates every cell.
pub fn generate(config: &GridConfig) -> Result<IterationGrid> {
    config.validate()?;
    debug!(
        "generating {}x{} grid over {:?} (max_iter {}, max_modulus {}, {})",
        config.rows,
        config.cols,
        config.region,
        config.max_iterations,
        config.max_modulus,
        config.execution.label()
    );

    let started = Instant::now();
    let mut grid = IterationGrid::new(config.rows, config.cols)?;
    let cols = config.cols;
    match config.execution {
        Execution::Sequential => {
            for (row, cells) in grid.data.chunks_mut(cols).enumerate() {
                fill_row(config, row, cells);
            }
        }
        Execution::Parallel => {
            grid.data
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(|(row, cells)| fill_row(config, row, cells));
        }
    }

    info!(
        "generated {}x{} grid in {:.2?}",
        config.rows,
        config.cols,
        started.elapsed()
    );
    Ok(grid)
}

fn fill_row(config: &GridConfig, row: usize, cells: &mut [u32]) {
    for (col, cell) in cells.iter_mut().enumerate() {
        *cell = escape_time(
            config.point(row, col),
            config.max_iterations,
            config.max_modulus,
        );
    }
}

// ------------------------- Engine -------------------------

/// A validated generation request. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct Engine {
    config: GridConfig,
}

impl Engine {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<IterationGrid> {
        generate(&self.config)
    }
}
