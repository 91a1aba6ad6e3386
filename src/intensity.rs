//! Iteration counts to 16-bit grayscale.

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Luma};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::{cell_count, IterationGrid},
};

pub const MAX_INTENSITY: u16 = u16::MAX;

/// Darkening offset applied by the legacy desktop viewer.
const LEGACY_DARKEN: u16 = 20_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntensityMap {
    /// `65535 - v`; points that never escaped are black.
    Inverted,
    /// `65535 - v - 20000` with 16-bit wrap-around; points that never
    /// escaped are black.
    LegacyOffset,
}

impl Default for IntensityMap {
    fn default() -> Self {
        IntensityMap::Inverted
    }
}

impl IntensityMap {
    pub fn label(&self) -> &'static str {
        match self {
            IntensityMap::Inverted => "Inverted",
            IntensityMap::LegacyOffset => "Legacy offset",
        }
    }

    pub fn apply(&self, value: u32, max_iterations: u32) -> u16 {
        if value == max_iterations {
            return 0;
        }
        match self {
            IntensityMap::Inverted => match u16::try_from(value) {
                Ok(v) => MAX_INTENSITY - v,
                Err(_) => 0,
            },
            // truncates like the legacy viewer's `(ushort)` cast
            IntensityMap::LegacyOffset => MAX_INTENSITY
                .wrapping_sub(value as u16)
                .wrapping_sub(LEGACY_DARKEN),
        }
    }
}

// ------------------------- Pixel buffer -------------------------

/// Dense row-major grayscale image, one intensity per grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    rows: usize,
    cols: usize,
    data: Vec<u16>,
}

impl PixelBuffer {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u16> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    /// Width is the column count, height the row count.
    pub fn to_image(&self) -> Result<ImageBuffer<Luma<u16>, Vec<u16>>> {
        let width = u32::try_from(self.cols)
            .map_err(|_| Error::Config(format!("{} columns do not fit an image", self.cols)))?;
        let height = u32::try_from(self.rows)
            .map_err(|_| Error::Config(format!("{} rows do not fit an image", self.rows)))?;
        ImageBuffer::from_raw(width, height, self.data.clone()).ok_or(
            Error::DimensionMismatch {
                rows: self.rows,
                cols: self.cols,
                actual: self.data.len(),
            },
        )
    }

    /// Writes a 16-bit grayscale PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_image()?.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Maps a grid with the default [`IntensityMap::Inverted`] rule.
pub fn to_intensity(grid: &IterationGrid, max_iterations: u32) -> PixelBuffer {
    to_intensity_with(grid, max_iterations, IntensityMap::default())
}

pub fn to_intensity_with(
    grid: &IterationGrid,
    max_iterations: u32,
    map: IntensityMap,
) -> PixelBuffer {
    PixelBuffer {
        rows: grid.rows(),
        cols: grid.cols(),
        data: grid
            .as_slice()
            .iter()
            .map(|&v| map.apply(v, max_iterations))
            .collect(),
    }
}

/// Maps raw row-major counts whose shape is declared separately.
pub fn map_counts(
    rows: usize,
    cols: usize,
    counts: &[u32],
    max_iterations: u32,
    map: IntensityMap,
) -> Result<PixelBuffer> {
    if cell_count(rows, cols) != Some(counts.len()) {
        return Err(Error::DimensionMismatch {
            rows,
            cols,
            actual: counts.len(),
        });
    }
    Ok(PixelBuffer {
        rows,
        cols,
        data: counts.iter().map(|&v| map.apply(v, max_iterations)).collect(),
    })
}
