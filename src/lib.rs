//! Mandelgrid — numeric core of an escape-time Mandelbrot renderer.
//! - Complex arithmetic (`complex`)
//! - Validated generation requests, JSON/TOML config files (`config`)
//! - Sequential or rayon-parallel escape-time grids (`grid`)
//! - 16-bit grayscale intensity maps and PNG export (`intensity`)
//! - The plain-text grid file format (`codec`)

pub mod codec;
pub mod complex;
pub mod config;
pub mod error;
pub mod grid;
pub mod intensity;

pub use codec::{deserialize, read_grid, serialize, write_grid};
pub use complex::Complex;
pub use config::{Execution, GridConfig, Region};
pub use error::{Error, Result};
pub use grid::{escape_time, generate, Engine, IterationGrid};
pub use intensity::{map_counts, to_intensity, to_intensity_with, IntensityMap, PixelBuffer};
