use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    complex::Complex,
    error::{Error, Result},
    grid::cell_count,
};

// ------------------------- Region -------------------------

/// Rectangle of the complex plane. `(x_start, y_start)` is the corner
/// sampled by cell `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub x_start: f64,
    pub y_start: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            x_start: -2.0,
            y_start: -2.0,
            width: 4.0,
            height: 4.0,
        }
    }
}

impl Region {
    pub fn new(x_start: f64, y_start: f64, width: f64, height: f64) -> Self {
        Self {
            x_start,
            y_start,
            width,
            height,
        }
    }
}

// ------------------------- Execution -------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    Sequential,
    Parallel,
}

impl Default for Execution {
    fn default() -> Self {
        Execution::Parallel
    }
}

impl Execution {
    pub fn label(&self) -> &'static str {
        match self {
            Execution::Sequential => "sequential",
            Execution::Parallel => "parallel",
        }
    }
}

// ------------------------- Grid configuration -------------------------

/// One generation request: where to sample, how densely, and when to stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub max_iterations: u32,
    pub max_modulus: f64,
    pub execution: Execution,
    // kept last so TOML output puts the table after the scalars
    pub region: Region,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 512,
            cols: 512,
            max_iterations: 100,
            max_modulus: 2.0,
            execution: Execution::default(),
            region: Region::default(),
        }
    }
}

impl GridConfig {
    pub fn new(
        region: Region,
        rows: usize,
        cols: usize,
        max_iterations: u32,
        max_modulus: f64,
    ) -> Self {
        Self {
            rows,
            cols,
            max_iterations,
            max_modulus,
            execution: Execution::default(),
            region,
        }
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Checks every precondition of grid generation.
    pub fn validate(&self) -> Result<()> {
        let r = &self.region;
        if !r.x_start.is_finite() || !r.y_start.is_finite() {
            return Err(invalid(format!(
                "region start must be finite, got ({}, {})",
                r.x_start, r.y_start
            )));
        }
        if !(r.width.is_finite() && r.width > 0.0) {
            return Err(invalid(format!("width must be positive, got {}", r.width)));
        }
        if !(r.height.is_finite() && r.height > 0.0) {
            return Err(invalid(format!(
                "height must be positive, got {}",
                r.height
            )));
        }
        if self.rows < 2 {
            return Err(invalid(format!("rows must be at least 2, got {}", self.rows)));
        }
        if self.cols < 2 {
            return Err(invalid(format!("cols must be at least 2, got {}", self.cols)));
        }
        if cell_count(self.rows, self.cols).is_none() {
            return Err(invalid(format!(
                "{}x{} grid is too large",
                self.rows, self.cols
            )));
        }
        if self.max_iterations < 1 {
            return Err(invalid("max_iterations must be at least 1"));
        }
        if !(self.max_modulus.is_finite() && self.max_modulus > 0.0) {
            return Err(invalid(format!(
                "max_modulus must be positive, got {}",
                self.max_modulus
            )));
        }
        Ok(())
    }

    pub fn dx(&self) -> f64 {
        self.region.width / (self.cols - 1) as f64
    }

    pub fn dy(&self) -> f64 {
        self.region.height / (self.rows - 1) as f64
    }

    /// Sample point of cell `(row, col)`: columns walk the real axis,
    /// rows walk the imaginary axis.
    pub fn point(&self, row: usize, col: usize) -> Complex {
        Complex::new(
            self.region.x_start + col as f64 * self.dx(),
            self.region.y_start + row as f64 * self.dy(),
        )
    }

    // ------------------------- Config IO -------------------------

    pub fn load(path: &Path) -> Result<GridConfig> {
        let data = fs::read_to_string(path)?;
        match extension(path) {
            "json" => serde_json::from_str(&data).map_err(|e| Error::Config(e.to_string())),
            "toml" => toml::from_str(&data).map_err(|e| Error::Config(e.to_string())),
            _ => serde_json::from_str(&data)
                .or_else(|_| toml::from_str(&data))
                .map_err(|e| Error::Config(e.to_string())),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = match extension(path) {
            "toml" => self.to_toml()?,
            _ => self.to_json()?,
        };
        fs::write(path, data)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfiguration(msg.into())
}
