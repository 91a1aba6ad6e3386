//! Mandelgrid — headless shell around the escape-time core.
//! - `generate`: compute a grid from flags and/or a JSON/TOML config
//! - `render`: turn a saved grid text file into a 16-bit grayscale PNG
//! - `config`: print or write the default configuration

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use log::info;

use mandelgrid::{
    codec, generate, intensity::to_intensity_with, Execution, GridConfig, IntensityMap,
};

// ------------------------- CLI -------------------------

#[derive(Parser)]
#[command(name = "mandelgrid")]
#[command(about = "Escape-time Mandelbrot grids and grayscale renders")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compute an iteration grid
    Generate {
        /// Base configuration (.json / .toml); flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,

        /// Grid text file to write (stdout when no output is given)
        #[arg(long)]
        grid_out: Option<PathBuf>,

        /// Grayscale PNG to write
        #[arg(long)]
        image_out: Option<PathBuf>,

        #[arg(long)]
        legacy_palette: bool,
    },
    /// Render a saved grid without recomputing it
    Render {
        grid: PathBuf,

        #[arg(long)]
        image_out: PathBuf,

        /// Iteration cap the grid was generated with
        #[arg(long, default_value_t = 100)]
        max_iterations: u32,

        #[arg(long)]
        legacy_palette: bool,
    },
    /// Print (or write) the default configuration
    Config {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(clap::Args, Default)]
struct Overrides {
    #[arg(long, allow_negative_numbers = true)]
    x_start: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    y_start: Option<f64>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    #[arg(long)]
    max_iterations: Option<u32>,
    #[arg(long)]
    max_modulus: Option<f64>,
    /// Evaluate on the calling thread only
    #[arg(long)]
    sequential: bool,
}

impl Overrides {
    fn apply(&self, cfg: &mut GridConfig) {
        if let Some(v) = self.x_start {
            cfg.region.x_start = v;
        }
        if let Some(v) = self.y_start {
            cfg.region.y_start = v;
        }
        if let Some(v) = self.width {
            cfg.region.width = v;
        }
        if let Some(v) = self.height {
            cfg.region.height = v;
        }
        if let Some(v) = self.rows {
            cfg.rows = v;
        }
        if let Some(v) = self.cols {
            cfg.cols = v;
        }
        if let Some(v) = self.max_iterations {
            cfg.max_iterations = v;
        }
        if let Some(v) = self.max_modulus {
            cfg.max_modulus = v;
        }
        if self.sequential {
            cfg.execution = Execution::Sequential;
        }
    }
}

fn palette(legacy: bool) -> IntensityMap {
    if legacy {
        IntensityMap::LegacyOffset
    } else {
        IntensityMap::Inverted
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Grid(#[from] mandelgrid::Error),
    #[error("IO: {0}")]
    Io(#[from] io::Error),
}

// ------------------------- Commands -------------------------

fn run(cmd: Cmd) -> Result<(), CliError> {
    match cmd {
        Cmd::Generate {
            config,
            overrides,
            grid_out,
            image_out,
            legacy_palette,
        } => {
            let mut cfg = match config {
                Some(path) => GridConfig::load(&path)?,
                None => GridConfig::default(),
            };
            overrides.apply(&mut cfg);
            let grid = generate(&cfg)?;

            if let Some(path) = &grid_out {
                codec::write_grid(path, &grid)?;
                info!("grid saved to {}", path.display());
            }
            if let Some(path) = &image_out {
                to_intensity_with(&grid, cfg.max_iterations, palette(legacy_palette))
                    .save_png(path)?;
                info!("image saved to {}", path.display());
            }
            if grid_out.is_none() && image_out.is_none() {
                io::stdout().write_all(codec::serialize(&grid).as_bytes())?;
            }
        }
        Cmd::Render {
            grid,
            image_out,
            max_iterations,
            legacy_palette,
        } => {
            let loaded = codec::read_grid(&grid)?;
            let map = palette(legacy_palette);
            to_intensity_with(&loaded, max_iterations, map).save_png(&image_out)?;
            info!(
                "rendered {} ({}) to {}",
                grid.display(),
                map.label(),
                image_out.display()
            );
        }
        Cmd::Config { out } => {
            let cfg = GridConfig::default();
            match out {
                Some(path) => cfg.save(&path)?,
                None => println!("{}", cfg.to_json()?),
            }
        }
    }
    Ok(())
}

// ------------------------- Entry -------------------------

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args.cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mandelgrid: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "mandelgrid",
            "generate",
            "--x-start",
            "-1.5",
            "--rows",
            "7",
            "--sequential",
        ])
        .unwrap();
        let Cmd::Generate { overrides, .. } = args.cmd else {
            panic!("expected generate");
        };
        let mut cfg = GridConfig::default();
        overrides.apply(&mut cfg);
        assert_eq!(cfg.region.x_start, -1.5);
        assert_eq!(cfg.region.y_start, -2.0);
        assert_eq!(cfg.rows, 7);
        assert_eq!(cfg.cols, 512);
        assert_eq!(cfg.execution, Execution::Sequential);
    }

    #[test]
    fn render_defaults_to_hundred_iterations() {
        let args =
            Args::try_parse_from(["mandelgrid", "render", "g.txt", "--image-out", "g.png"]).unwrap();
        match args.cmd {
            Cmd::Render { max_iterations, legacy_palette, .. } => {
                assert_eq!(max_iterations, 100);
                assert!(!legacy_palette);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn empty_overrides_keep_defaults() {
        let mut cfg = GridConfig::default();
        Overrides::default().apply(&mut cfg);
        assert_eq!(cfg, GridConfig::default());
    }
}
