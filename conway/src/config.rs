// config.rs - Fixed simulation constants and the validated Config built from them

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::palette::{Palette, Rgb};

pub const WINDOW_WIDTH: u32 = 1600;                // Window size in pixels
pub const WINDOW_HEIGHT: u32 = 900;
pub const CELL_SIZE: u32 = 15;                     // Pixels per cell edge
pub const TICKS_PER_SECOND: u32 = 24;              // Generation rate cap while running

pub const BACKGROUND: Rgb = Rgb::new(5, 5, 5);
pub const GRID_LINES: Rgb = Rgb::new(15, 15, 15);

/// Smallest grid with at least one interior cell.
pub const MIN_GRID_SIDE: usize = 3;

/// Which `Stepper` implementation the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Flat-array loop over the whole grid.
    #[default]
    Scalar,
    /// One cooperative task per row on a current-thread runtime.
    #[cfg(feature = "row-tasks")]
    RowTasks,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Backend::Scalar),
            #[cfg(feature = "row-tasks")]
            "rows" | "row-tasks" => Ok(Backend::RowTasks),
            _ => Err(ConfigError::UnknownBackend(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    pub cell_size: u32,
    pub ticks_per_second: u32,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub backend: Backend,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            cell_size: CELL_SIZE,
            ticks_per_second: TICKS_PER_SECOND,
            seed: None,
            backend: Backend::default(),
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Cells per row. Zero when `cell_size` is zero; `validate` rejects that.
    pub fn grid_width(&self) -> usize {
        self.window_width.checked_div(self.cell_size).unwrap_or(0) as usize
    }

    pub fn grid_height(&self) -> usize {
        self.window_height.checked_div(self.cell_size).unwrap_or(0) as usize
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let (cols, rows) = (self.grid_width(), self.grid_height());
        if cols < MIN_GRID_SIDE || rows < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                window_width: self.window_width,
                window_height: self.window_height,
                cols,
                rows,
            });
        }

        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }
}

/// Parses a decimal seed, as read from the environment by the window binary.
pub fn parse_seed(s: &str) -> Result<u64, ConfigError> {
    s.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed(s.to_owned()))
}
