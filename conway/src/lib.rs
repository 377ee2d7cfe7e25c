//! Conway's Game of Life on a fixed, edge-clamped grid.
//!
//! [`Simulation`] owns a double-buffered [`Grid`] and advances it with a
//! [`Stepper`]. Rendering and input live outside this crate: a front end feeds
//! [`Command`]s in and draws [`Simulation::live_cells`] with the active
//! [`Palette`].

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod grid;
pub mod palette;
pub mod patterns;

pub use config::{Backend, Config};
pub use controller::{Command, Flow, RunState, Simulation};
pub use engine::{ScalarStepper, Stepper};
pub use error::{ConfigError, Error, GridError};
pub use grid::{CellPos, CellState, Fill, Grid};
pub use palette::{Palette, Rgb};
pub use patterns::{PATTERNS, Pattern};

#[cfg(feature = "row-tasks")]
pub use engine::RowTaskStepper;
