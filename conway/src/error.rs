// error.rs - Error types for the simulation core

use std::collections::TryReserveError;

use thiserror::Error;

/// Failure to build a [`Grid`](crate::grid::Grid).
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} are invalid")]
    Dimensions { width: usize, height: usize },

    #[error("failed to allocate a buffer of {cells} cells")]
    Allocation {
        cells: usize,
        #[source]
        source: TryReserveError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be non-zero")]
    ZeroCellSize,

    #[error("tick rate must be non-zero")]
    ZeroTickRate,

    #[error("a {window_width}x{window_height} window holds a {cols}x{rows} grid, need at least 3x3")]
    GridTooSmall {
        window_width: u32,
        window_height: u32,
        cols: usize,
        rows: usize,
    },

    #[error("invalid seed `{0}`")]
    InvalidSeed(String),

    #[error("unknown backend `{0}`, expected `scalar` or `rows`")]
    UnknownBackend(String),

    #[error("unknown palette `{0}`")]
    UnknownPalette(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to start the row-task runtime")]
    Runtime(#[source] std::io::Error),
}
