//! Error type shared by every module of the crate.
//!
//! Only configuration and construction problems are errors. Terrain
//! violations during fitness evaluation are scored as penalties and a
//! disconnected maze is a normal `found = false` answer from the
//! reachability check.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by maze construction, encoding and solver configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The requested grid is smaller than the lattice generators support.
    #[error("grid {width}x{height} is too small: both dimensions must be at least {min}")]
    DimensionsTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    /// Openness must be a percentage.
    #[error("openness must lie in 0..=100, got {0}")]
    InvalidOpenness(f64),

    /// Strict algorithm parsing failed.
    #[error("unknown maze algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// A coordinate fell outside the grid.
    #[error("coordinate ({x}, {y}) is outside the grid")]
    OutOfBounds { x: usize, y: usize },

    /// The start or goal cell cannot hold anything but an open path.
    #[error("cell ({x}, {y}) is an endpoint and must stay an open path")]
    EndpointOverwrite { x: usize, y: usize },

    /// An extended wire code could not be decoded into a cell.
    #[error("invalid cell code {0}")]
    InvalidCellCode(u32),

    /// A matrix handed to the decoder does not have uniform row lengths.
    #[error("matrix rows have different lengths")]
    RaggedRows,

    /// A decoded grid carries a cell list that does not fill its dimensions.
    #[error("grid {width}x{height} needs {expected} cells, got {actual}")]
    CellCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// A random walk exceeded its step budget without joining the maze.
    #[error("{algorithm} generation stalled after {steps} steps")]
    GenerationStalled {
        algorithm: &'static str,
        steps: usize,
    },

    /// A solver parameter is out of range.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}
