//! Engine-level error types
//!
//! Detection itself never fails: degenerate geometry degrades to
//! "nothing detected". Errors exist only at construction and
//! configuration time.

use thiserror::Error;

use crate::shapes::Rect;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum CollisionError {
    /// The broad-phase grid was configured with zero rows or columns
    #[error("invalid grid dimensions: {rows} rows x {cols} cols (both must be positive)")]
    InvalidGrid {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// The world bounds have zero or negative area
    #[error("world bounds have no area: {bounds:?}")]
    EmptyBounds {
        /// The rejected bounds
        bounds: Rect,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
