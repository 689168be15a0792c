//! Error types for the population synthesis pipeline.
//!
//! Mirrors the three categories from the design's error-handling section:
//! bad input shape, post-refinement feasibility violations, and (at the
//! driver boundary, outside this crate) I/O. This crate never reaches for
//! its own I/O, so there is no I/O variant here — a caller wiring a real
//! writer propagates its own `std::io::Error` alongside these.

use thiserror::Error;

/// Input-shape errors: malformed or unsupported input, caught before any
/// tile is processed.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InputError {
    #[error("unsupported territory code: {0:?}")]
    UnknownTerritory(String),

    #[error("batch size must be positive, got {0}")]
    InvalidBatchSize(u32),

    #[error("malformed tile identifier: {0:?}")]
    MalformedTileId(String),

    #[error("unknown configuration option: {0:?}")]
    UnknownOption(String),
}

/// A §3 invariant failed to hold after refinement or synthesis. Carries the
/// offending tile id; this always indicates a bug in the refiner or
/// synthesizer, never a recoverable condition.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("tile {tile_id}: feasibility violation: {detail}")]
pub struct FeasibilityError {
    pub tile_id: String,
    pub detail: String,
}

impl FeasibilityError {
    pub fn new(tile_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { tile_id: tile_id.into(), detail: detail.into() }
    }
}

/// Top-level error type returned by the pure pipeline stages.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PopSynthError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Feasibility(#[from] FeasibilityError),
}
