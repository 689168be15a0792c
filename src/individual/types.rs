//! The individual record (§3, §6 output individuals table).

use geo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Adult,
    Minor,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Minor => "MINOR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// `{household_id}#{ordinal}`, stable within a run.
    pub id: String,
    pub household_id: String,
    pub tile_id: String,
    pub household_size: u32,
    pub large: bool,
    pub monoparental: bool,
    pub living_standard: f64,
    pub age_band_label: &'static str,
    pub age: u32,
    pub adult: bool,
    pub status: Status,
    pub geometry: Point<f64>,
}
