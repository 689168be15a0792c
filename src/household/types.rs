//! The household record (§3, §6 output households table).

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::age_band::AgeHistogram;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    /// `{tile_id}#{ordinal}`, stable within a run.
    pub id: String,
    pub tile_id: String,
    pub size: u32,
    pub adults: u32,
    pub minors: u32,
    pub age_bands: AgeHistogram,
    pub monoparental: bool,
    pub large: bool,
    pub living_standard: f64,
    /// Set by the address binder; `None` only between synthesis and binding.
    pub geometry: Option<Point<f64>>,
}

impl Household {
    pub fn new(
        id: String,
        tile_id: String,
        size: u32,
        adults: u32,
        minors: u32,
        age_bands: AgeHistogram,
        living_standard: f64,
    ) -> Self {
        Self {
            id,
            tile_id,
            size,
            adults,
            minors,
            age_bands,
            monoparental: adults == 1 && minors >= 1,
            large: size >= 5,
            living_standard,
            geometry: None,
        }
    }
}
