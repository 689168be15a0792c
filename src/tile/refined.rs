//! The refined tile: a raw tile's counts converted to a self-consistent
//! integer configuration (§3, §4.1).

use crate::age_band::AgeHistogram;
use crate::tile::raw::TileBounds;

#[derive(Debug, Clone, PartialEq)]
pub struct RefinedTile {
    pub tile_id: String,
    pub bounds: TileBounds,
    pub ind: u32,
    pub men: u32,
    pub men_1ind: u32,
    pub men_5ind: u32,
    pub men_fmp: u32,
    pub men_prop: u32,
    pub men_coll: u32,
    pub men_mais: u32,
    /// Kept as a fractional figure, per the upstream source, which copies
    /// `NUMERIC_COLUMNS` from the raw tile unrounded (§9 open question (b)).
    pub ind_snv: f64,
    pub men_pauv: f64,
    pub age_bands: AgeHistogram,
    pub plus18: u32,
    pub moins18: u32,
}

impl RefinedTile {
    /// Number of households not in the size-1 or size-≥5 classes (§3's
    /// implicit `men_24`).
    pub fn men_24(&self) -> u32 {
        self.men.saturating_sub(self.men_1ind).saturating_sub(self.men_5ind)
    }
}
