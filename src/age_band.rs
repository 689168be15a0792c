//! The 11 age bands shared by tiles, households and individuals (§3).
//!
//! Modelled the way the teacher models its 8 mortality/fertility brackets in
//! `model::population` — a fixed-size enum plus parallel `[T; N]` arrays
//! indexed by `AgeBand::index()`, rather than a `HashMap`. Counts per band
//! are small, dense, and iterated far more often than looked up by name, so
//! a flat array is both the idiomatic and the faster choice here.

use serde::{Deserialize, Serialize};

pub const NUM_BANDS: usize = 11;
pub const NUM_MINOR_BANDS: usize = 4;
pub const NUM_ADULT_BANDS: usize = 7;

/// The 11 age bands, in canonical emission order: minor bands first, then
/// adult bands (§4.4). This is also the index order backing `AgeHistogram`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    Minor0To3,
    Minor4To5,
    Minor6To10,
    Minor11To17,
    Adult18To24,
    Adult25To39,
    Adult40To54,
    Adult55To64,
    Adult65To79,
    Adult80To105,
    /// Adult of unspecified band, modelled per spec as uniformly distributed
    /// across [18, 80].
    AdultUnknown,
}

pub const ALL_BANDS: [AgeBand; NUM_BANDS] = [
    AgeBand::Minor0To3,
    AgeBand::Minor4To5,
    AgeBand::Minor6To10,
    AgeBand::Minor11To17,
    AgeBand::Adult18To24,
    AgeBand::Adult25To39,
    AgeBand::Adult40To54,
    AgeBand::Adult55To64,
    AgeBand::Adult65To79,
    AgeBand::Adult80To105,
    AgeBand::AdultUnknown,
];

pub const MINOR_BANDS: [AgeBand; NUM_MINOR_BANDS] = [
    AgeBand::Minor0To3,
    AgeBand::Minor4To5,
    AgeBand::Minor6To10,
    AgeBand::Minor11To17,
];

pub const ADULT_BANDS: [AgeBand; NUM_ADULT_BANDS] = [
    AgeBand::Adult18To24,
    AgeBand::Adult25To39,
    AgeBand::Adult40To54,
    AgeBand::Adult55To64,
    AgeBand::Adult65To79,
    AgeBand::Adult80To105,
    AgeBand::AdultUnknown,
];

impl AgeBand {
    /// Index into the `[T; NUM_BANDS]` arrays this type backs, matching
    /// `ALL_BANDS`'s canonical order.
    pub const fn index(self) -> usize {
        match self {
            Self::Minor0To3 => 0,
            Self::Minor4To5 => 1,
            Self::Minor6To10 => 2,
            Self::Minor11To17 => 3,
            Self::Adult18To24 => 4,
            Self::Adult25To39 => 5,
            Self::Adult40To54 => 6,
            Self::Adult55To64 => 7,
            Self::Adult65To79 => 8,
            Self::Adult80To105 => 9,
            Self::AdultUnknown => 10,
        }
    }

    pub const fn is_adult(self) -> bool {
        !matches!(self, Self::Minor0To3 | Self::Minor4To5 | Self::Minor6To10 | Self::Minor11To17)
    }

    /// Inclusive `[min, max]` age range this band's members are drawn from.
    pub const fn range(self) -> (u32, u32) {
        match self {
            Self::Minor0To3 => (0, 3),
            Self::Minor4To5 => (4, 5),
            Self::Minor6To10 => (6, 10),
            Self::Minor11To17 => (11, 17),
            Self::Adult18To24 => (18, 24),
            Self::Adult25To39 => (25, 39),
            Self::Adult40To54 => (40, 54),
            Self::Adult55To64 => (55, 64),
            Self::Adult65To79 => (65, 79),
            Self::Adult80To105 => (80, 105),
            Self::AdultUnknown => (18, 80),
        }
    }

    /// Stable label used on output rows (§6).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minor0To3 => "ind_0_3",
            Self::Minor4To5 => "ind_4_5",
            Self::Minor6To10 => "ind_6_10",
            Self::Minor11To17 => "ind_11_17",
            Self::Adult18To24 => "ind_18_24",
            Self::Adult25To39 => "ind_25_39",
            Self::Adult40To54 => "ind_40_54",
            Self::Adult55To64 => "ind_55_64",
            Self::Adult65To79 => "ind_65_79",
            Self::Adult80To105 => "ind_80p",
            Self::AdultUnknown => "ind_inc",
        }
    }
}

/// Per-band counts, indexed by [`AgeBand::index`]. Used for both a tile's raw
/// age columns and a household's age histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgeHistogram(pub [u32; NUM_BANDS]);

impl AgeHistogram {
    pub fn zero() -> Self {
        Self([0; NUM_BANDS])
    }

    pub fn get(&self, band: AgeBand) -> u32 {
        self.0[band.index()]
    }

    pub fn get_mut(&mut self, band: AgeBand) -> &mut u32 {
        &mut self.0[band.index()]
    }

    pub fn add(&mut self, band: AgeBand, n: u32) {
        self.0[band.index()] += n;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn adult_total(&self) -> u32 {
        ADULT_BANDS.iter().map(|&b| self.get(b)).sum()
    }

    pub fn minor_total(&self) -> u32 {
        MINOR_BANDS.iter().map(|&b| self.get(b)).sum()
    }
}

impl std::ops::AddAssign for AgeHistogram {
    fn add_assign(&mut self, other: Self) {
        for i in 0..NUM_BANDS {
            self.0[i] += other.0[i];
        }
    }
}
