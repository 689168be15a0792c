//! Individual expansion (§4.4): one placed household becomes its members.

use crate::age_band::ALL_BANDS;
use crate::household::Household;
use crate::individual::types::{Individual, Status};
use crate::rng::TileRng;

/// Expand one placed household into its individual records, in canonical
/// age-band order (minors first, then adults, per `ALL_BANDS`).
///
/// Panics if `household.geometry` is `None`: binding must run before
/// expansion, and a missing geometry at this point is a pipeline bug, not a
/// recoverable condition (§4.2's "checked by assertion, not recovery"
/// applies here too).
pub fn expand_household(household: &Household, rng: &mut TileRng) -> Vec<Individual> {
    let geometry = household
        .geometry
        .expect("expand_household called before address binding attached geometry");

    let mut individuals = Vec::with_capacity(household.size as usize);
    let mut ordinal = 0u32;
    for band in ALL_BANDS {
        let count = household.age_bands.get(band);
        let (lo, hi) = band.range();
        for _ in 0..count {
            ordinal += 1;
            let age = rng.uniform_int_inclusive(lo, hi);
            individuals.push(Individual {
                id: format!("{}#{}", household.id, ordinal),
                household_id: household.id.clone(),
                tile_id: household.tile_id.clone(),
                household_size: household.size,
                large: household.large,
                monoparental: household.monoparental,
                living_standard: household.living_standard,
                age_band_label: band.label(),
                age,
                adult: band.is_adult(),
                status: if band.is_adult() { Status::Adult } else { Status::Minor },
                geometry,
            });
        }
    }
    individuals
}
