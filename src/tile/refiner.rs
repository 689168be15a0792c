//! Tile refinement: converting fractional per-tile aggregates into
//! self-consistent integer counts (§4.1).
//!
//! Grounded on `original_source/popdbgen/download_filo.py::refine_FILO_tile`;
//! the `while`-loop ordering in step 6 is lifted verbatim because the spec
//! notes it is "the only order that terminates for all inputs in the
//! observed data" (§9).

use tracing::{debug, warn};

use crate::age_band::{ADULT_BANDS, AgeHistogram, ALL_BANDS, MINOR_BANDS, NUM_BANDS};
use crate::rng::TileRng;
use crate::tile::id::tile_bounds;
use crate::tile::raw::RawTile;
use crate::tile::refined::RefinedTile;
use crate::error::InputError;

/// Refine one raw tile into an integer-consistent tile (§4.1).
pub fn refine_tile(raw: &RawTile, rng: &mut TileRng) -> Result<RefinedTile, InputError> {
    let bounds = tile_bounds(&raw.tile_id)?;

    // Step 1.
    if raw.ind < 1.0 {
        warn!(tile_id = %raw.tile_id, raw_ind = raw.ind, "clamping ind to 1 on an under-populated tile");
    }
    let ind = (rng.round_random(raw.ind)).max(1);
    if raw.men > raw.ind {
        warn!(tile_id = %raw.tile_id, raw_men = raw.men, raw_ind = raw.ind, "clamping men down to ind on an infeasible tile");
    }
    let men = (rng.round_random(raw.men)).max(1).min(ind);

    // Step 2: floor each band, record a bump score for ranking +1 bumps.
    let mut counts = [0i64; NUM_BANDS];
    let mut bumps = [0.0f64; NUM_BANDS];
    for band in ALL_BANDS {
        let i = band.index();
        let value = raw.age_bands[i];
        let floor = value.floor();
        let frac = value - floor;
        counts[i] = floor as i64;
        bumps[i] = frac * rng.unit();
    }

    // Step 3: adults-at-least-households.
    let adult_total: i64 = ADULT_BANDS.iter().map(|b| counts[b.index()]).sum();
    let missing_adults = men as i64 - adult_total;
    if missing_adults > 0 {
        let mut ranked: Vec<usize> = ADULT_BANDS.iter().map(|b| b.index()).collect();
        ranked.sort_by(|&a, &b| bumps[b].partial_cmp(&bumps[a]).unwrap());
        for &i in ranked.iter().take(missing_adults as usize) {
            counts[i] += 1;
            bumps[i] = 0.0;
        }
    }

    // Step 4: total-ind reconciliation.
    let total: i64 = counts.iter().sum();
    let missing_indiv = ind as i64 - total;
    if missing_indiv > 0 {
        let mut ranked: Vec<usize> = (0..NUM_BANDS).collect();
        ranked.sort_by(|&a, &b| bumps[b].partial_cmp(&bumps[a]).unwrap());
        for &i in ranked.iter().take(missing_indiv as usize) {
            counts[i] += 1;
        }
    } else if missing_indiv < 0 {
        let mut eligible: Vec<usize> =
            MINOR_BANDS.iter().map(|b| b.index()).filter(|&i| counts[i] > 0).collect();
        eligible.sort_by(|&a, &b| bumps[a].partial_cmp(&bumps[b]).unwrap());
        for &i in eligible.iter().take((-missing_indiv) as usize) {
            counts[i] -= 1;
        }
    }

    // Step 5: household-class integers with residues for later bumping.
    let men_1ind_floor = raw.men_1ind.floor();
    let mut men_1ind = men_1ind_floor as i64;
    let mut remain_men_1ind = raw.men_1ind - men_1ind_floor;

    let men_5ind_floor = raw.men_5ind.floor();
    let mut men_5ind = men_5ind_floor as i64;
    let mut remain_men_5ind = raw.men_5ind - men_5ind_floor;

    let men_fmp = rng.round_random(raw.men_fmp);

    let ind_i = ind as i64;
    let men_i = men as i64;

    // Step 6: enforce feasibility with ind, in the prescribed order.
    while men_5ind > 0 && 3 * men_5ind > ind_i - 2 * men_i + men_1ind {
        men_5ind -= 1;
        remain_men_5ind = 1.0;
    }
    if men_1ind > men_i {
        warn!(tile_id = %raw.tile_id, men_1ind, men = men_i, "clamping men_1ind down, it exceeded men");
    }
    while men_1ind > 0 && men_5ind == 0 && 3 * men_1ind > 4 * men_i - ind_i {
        men_1ind -= 1;
        remain_men_1ind = 1.0;
    }
    while men_1ind < 2 * men_i + 3 * men_5ind - ind_i {
        men_1ind += 1;
        remain_men_1ind = 0.0;
    }
    if (men_5ind > 0 || 3 * (1 + men_1ind) <= 3 * men_i - ind_i) && rng.unit() < remain_men_1ind {
        men_1ind += 1;
    }
    if men_5ind == 0 && 3 * men_1ind > 4 * men_i - ind_i {
        men_5ind = 1;
        remain_men_5ind = 0.0;
    }
    if 3 * (1 + men_5ind) <= ind_i - 2 * men_i + men_1ind && rng.unit() < remain_men_5ind {
        men_5ind += 1;
    }

    // Step 7: ancillary household-class integers.
    let men_prop = rng.round_random(raw.men_prop).min(men);
    let men_coll = rng.round_random(raw.men_coll).min(men);
    let men_mais = rng.round_random(raw.men_mais).min(men);

    let mut age_bands = AgeHistogram::zero();
    for band in ALL_BANDS {
        *age_bands.get_mut(band) = counts[band.index()] as u32;
    }

    // Step 8.
    let plus18 = age_bands.adult_total();
    let moins18 = age_bands.minor_total();

    debug!(
        tile_id = %raw.tile_id,
        ind_diff = ind as f64 - raw.ind,
        men_diff = men as f64 - raw.men,
        age_total_diff = age_bands.total() as f64 - raw.age_total(),
        "refined tile marginals vs. raw input"
    );

    Ok(RefinedTile {
        tile_id: raw.tile_id.clone(),
        bounds,
        ind,
        men,
        men_1ind: men_1ind.max(0) as u32,
        men_5ind: men_5ind.max(0) as u32,
        men_fmp,
        men_prop,
        men_coll,
        men_mais,
        ind_snv: raw.ind_snv,
        men_pauv: raw.men_pauv,
        age_bands,
        plus18,
        moins18,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age_band::NUM_BANDS;

    fn tile(ind: f64, men: f64, men_1ind: f64, men_5ind: f64, age_bands: [f64; NUM_BANDS]) -> RawTile {
        RawTile {
            tile_id: "CRS3035RES200mN1000E2000".to_string(),
            ind,
            men,
            men_1ind,
            men_5ind,
            men_fmp: 0.0,
            men_prop: 0.0,
            men_coll: 0.0,
            men_mais: 0.0,
            ind_snv: 10000.0,
            men_pauv: 0.0,
            age_bands,
        }
    }

    #[test]
    fn clamps_degenerate_tile_to_one_household_one_individual() {
        let mut rng = TileRng::from_raw_seed(1);
        let raw = tile(0.0, 0.0, 0.0, 0.0, [0.0; NUM_BANDS]);
        let refined = refine_tile(&raw, &mut rng).unwrap();
        assert_eq!(refined.ind, 1);
        assert_eq!(refined.men, 1);
    }

    #[test]
    fn men_never_exceeds_ind() {
        let mut rng = TileRng::from_raw_seed(2);
        let raw = tile(2.0, 9.0, 0.0, 0.0, [0.0; NUM_BANDS]);
        let refined = refine_tile(&raw, &mut rng).unwrap();
        assert!(refined.men <= refined.ind);
    }

    #[test]
    fn age_bands_sum_to_ind() {
        let mut bands = [0.0; NUM_BANDS];
        bands[4] = 2.5; // Adult25To39-ish slot
        bands[0] = 0.7; // Minor0To3-ish slot
        let raw = tile(3.2, 1.7, 0.1, 0.0, bands);
        for seed in 0..50 {
            let mut rng = TileRng::from_raw_seed(seed);
            let refined = refine_tile(&raw, &mut rng).unwrap();
            assert_eq!(refined.age_bands.total(), refined.ind);
            assert!(refined.plus18 >= refined.men);
        }
    }

    #[test]
    fn adult_total_covers_households_for_scenario_2() {
        let mut bands = [0.0; NUM_BANDS];
        bands[5] = 4.0;
        let raw = tile(10.0, 4.0, 2.0, 1.0, bands);
        for seed in 0..50 {
            let mut rng = TileRng::from_raw_seed(seed);
            let refined = refine_tile(&raw, &mut rng).unwrap();
            assert!(refined.plus18 >= refined.men);
            assert_eq!(refined.men_1ind + refined.men_5ind, 3);
            assert!(refined.men_1ind <= refined.men);
        }
    }

    #[test]
    fn infeasible_men_1ind_is_clamped_scenario_5() {
        let mut bands = [0.0; NUM_BANDS];
        bands[4] = 2.0;
        let raw = tile(2.0, 2.0, 3.0, 0.0, bands);
        for seed in 0..50 {
            let mut rng = TileRng::from_raw_seed(seed);
            let refined = refine_tile(&raw, &mut rng).unwrap();
            assert!(refined.men_1ind <= refined.men);
            assert_eq!(refined.men, 2);
            assert_eq!(refined.ind, 2);
        }
    }

    #[test]
    fn integer_tile_round_trips_without_drift() {
        let mut bands = [0.0; NUM_BANDS];
        bands[4] = 2.0;
        bands[0] = 1.0;
        let raw = tile(3.0, 2.0, 1.0, 0.0, bands);
        let mut rng = TileRng::from_raw_seed(9);
        let refined = refine_tile(&raw, &mut rng).unwrap();
        assert_eq!(refined.ind, 3);
        assert_eq!(refined.men, 2);
        assert_eq!(refined.age_bands.total(), 3);
    }

    #[test]
    fn rejects_malformed_tile_id() {
        let mut rng = TileRng::from_raw_seed(1);
        let mut raw = tile(1.0, 1.0, 0.0, 0.0, [0.0; NUM_BANDS]);
        raw.tile_id = "garbage".to_string();
        assert!(refine_tile(&raw, &mut rng).is_err());
    }
}
