//! Per-tile household synthesis (§4.2).
//!
//! Grounded on `original_source/popdbgen/households_gen.py`
//! (`generate_household_sizes`, `allocate_ages`) and, for the shuffled
//! tag-pool idiom itself, on the teacher's `procgen::inhabitants` module,
//! which dispatches settlement population into households the same way:
//! build a shuffled pool of tags, hand them out by popping.

use crate::age_band::{ADULT_BANDS, AgeBand, AgeHistogram, MINOR_BANDS};
use crate::error::FeasibilityError;
use crate::household::types::Household;
use crate::rng::TileRng;
use crate::tile::RefinedTile;

/// Synthesize the full household list for one refined tile (§4.2).
pub fn synthesize_households(
    tile: &RefinedTile,
    rng: &mut TileRng,
) -> Result<Vec<Household>, FeasibilityError> {
    if tile.men == 0 {
        return Ok(Vec::new());
    }

    let sizes = generate_sizes(tile, rng)?;
    if sizes.len() as u32 != tile.men || sizes.iter().sum::<u32>() != tile.ind {
        return Err(FeasibilityError::new(
            tile.tile_id.clone(),
            format!(
                "household sizes do not reproduce tile marginals: {} households (want {}), {} individuals (want {})",
                sizes.len(),
                tile.men,
                sizes.iter().sum::<u32>(),
                tile.ind
            ),
        ));
    }
    let allocations = allocate_ages(tile, &sizes, rng)?;
    let living_standards = allocate_living_standards(tile, &sizes, rng);

    let mut households = Vec::with_capacity(sizes.len());
    for (i, ((size, (adults, minors, bands)), living_standard)) in
        sizes.iter().zip(allocations).zip(living_standards).enumerate()
    {
        households.push(Household::new(
            format!("{}#{}", tile.tile_id, i + 1),
            tile.tile_id.clone(),
            *size,
            adults,
            minors,
            bands,
            living_standard,
        ));
    }

    Ok(households)
}

/// Sizing sub-algorithm (§4.2): start from the fixed multiset implied by
/// `men_1ind`/`men_24`/`men_5ind`, then absorb the remainder `R` into
/// size-2/3 households first, then size-≥5, then anywhere.
fn generate_sizes(tile: &RefinedTile, rng: &mut TileRng) -> Result<Vec<u32>, FeasibilityError> {
    let men_24 = tile.men_24();
    let mut sizes: Vec<u32> = std::iter::repeat_n(1u32, tile.men_1ind as usize)
        .chain(std::iter::repeat_n(2u32, men_24 as usize))
        .chain(std::iter::repeat_n(5u32, tile.men_5ind as usize))
        .collect();

    let mut remaining = tile.ind as i64 - sizes.iter().map(|&s| s as i64).sum::<i64>();

    if remaining < 0 {
        return Err(FeasibilityError::new(
            tile.tile_id.clone(),
            format!(
                "fixed household classes alone overshoot ind by {}: men_1ind + 2*men_24 + 5*men_5ind exceeds ind",
                -remaining
            ),
        ));
    }

    let mut mid_eligible: Vec<usize> =
        sizes.iter().enumerate().filter(|&(_, &s)| s == 2 || s == 3).map(|(i, _)| i).collect();
    while remaining > 0 && !mid_eligible.is_empty() {
        let pick = rng.index(mid_eligible.len());
        let idx = mid_eligible[pick];
        sizes[idx] += 1;
        remaining -= 1;
        if sizes[idx] == 4 {
            mid_eligible.swap_remove(pick);
        }
    }

    let mut large_eligible: Vec<usize> =
        sizes.iter().enumerate().filter(|&(_, &s)| s >= 5).map(|(i, _)| i).collect();
    while remaining > 0 && !large_eligible.is_empty() {
        let pick = rng.index(large_eligible.len());
        sizes[large_eligible[pick]] += 1;
        remaining -= 1;
    }

    while remaining > 0 && !sizes.is_empty() {
        let idx = rng.index(sizes.len());
        sizes[idx] += 1;
        remaining -= 1;
    }

    if remaining > 0 {
        return Err(FeasibilityError::new(
            tile.tile_id.clone(),
            format!("{remaining} individuals left unplaced after household sizing"),
        ));
    }

    Ok(sizes)
}

type Allocation = (u32, u32, AgeHistogram);

/// Age-allocation sub-algorithm (§4.2): shuffled tag pools for adult and
/// minor bands, consumed by popping. Every household gets ≥ 1 adult before
/// any household gets a second.
fn allocate_ages(
    tile: &RefinedTile,
    sizes: &[u32],
    rng: &mut TileRng,
) -> Result<Vec<Allocation>, FeasibilityError> {
    let mut adult_tags: Vec<AgeBand> = ADULT_BANDS
        .iter()
        .flat_map(|&band| std::iter::repeat_n(band, tile.age_bands.get(band) as usize))
        .collect();
    let mut minor_tags: Vec<AgeBand> = MINOR_BANDS
        .iter()
        .flat_map(|&band| std::iter::repeat_n(band, tile.age_bands.get(band) as usize))
        .collect();
    rng.shuffle(&mut adult_tags);
    rng.shuffle(&mut minor_tags);

    if adult_tags.len() as u32 != tile.plus18 || minor_tags.len() as u32 != tile.moins18 {
        return Err(FeasibilityError::new(
            tile.tile_id.clone(),
            "age-band tag pools do not match plus18/moins18 totals".to_string(),
        ));
    }

    let mut adults = vec![0u32; sizes.len()];
    let mut histograms = vec![AgeHistogram::zero(); sizes.len()];

    for i in 0..sizes.len() {
        let tag = adult_tags.pop().ok_or_else(|| {
            FeasibilityError::new(tile.tile_id.clone(), "ran out of adult tags before one-per-household".to_string())
        })?;
        histograms[i].add(tag, 1);
        adults[i] = 1;
    }

    loop {
        let eligible: Vec<usize> = (0..sizes.len()).filter(|&i| adults[i] < sizes[i]).collect();
        let Some(&idx) = rng.choose_from(&eligible) else { break };
        let Some(tag) = adult_tags.pop() else { break };
        histograms[idx].add(tag, 1);
        adults[idx] += 1;
    }

    let mut result = Vec::with_capacity(sizes.len());
    for i in 0..sizes.len() {
        let minors = sizes[i] - adults[i];
        for _ in 0..minors {
            let tag = minor_tags.pop().ok_or_else(|| {
                FeasibilityError::new(tile.tile_id.clone(), "ran out of minor tags".to_string())
            })?;
            histograms[i].add(tag, 1);
        }
        result.push((adults[i], minors, histograms[i]));
    }

    Ok(result)
}

/// Per-household living standard (§4.2, §9 open question (b)): a random
/// uniform share of the tile's aggregate standard-of-living figure,
/// normalised by household size.
fn allocate_living_standards(tile: &RefinedTile, sizes: &[u32], rng: &mut TileRng) -> Vec<f64> {
    let raw_parts: Vec<f64> = sizes.iter().map(|_| rng.unit()).collect();
    let total: f64 = raw_parts.iter().sum();
    if total == 0.0 {
        return vec![0.0; sizes.len()];
    }
    raw_parts
        .iter()
        .zip(sizes)
        .map(|(&part, &size)| tile.ind_snv * part / (total * size as f64))
        .collect()
}
