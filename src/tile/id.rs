//! Tile identifier parsing and derivation (§4.1 step 9, §6).
//!
//! Identifiers follow `CRS{epsg}RES200mN{north}E{east}`, where `{north}` and
//! `{east}` are the south-west corner's integer metre coordinates. The
//! upstream source extracts these with the regex `200mN(.*)E(.*)`; this does
//! the equivalent with `split_once` rather than pulling in a regex engine
//! for a single fixed pattern.

use crate::error::InputError;
use crate::tile::raw::TileBounds;

/// Split a tile identifier into its north (y) and east (x) south-west
/// coordinates.
pub fn parse_tile_id(tile_id: &str) -> Result<(i64, i64), InputError> {
    let after_marker = tile_id
        .split_once("200mN")
        .map(|(_, rest)| rest)
        .ok_or_else(|| InputError::MalformedTileId(tile_id.to_string()))?;
    let (north_str, east_str) = after_marker
        .split_once('E')
        .ok_or_else(|| InputError::MalformedTileId(tile_id.to_string()))?;
    let north = north_str
        .parse::<i64>()
        .map_err(|_| InputError::MalformedTileId(tile_id.to_string()))?;
    let east = east_str
        .parse::<i64>()
        .map_err(|_| InputError::MalformedTileId(tile_id.to_string()))?;
    Ok((north, east))
}

/// Compute the bounding box of a tile from its identifier.
pub fn tile_bounds(tile_id: &str) -> Result<TileBounds, InputError> {
    let (y_so, x_so) = parse_tile_id(tile_id)?;
    Ok(TileBounds { x_so, y_so, x_ne: x_so + TileBounds::SIDE, y_ne: y_so + TileBounds::SIDE })
}

/// Format the identifier a point falls into, given the territory's tile
/// EPSG code (§6 input B: "computed by flooring y/200 and x/200").
pub fn tile_id_for_point(epsg: u32, x: f64, y: f64) -> String {
    let east = (x / TileBounds::SIDE as f64).floor() as i64 * TileBounds::SIDE;
    let north = (y / TileBounds::SIDE as f64).floor() as i64 * TileBounds::SIDE;
    format!("CRS{epsg}RES200mN{north}E{east}")
}
