//! Address binding (§4.3): attaching geometry to a tile's households.

use tracing::warn;

use crate::address::types::AddressPoint;
use crate::household::Household;
use crate::rng::TileRng;
use crate::tile::TileBounds;

/// Attach geometry to `households` in place. `addresses` is the tile's
/// address group, not yet shuffled; the pre-shuffle happens here, once, so
/// the with-replacement draws below don't favour whichever address happened
/// to load first (§4.3, §9 "address reuse").
pub fn bind_addresses(households: &mut [Household], addresses: &mut [AddressPoint], bounds: TileBounds, rng: &mut TileRng) {
    if households.is_empty() {
        return;
    }

    if addresses.is_empty() {
        warn!(
            tile_id = %households[0].tile_id,
            households = households.len(),
            "no addresses for a non-empty tile, falling back to synthetic points"
        );
        for household in households.iter_mut() {
            let x = rng.uniform_range(bounds.x_so as f64, bounds.x_ne as f64);
            let y = rng.uniform_range(bounds.y_so as f64, bounds.y_ne as f64);
            household.geometry = Some(geo::Point::new(x, y));
        }
        return;
    }

    rng.shuffle(addresses);
    for household in households.iter_mut() {
        let idx = rng.index(addresses.len());
        household.geometry = Some(addresses[idx].as_geo());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age_band::AgeHistogram;

    fn household(size: u32) -> Household {
        Household::new("t#1".into(), "t".into(), size, 1, size.saturating_sub(1), AgeHistogram::zero(), 0.0)
    }

    #[test]
    fn empty_households_produce_no_geometry_assignments() {
        let mut households: Vec<Household> = Vec::new();
        let mut addresses = Vec::new();
        let bounds = TileBounds { x_so: 0, y_so: 0, x_ne: 200, y_ne: 200 };
        bind_addresses(&mut households, &mut addresses, bounds, &mut TileRng::from_raw_seed(1));
        assert!(households.is_empty());
    }

    #[test]
    fn empty_address_pool_generates_points_inside_bounds() {
        let mut households = vec![household(1), household(2), household(3)];
        let mut addresses = Vec::new();
        let bounds = TileBounds { x_so: 1000, y_so: 5000, x_ne: 1200, y_ne: 5200 };
        let mut rng = TileRng::from_raw_seed(2);
        bind_addresses(&mut households, &mut addresses, bounds, &mut rng);
        for h in &households {
            let p = h.geometry.expect("geometry assigned");
            assert!((1000.0..1200.0).contains(&p.x()));
            assert!((5000.0..5200.0).contains(&p.y()));
        }
        let distinct: std::collections::HashSet<_> = households
            .iter()
            .map(|h| {
                let (x, y) = h.geometry.unwrap().x_y();
                (x.to_bits(), y.to_bits())
            })
            .collect();
        assert!(distinct.len() >= 2, "points should not all coincide");
    }

    #[test]
    fn with_replacement_draw_can_repeat_addresses() {
        let mut households: Vec<Household> = (0..20).map(|_| household(1)).collect();
        let mut addresses = vec![AddressPoint { x: 1.0, y: 1.0 }, AddressPoint { x: 2.0, y: 2.0 }];
        let bounds = TileBounds { x_so: 0, y_so: 0, x_ne: 200, y_ne: 200 };
        let mut rng = TileRng::from_raw_seed(3);
        bind_addresses(&mut households, &mut addresses, bounds, &mut rng);
        let xs: Vec<f64> = households.iter().map(|h| h.geometry.unwrap().x()).collect();
        assert!(xs.iter().all(|&x| x == 1.0 || x == 2.0));
    }
}
