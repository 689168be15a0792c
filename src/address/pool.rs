//! Grouping address points by derived tile identifier (§2 address pool,
//! §6 input B).

use std::collections::HashMap;

use crate::address::types::AddressPoint;
use crate::tile::tile_id_for_point;

/// Address points grouped by the tile identifier they fall into. Built once
/// per run; the pipeline driver pulls a tile's group out as it processes
/// that tile, so memory is released incrementally rather than held for the
/// whole run.
#[derive(Debug, Default)]
pub struct AddressPool {
    groups: HashMap<String, Vec<AddressPoint>>,
}

impl AddressPool {
    /// Group raw address points by the tile they fall into, given the
    /// territory's tile EPSG (§6: "computed by flooring y/200 and x/200").
    pub fn build(points: impl IntoIterator<Item = AddressPoint>, tile_epsg: u32) -> Self {
        let mut groups: HashMap<String, Vec<AddressPoint>> = HashMap::new();
        for point in points {
            let tile_id = tile_id_for_point(tile_epsg, point.x, point.y);
            groups.entry(tile_id).or_default().push(point);
        }
        Self { groups }
    }

    /// Take and remove a tile's address group, or an empty vec if the tile
    /// has no known addresses.
    pub fn take(&mut self, tile_id: &str) -> Vec<AddressPoint> {
        self.groups.remove(tile_id).unwrap_or_default()
    }

    pub fn tile_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_points_by_derived_tile() {
        let points = vec![
            AddressPoint { x: 3500450.0, y: 2900150.0 },
            AddressPoint { x: 3500480.0, y: 2900190.0 },
            AddressPoint { x: 3500650.0, y: 2900150.0 },
        ];
        let mut pool = AddressPool::build(points, 3035);
        assert_eq!(pool.tile_count(), 2);
        let group_a = pool.take("CRS3035RES200mN2900000E3500400");
        assert_eq!(group_a.len(), 2);
        let group_b = pool.take("CRS3035RES200mN2900000E3500600");
        assert_eq!(group_b.len(), 1);
    }

    #[test]
    fn missing_tile_returns_empty() {
        let mut pool = AddressPool::build(Vec::new(), 3035);
        assert!(pool.take("CRS3035RES200mN0E0").is_empty());
    }

    #[test]
    fn take_removes_the_group() {
        let points = vec![AddressPoint { x: 100.0, y: 100.0 }];
        let mut pool = AddressPool::build(points, 3035);
        let tile_id = tile_id_for_point(3035, 100.0, 100.0);
        assert_eq!(pool.take(&tile_id).len(), 1);
        assert!(pool.take(&tile_id).is_empty());
    }
}
