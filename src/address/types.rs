//! The address point record (§3, §6 input B).

use geo::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressPoint {
    pub x: f64,
    pub y: f64,
}

impl AddressPoint {
    pub fn as_geo(self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}
