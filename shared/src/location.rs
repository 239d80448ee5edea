use std::f64;
use std::fmt;

/// Mean earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Location {
        Location { lat, lon }
    }

    fn deg2rad(deg: f64) -> f64 {
        deg * (f64::consts::PI / 180.0)
    }

    pub fn rad2deg(rad: f64) -> f64 {
        rad * (180.0 / f64::consts::PI)
    }

    /// Project into a local equirectangular plane anchored at `ref_lat`
    /// degrees, returning (x, y) in meters. Euclidean distance on raw
    /// lat/lon degrees is distorted by more than 10% at working latitudes,
    /// so all pairwise distances go through this projection first.
    pub fn project(&self, ref_lat: f64) -> (f64, f64) {
        let x = EARTH_RADIUS_M * Location::deg2rad(self.lon) * Location::deg2rad(ref_lat).cos();
        let y = EARTH_RADIUS_M * Location::deg2rad(self.lat);
        (x, y)
    }

    /// Straight-line distance in meters, measured in the planar frame
    /// anchored at `ref_lat`.
    pub fn distance_m(&self, other: &Location, ref_lat: f64) -> f64 {
        let (x1, y1) = self.project(ref_lat);
        let (x2, y2) = other.project(ref_lat);
        ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Location {{ lat: {}, lon: {} }}", self.lat, self.lon)
    }
}
