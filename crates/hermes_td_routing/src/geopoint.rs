use geo::{Distance as _, Haversine};
use serde::{Deserialize, Serialize};

use crate::distance::{Distance, Meters};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn haversine_distance(&self, other: &GeoPoint) -> Distance<Meters> {
        Distance::from(Haversine.distance(geo::Point::from(self), geo::Point::from(other)))
    }
}

impl From<&GeoPoint> for geo::Point {
    fn from(point: &GeoPoint) -> Self {
        geo::Point::new(point.lng, point.lat)
    }
}
