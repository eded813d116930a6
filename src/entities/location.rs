use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::{invalid_coordinate_error, Error};

/// Raw latitude/longitude pair as supplied by a map click or a position
/// provider. Not yet validated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A validated point on the Earth's surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Coordinates", into = "Coordinates")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid_coordinate_error());
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl TryFrom<Coordinates> for GeoPoint {
    type Error = Error;

    fn try_from(coordinates: Coordinates) -> Result<Self, Self::Error> {
        GeoPoint::new(coordinates.latitude, coordinates.longitude)
    }
}

impl From<GeoPoint> for Coordinates {
    fn from(point: GeoPoint) -> Self {
        Coordinates::new(point.latitude, point.longitude)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Point::new(point.longitude, point.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(GeoPoint::new(90.1, 0.0).unwrap_err().code, 102);
        assert_eq!(GeoPoint::new(0.0, -180.5).unwrap_err().code, 102);
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn point_is_lon_lat() {
        let point: Point<f64> = GeoPoint::new(35.6971, -0.6308).unwrap().into();
        assert_eq!(point.x(), -0.6308);
        assert_eq!(point.y(), 35.6971);
    }

    #[test]
    fn deserialize_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"latitude":35.7,"longitude":-0.64}"#).unwrap();
        assert_eq!(ok.latitude(), 35.7);

        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude":120.0,"longitude":0.0}"#);
        assert!(bad.is_err());
    }
}
