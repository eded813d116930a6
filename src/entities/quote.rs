use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::GeoPoint;

/// Distance and price for a pickup/drop-off pair, computed without a
/// selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub token: Uuid,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub distance_km: f64,
    pub price_units: u64,
}

impl Quote {
    pub fn new(pickup: GeoPoint, dropoff: GeoPoint, distance_km: f64, price_units: u64) -> Self {
        Self {
            token: Uuid::new_v4(),
            pickup,
            dropoff,
            distance_km,
            price_units,
        }
    }
}
