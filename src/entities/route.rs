use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::GeoPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Pickup,
    Dropoff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    AwaitingPickup,
    AwaitingDropoff,
    RouteReady,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::AwaitingPickup => "awaiting_pickup".into(),
            Self::AwaitingDropoff => "awaiting_dropoff".into(),
            Self::RouteReady => "route_ready".into(),
        }
    }

    /// The slot the next point goes into, if any.
    pub fn active_slot(&self) -> Option<Slot> {
        match self {
            Self::AwaitingPickup => Some(Slot::Pickup),
            Self::AwaitingDropoff => Some(Slot::Dropoff),
            Self::RouteReady => None,
        }
    }
}

/// Snapshot of a route selection handed to the order-submission step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSelection {
    pub id: Uuid,
    pub status: Status,
    pub pickup: Option<GeoPoint>,
    pub dropoff: Option<GeoPoint>,
    pub distance_km: f64,
    pub price_units: u64,
    pub updated_at: DateTime<Utc>,
}
