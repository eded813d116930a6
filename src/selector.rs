use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::FareConfig;
use crate::entities::{Coordinates, GeoPoint, RouteSelection, Slot, Status};
use crate::error::{invalid_state_error, Error};
use crate::location::{request_position, LocationProvider};
use crate::pricing::{compute_distance_km, compute_price};

/// Captured before a location request suspends. The result is only applied
/// while the selector is still on the same generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocationTicket {
    generation: u64,
    slot: Slot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationOutcome {
    Applied,
    Stale,
    Unavailable,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub outcome: LocationOutcome,
    pub selection: RouteSelection,
}

/// Pickup/drop-off state machine for a single delivery request.
#[derive(Clone, Debug)]
pub struct RouteSelector {
    id: Uuid,
    fare: FareConfig,
    status: Status,
    pickup: Option<GeoPoint>,
    dropoff: Option<GeoPoint>,
    generation: u64,
    updated_at: DateTime<Utc>,
}

impl RouteSelector {
    pub fn new(fare: FareConfig) -> Self {
        Self::with_id(Uuid::new_v4(), fare)
    }

    pub fn with_id(id: Uuid, fare: FareConfig) -> Self {
        Self {
            id,
            fare,
            status: Status::AwaitingPickup,
            pickup: None,
            dropoff: None,
            generation: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn pickup(&self) -> Option<&GeoPoint> {
        self.pickup.as_ref()
    }

    pub fn dropoff(&self) -> Option<&GeoPoint> {
        self.dropoff.as_ref()
    }

    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn select_point(&mut self, coordinates: Coordinates, slot: Slot) -> Result<(), Error> {
        let point = GeoPoint::try_from(coordinates)?;

        match (self.status, slot) {
            (Status::AwaitingPickup, Slot::Pickup) => {
                self.pickup = Some(point);
                self.status = Status::AwaitingDropoff;
            }
            (Status::AwaitingDropoff, Slot::Dropoff) => {
                self.dropoff = Some(point);
                self.status = Status::RouteReady;
            }
            _ => return Err(invalid_state_error()),
        }

        self.touch();

        tracing::debug!("selected {:?}, now {}", slot, self.status.name());

        Ok(())
    }

    /// Writes into whichever slot is active.
    pub fn select_next_point(&mut self, coordinates: Coordinates) -> Result<(), Error> {
        let slot = self.status.active_slot().ok_or_else(invalid_state_error)?;
        self.select_point(coordinates, slot)
    }

    pub fn distance_km(&self) -> Result<f64, Error> {
        compute_distance_km(self.pickup.as_ref(), self.dropoff.as_ref(), &self.fare)
    }

    pub fn price_units(&self) -> Result<u64, Error> {
        Ok(compute_price(self.distance_km()?, &self.fare))
    }

    /// Distance and price are zero until both points are set.
    pub fn snapshot(&self) -> RouteSelection {
        let (distance_km, price_units) = match self.distance_km() {
            Ok(distance_km) => (distance_km, compute_price(distance_km, &self.fare)),
            Err(_) => (0.0, 0),
        };

        RouteSelection {
            id: self.id,
            status: self.status,
            pickup: self.pickup,
            dropoff: self.dropoff,
            distance_km,
            price_units,
            updated_at: self.updated_at,
        }
    }

    #[tracing::instrument(skip(self), fields(id = %self.id))]
    pub fn reset(&mut self) {
        self.status = Status::AwaitingPickup;
        self.pickup = None;
        self.dropoff = None;
        self.touch();
    }

    /// `None` once the route is ready.
    pub fn begin_location_request(&self) -> Option<LocationTicket> {
        self.status.active_slot().map(|slot| LocationTicket {
            generation: self.generation,
            slot,
        })
    }

    /// Applies a finished location request. Failures and stale results
    /// leave the selection untouched.
    #[tracing::instrument(skip(self, result), fields(id = %self.id))]
    pub fn apply_location(
        &mut self,
        ticket: LocationTicket,
        result: Result<Coordinates, Error>,
    ) -> LocationOutcome {
        if ticket.generation != self.generation {
            tracing::debug!("discarding stale location result");
            return LocationOutcome::Stale;
        }

        let coordinates = match result {
            Ok(coordinates) => coordinates,
            Err(_) => return LocationOutcome::Unavailable,
        };

        match self.select_point(coordinates, ticket.slot) {
            Ok(()) => LocationOutcome::Applied,
            Err(err) => {
                tracing::warn!("ignoring device position: {}", err);
                LocationOutcome::Unavailable
            }
        }
    }

    /// Requests the device position and selects it into the active slot.
    pub async fn use_current_location(
        &mut self,
        provider: &(dyn LocationProvider + Send + Sync),
        timeout: Duration,
    ) -> Result<LocationOutcome, Error> {
        let ticket = self
            .begin_location_request()
            .ok_or_else(invalid_state_error)?;

        let result = request_position(provider, timeout).await;

        Ok(self.apply_location(ticket, result))
    }

    fn touch(&mut self) {
        self.generation += 1;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::tests::StalledLocationProvider;
    use crate::location::FixedLocationProvider;

    fn selector() -> RouteSelector {
        RouteSelector::new(FareConfig::default())
    }

    fn oran() -> Coordinates {
        Coordinates::new(35.6971, -0.6308)
    }

    fn nearby() -> Coordinates {
        Coordinates::new(35.7000, -0.6400)
    }

    fn far() -> Coordinates {
        Coordinates::new(35.8000, -0.5000)
    }

    #[test]
    fn starts_awaiting_pickup() {
        let s = selector();
        let snapshot = s.snapshot();

        assert_eq!(s.status(), Status::AwaitingPickup);
        assert_eq!(snapshot.pickup, None);
        assert_eq!(snapshot.distance_km, 0.0);
        assert_eq!(snapshot.price_units, 0);
    }

    #[test]
    fn two_points_make_route_ready() {
        let mut s = selector();

        s.select_point(oran(), Slot::Pickup).unwrap();
        assert_eq!(s.status(), Status::AwaitingDropoff);
        assert_eq!(s.snapshot().distance_km, 0.0);
        assert_eq!(s.distance_km().unwrap_err().code, 103);

        s.select_point(nearby(), Slot::Dropoff).unwrap();
        assert_eq!(s.status(), Status::RouteReady);

        let snapshot = s.snapshot();
        assert_eq!(snapshot.status, Status::RouteReady);
        assert!(snapshot.distance_km > 0.85 && snapshot.distance_km < 1.0);
        assert_eq!(snapshot.price_units, 100);
    }

    #[test]
    fn third_point_is_rejected() {
        let mut s = selector();
        s.select_next_point(oran()).unwrap();
        s.select_next_point(nearby()).unwrap();

        let before = s.snapshot();
        let err = s.select_next_point(far()).unwrap_err();
        assert_eq!(err.code, 100);
        assert!(s.select_point(far(), Slot::Dropoff).is_err());

        assert_eq!(s.snapshot(), before);
        assert_eq!(s.dropoff(), GeoPoint::try_from(nearby()).ok().as_ref());
    }

    #[test]
    fn slots_cannot_be_written_out_of_turn() {
        let mut s = selector();
        assert_eq!(s.select_point(far(), Slot::Dropoff).unwrap_err().code, 100);
        assert_eq!(s.status(), Status::AwaitingPickup);
        assert!(s.dropoff().is_none());

        s.select_point(oran(), Slot::Pickup).unwrap();
        assert!(s.select_point(far(), Slot::Pickup).is_err());
        assert_eq!(s.pickup(), GeoPoint::try_from(oran()).ok().as_ref());
    }

    #[test]
    fn invalid_coordinate_does_not_mutate() {
        let mut s = selector();
        let err = tokio_test::assert_err!(s.select_point(Coordinates::new(91.0, 0.0), Slot::Pickup));

        assert_eq!(err.code, 102);
        assert_eq!(s.status(), Status::AwaitingPickup);
        assert!(s.pickup().is_none());
    }

    #[test]
    fn metered_route_price() {
        let mut s = selector();
        tokio_test::assert_ok!(s.select_next_point(oran()));
        tokio_test::assert_ok!(s.select_next_point(far()));

        let distance = s.distance_km().unwrap();
        assert_eq!(s.price_units().unwrap(), (distance * 40.0).round() as u64);
        assert!(s.price_units().unwrap() > 100);
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = selector();
        s.select_next_point(oran()).unwrap();
        s.select_next_point(far()).unwrap();

        s.reset();

        let snapshot = s.snapshot();
        assert_eq!(snapshot.status, Status::AwaitingPickup);
        assert_eq!(snapshot.pickup, None);
        assert_eq!(snapshot.dropoff, None);
        assert_eq!(snapshot.distance_km, 0.0);
        assert_eq!(snapshot.price_units, 0);

        s.select_next_point(nearby()).unwrap();
        assert_eq!(s.status(), Status::AwaitingDropoff);
    }

    #[test]
    fn late_location_after_reset_is_discarded() {
        let mut s = selector();
        let ticket = s.begin_location_request().unwrap();
        assert_eq!(ticket.slot, Slot::Pickup);

        s.reset();

        assert_eq!(s.apply_location(ticket, Ok(oran())), LocationOutcome::Stale);
        assert!(s.pickup().is_none());
    }

    #[test]
    fn late_location_after_manual_pick_is_discarded() {
        let mut s = selector();
        let ticket = s.begin_location_request().unwrap();

        s.select_next_point(nearby()).unwrap();

        assert_eq!(s.apply_location(ticket, Ok(oran())), LocationOutcome::Stale);
        assert_eq!(s.status(), Status::AwaitingDropoff);
        assert!(s.dropoff().is_none());
    }

    #[test]
    fn no_location_request_when_ready() {
        let mut s = selector();
        s.select_next_point(oran()).unwrap();
        s.select_next_point(nearby()).unwrap();

        assert!(s.begin_location_request().is_none());
    }

    #[tokio::test]
    async fn current_location_fills_active_slot() {
        let mut s = selector();
        s.select_next_point(oran()).unwrap();

        let provider = FixedLocationProvider::new(far());
        let outcome = s
            .use_current_location(&provider, Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(outcome, LocationOutcome::Applied);
        assert_eq!(s.status(), Status::RouteReady);
    }

    #[tokio::test]
    async fn denied_location_leaves_state() {
        let mut s = selector();
        let outcome = s
            .use_current_location(&FixedLocationProvider::denied(), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(outcome, LocationOutcome::Unavailable);
        assert_eq!(s.status(), Status::AwaitingPickup);
    }

    #[tokio::test]
    async fn out_of_range_device_position_is_ignored() {
        let mut s = selector();
        let provider = FixedLocationProvider::new(Coordinates::new(0.0, 200.0));
        let outcome = s
            .use_current_location(&provider, Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(outcome, LocationOutcome::Unavailable);
        assert!(s.pickup().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_location_leaves_state() {
        let mut s = selector();
        let outcome = s
            .use_current_location(&StalledLocationProvider, Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(outcome, LocationOutcome::Unavailable);
        assert_eq!(s.status(), Status::AwaitingPickup);
    }
}
