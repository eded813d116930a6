use super::Engine;

use async_trait::async_trait;

use crate::{
    api::QuoteAPI,
    entities::{Coordinates, GeoPoint, Quote},
    error::Error,
    pricing::{compute_price, haversine_distance_km},
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_quote(&self, pickup: Coordinates, dropoff: Coordinates) -> Result<Quote, Error> {
        let pickup = GeoPoint::try_from(pickup)?;
        let dropoff = GeoPoint::try_from(dropoff)?;

        let distance_km = haversine_distance_km(&pickup, &dropoff, self.fare.earth_radius_km);
        let price_units = compute_price(distance_km, &self.fare);

        Ok(Quote::new(pickup, dropoff, distance_km, price_units))
    }
}
