use crate::config::FareConfig;
use crate::entities::GeoPoint;
use crate::error::{missing_point_error, Error};

/// Great-circle distance in kilometres between two points on a sphere of
/// the given radius.
pub fn haversine_distance_km(a: &GeoPoint, b: &GeoPoint, earth_radius_km: f64) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    // rounding can leave this just outside [0, 1] for near-antipodal points
    let a_hav = ((delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a_hav.sqrt().atan2((1.0 - a_hav).sqrt());

    earth_radius_km * c
}

/// Distance between two optional points. Fails with a missing point error if
/// either is absent.
pub fn compute_distance_km(
    a: Option<&GeoPoint>,
    b: Option<&GeoPoint>,
    fare: &FareConfig,
) -> Result<f64, Error> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(haversine_distance_km(a, b, fare.earth_radius_km)),
        _ => Err(missing_point_error()),
    }
}

/// `max(minimum_fare, round(distance_km * per_km_rate))`.
pub fn compute_price(distance_km: f64, fare: &FareConfig) -> u64 {
    let metered = (distance_km.max(0.0) * fare.per_km_rate).round();

    // saturating float-to-int cast
    fare.minimum_fare.max(metered as u64)
}
