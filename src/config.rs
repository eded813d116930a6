use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{invalid_config_error, Error};

pub const DEFAULT_MINIMUM_FARE: u64 = 100;
pub const DEFAULT_PER_KM_RATE: f64 = 40.0;
pub const DEFAULT_EARTH_RADIUS_KM: f64 = 6371.0;
pub const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SELECTION_IDLE_SECS: u64 = 3600;
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Fare parameters. Prices are in the smallest display unit of the local
/// currency.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FareConfig {
    pub minimum_fare: u64,
    pub per_km_rate: f64,
    pub earth_radius_km: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            minimum_fare: DEFAULT_MINIMUM_FARE,
            per_km_rate: DEFAULT_PER_KM_RATE,
            earth_radius_km: DEFAULT_EARTH_RADIUS_KM,
        }
    }
}

impl FareConfig {
    pub fn new(minimum_fare: u64, per_km_rate: f64, earth_radius_km: f64) -> Result<Self, Error> {
        if !per_km_rate.is_finite() || per_km_rate < 0.0 {
            return Err(invalid_config_error("per_km_rate", per_km_rate));
        }
        if !earth_radius_km.is_finite() || earth_radius_km <= 0.0 {
            return Err(invalid_config_error("earth_radius_km", earth_radius_km));
        }

        Ok(Self {
            minimum_fare,
            per_km_rate,
            earth_radius_km,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub fare: FareConfig,
    pub location_timeout: Duration,
    /// Selections untouched for longer than this are dropped.
    pub selection_idle_timeout: Duration,
    pub listen_addr: SocketAddr,
    pub geolocation_url: Option<String>,
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        let fare = FareConfig::new(
            parse_var("WASSALI_MIN_FARE", DEFAULT_MINIMUM_FARE)?,
            parse_var("WASSALI_PER_KM_RATE", DEFAULT_PER_KM_RATE)?,
            parse_var("WASSALI_EARTH_RADIUS_KM", DEFAULT_EARTH_RADIUS_KM)?,
        )?;

        let timeout_secs = parse_var("WASSALI_LOCATION_TIMEOUT_SECS", DEFAULT_LOCATION_TIMEOUT_SECS)?;

        let idle_secs = parse_var("WASSALI_SELECTION_IDLE_SECS", DEFAULT_SELECTION_IDLE_SECS)?;

        let listen_addr = match env::var("WASSALI_LISTEN_ADDR") {
            Ok(value) => parse_value("WASSALI_LISTEN_ADDR", &value)?,
            Err(env::VarError::NotPresent) => parse_value("WASSALI_LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?,
            Err(err) => return Err(err.into()),
        };

        let geolocation_url = match env::var("WASSALI_GEOLOCATION_URL") {
            Ok(url) if !url.trim().is_empty() => Some(url),
            Ok(_) | Err(env::VarError::NotPresent) => None,
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            fare,
            location_timeout: Duration::from_secs(timeout_secs),
            selection_idle_timeout: Duration::from_secs(idle_secs),
            listen_addr,
            geolocation_url,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    match env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err.into()),
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| invalid_config_error(name, err))
}
