use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::Coordinates,
    error::{invalid_input_error, upstream_error, Error},
    location::LocationProvider,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon", alias = "lng")]
    longitude: Option<f64>,
}

impl Response {
    fn coordinates(&self) -> Result<Coordinates, Error> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
            _ => Err(upstream_error()),
        }
    }
}

/// Resolves the caller's position from an IP geolocation endpoint that
/// answers with a JSON object carrying `latitude`/`longitude` (or
/// `lat`/`lon`).
#[derive(Clone, Debug)]
pub struct IpGeolocationProvider {
    client: reqwest::Client,
    url: String,
}

impl IpGeolocationProvider {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl LocationProvider for IpGeolocationProvider {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn current_position(&self) -> Result<Coordinates, Error> {
        let res = self.client.get(&self.url).send().await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        data.coordinates()
    }
}
