use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use yatra_core::{Eta, Scalar, TrainEntry, TrainLeg, WeatherReading};

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("collaborator unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("collaborator returned status {0}")]
    Status(u16),
    #[error("malformed collaborator response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveWeather {
    pub location: String,
    pub reading: WeatherReading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveRoute {
    pub distance_km: Option<Scalar>,
    pub eta: Eta,
}

#[derive(Debug, Deserialize)]
struct WeatherBody {
    location: Option<String>,
    real_time_weather: Option<WeatherReading>,
}

#[derive(Debug, Deserialize)]
struct TrainInfoBody {
    #[serde(default)]
    indian_railways: RailwaysBody,
}

#[derive(Debug, Default, Deserialize)]
struct RailwaysBody {
    #[serde(default)]
    trains: Vec<TrainEntry>,
}

#[derive(Debug, Deserialize)]
struct TrainsBetweenBody {
    #[serde(default)]
    trains: Vec<TrainLeg>,
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    #[serde(default)]
    distance_km: Option<Scalar>,
    #[serde(default)]
    eta: Option<Eta>,
}

#[derive(Clone)]
pub struct CollaboratorClient {
    http: Client,
    base_url: String,
}

impl CollaboratorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CollaboratorError> {
        let http = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_weather(&self, location: &str) -> Result<LiveWeather, CollaboratorError> {
        let body: WeatherBody = self.get_json("/weather", &[("location", location)]).await?;
        let reading = body
            .real_time_weather
            .ok_or_else(|| malformed("missing real_time_weather"))?;

        Ok(LiveWeather {
            location: body
                .location
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| location.to_string()),
            reading,
        })
    }

    pub async fn fetch_train(&self, number: &str) -> Result<TrainEntry, CollaboratorError> {
        let path = format!("/train-info/{number}");
        let body: TrainInfoBody = self.get_json(&path, &[]).await?;
        body.indian_railways
            .trains
            .into_iter()
            .next()
            .filter(|train| !train.schedule.is_empty())
            .ok_or_else(|| malformed("no train schedule"))
    }

    pub async fn fetch_trains_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<TrainLeg>, CollaboratorError> {
        let body: TrainsBetweenBody = self
            .get_json("/trains-between", &[("start", start), ("end", end)])
            .await?;
        if body.trains.is_empty() {
            return Err(malformed("no trains listed"));
        }
        Ok(body.trains)
    }

    pub async fn fetch_route(&self, start: &str, end: &str) -> Result<LiveRoute, CollaboratorError> {
        let start = format!("{start},India");
        let end = format!("{end},India");
        let body: RouteBody = self
            .get_json("/route", &[("start", start.as_str()), ("end", end.as_str())])
            .await?;

        if body.distance_km.is_none() && body.eta.is_none() {
            return Err(malformed("no distance or eta"));
        }
        Ok(LiveRoute {
            distance_km: body.distance_km,
            eta: body.eta.unwrap_or_default(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CollaboratorError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| CollaboratorError::Malformed(err.to_string()))
    }
}

fn malformed(reason: &str) -> CollaboratorError {
    CollaboratorError::Malformed(reason.to_string())
}
