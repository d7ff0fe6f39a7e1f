use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;
use yatra_core::{RouteEntry, TourismPlace, TrainEntry, WeatherEntry};

pub const WEATHER_FILE: &str = "weather.json";
pub const TRAINS_FILE: &str = "trains.json";
pub const ROUTES_FILE: &str = "routes.json";
pub const TOURISM_FILE: &str = "tourism.json";

pub(crate) const BUNDLED_WEATHER: &str = include_str!("../../../data/weather.json");
pub(crate) const BUNDLED_TRAINS: &str = include_str!("../../../data/trains.json");
pub(crate) const BUNDLED_ROUTES: &str = include_str!("../../../data/routes.json");
pub(crate) const BUNDLED_TOURISM: &str = include_str!("../../../data/tourism.json");

#[derive(Debug, Default, Deserialize)]
struct WeatherFile {
    #[serde(default)]
    weather_data: Vec<WeatherEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct RailwaysFile {
    #[serde(default)]
    indian_railways: Railways,
}

#[derive(Debug, Default, Deserialize)]
struct Railways {
    #[serde(default)]
    trains: Vec<TrainEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct TourismFile {
    #[serde(default)]
    places: Vec<TourismPlace>,
}

pub(crate) fn parse_weather(raw: &str) -> Result<Vec<WeatherEntry>> {
    Ok(serde_json::from_str::<WeatherFile>(raw)?.weather_data)
}

pub(crate) fn parse_trains(raw: &str) -> Result<Vec<TrainEntry>> {
    Ok(serde_json::from_str::<RailwaysFile>(raw)?
        .indian_railways
        .trains)
}

pub(crate) fn parse_routes(raw: &str) -> Result<Vec<RouteEntry>> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn parse_tourism(raw: &str) -> Result<Vec<TourismPlace>> {
    Ok(serde_json::from_str::<TourismFile>(raw)?.places)
}

/// Reads `file_name` from `dir`; on any failure logs and uses `bundled`.
pub(crate) fn load_or_bundled<T>(
    dir: &Path,
    file_name: &str,
    parse: fn(&str) -> Result<Vec<T>>,
    bundled: &str,
) -> Vec<T> {
    let path = dir.join(file_name);
    let loaded = std::fs::read_to_string(&path)
        .with_context(|| format!("failed reading dataset: {}", path.display()))
        .and_then(|raw| {
            parse(&raw).with_context(|| format!("failed parsing dataset: {}", path.display()))
        });

    match loaded {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dataset = file_name, error = %format!("{err:#}"), "using bundled dataset");
            parse(bundled).unwrap_or_default()
        }
    }
}
