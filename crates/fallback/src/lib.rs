mod datasets;

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};
use yatra_core::facts::MAX_TRAIN_LEGS;
use yatra_core::{Eta, RouteEntry, TourismPlace, TrainEntry, TrainLeg, WeatherEntry};

pub use datasets::{ROUTES_FILE, TOURISM_FILE, TRAINS_FILE, WEATHER_FILE};

#[derive(Debug, Clone, Serialize)]
pub struct FallbackStats {
    pub weather_locations: usize,
    pub trains: usize,
    pub road_routes: usize,
    pub tourism_places: usize,
}

/// Read-only datasets consulted when a live collaborator cannot answer.
#[derive(Debug, Clone, Default)]
pub struct FallbackStore {
    weather: Vec<WeatherEntry>,
    trains: Vec<TrainEntry>,
    routes: Vec<RouteEntry>,
    tourism: Vec<TourismPlace>,
}

impl FallbackStore {
    pub fn new(
        weather: Vec<WeatherEntry>,
        trains: Vec<TrainEntry>,
        routes: Vec<RouteEntry>,
        tourism: Vec<TourismPlace>,
    ) -> Self {
        Self {
            weather,
            trains,
            routes,
            tourism,
        }
    }

    /// The datasets compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            weather: bundled_or_empty(WEATHER_FILE, datasets::parse_weather(datasets::BUNDLED_WEATHER)),
            trains: bundled_or_empty(TRAINS_FILE, datasets::parse_trains(datasets::BUNDLED_TRAINS)),
            routes: bundled_or_empty(ROUTES_FILE, datasets::parse_routes(datasets::BUNDLED_ROUTES)),
            tourism: bundled_or_empty(TOURISM_FILE, datasets::parse_tourism(datasets::BUNDLED_TOURISM)),
        }
    }

    /// Loads the four dataset files from `dir`. Each file that is missing or
    /// unparsable is replaced by its bundled copy, so this never fails.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "dataset directory not found");
        }

        let store = Self {
            weather: datasets::load_or_bundled(
                dir,
                WEATHER_FILE,
                datasets::parse_weather,
                datasets::BUNDLED_WEATHER,
            ),
            trains: datasets::load_or_bundled(
                dir,
                TRAINS_FILE,
                datasets::parse_trains,
                datasets::BUNDLED_TRAINS,
            ),
            routes: datasets::load_or_bundled(
                dir,
                ROUTES_FILE,
                datasets::parse_routes,
                datasets::BUNDLED_ROUTES,
            ),
            tourism: datasets::load_or_bundled(
                dir,
                TOURISM_FILE,
                datasets::parse_tourism,
                datasets::BUNDLED_TOURISM,
            ),
        };

        let stats = store.stats();
        info!(
            dir = %dir.display(),
            weather = stats.weather_locations,
            trains = stats.trains,
            routes = stats.road_routes,
            places = stats.tourism_places,
            "fallback datasets loaded"
        );
        store
    }

    pub fn stats(&self) -> FallbackStats {
        FallbackStats {
            weather_locations: self.weather.len(),
            trains: self.trains.len(),
            road_routes: self.routes.len(),
            tourism_places: self.tourism.len(),
        }
    }

    pub fn weather_for(&self, location: &str) -> Option<&WeatherEntry> {
        self.weather
            .iter()
            .find(|entry| entry.location.eq_ignore_ascii_case(location.trim()))
    }

    pub fn train_by_number(&self, number: &str) -> Option<&TrainEntry> {
        self.trains
            .iter()
            .find(|train| train.train_number == number.trim())
    }

    /// Trains whose schedule names both stations, start before end. Station
    /// names match by case-insensitive substring and the last matching stop
    /// wins for each side.
    pub fn trains_between(&self, start: &str, end: &str) -> Vec<TrainLeg> {
        let start = start.trim().to_lowercase();
        let end = end.trim().to_lowercase();

        self.trains
            .iter()
            .filter_map(|train| {
                let mut start_idx = None;
                let mut end_idx = None;
                for (idx, stop) in train.schedule.iter().enumerate() {
                    let name = stop.station_name.to_lowercase();
                    if name.contains(&start) {
                        start_idx = Some(idx);
                    }
                    if name.contains(&end) {
                        end_idx = Some(idx);
                    }
                }

                match (start_idx, end_idx) {
                    (Some(from), Some(to)) if from < to => Some(TrainLeg {
                        train_number: train.train_number.clone(),
                        train_name: train.train_name.clone(),
                        departure: train.schedule[from].departure_time.clone(),
                        arrival: train.schedule[to].arrival_time.clone(),
                    }),
                    _ => None,
                }
            })
            .take(MAX_TRAIN_LEGS)
            .collect()
    }

    /// Matches on the part of each stored name before the first comma, so
    /// "Delhi, India" answers for "delhi".
    pub fn road_route(&self, start: &str, end: &str) -> Option<&RouteEntry> {
        let start = start.trim().to_lowercase();
        let end = end.trim().to_lowercase();

        self.routes.iter().find(|route| {
            place_head(&route.start) == start && place_head(&route.end) == end
        })
    }

    pub fn place(&self, name: &str) -> Option<&TourismPlace> {
        self.tourism
            .iter()
            .find(|place| place.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Stored ETAs may carry fractional minutes; answers quote whole minutes,
/// with halves going to the even neighbour.
pub fn rounded_minutes(eta: &Eta) -> String {
    match &eta.minutes {
        None => "0".to_string(),
        Some(minutes) => minutes
            .as_f64()
            .map(|value| format!("{}", value.round_ties_even() as i64))
            .unwrap_or_else(|| minutes.to_string()),
    }
}

fn place_head(name: &str) -> String {
    name.split(',').next().unwrap_or_default().trim().to_lowercase()
}

fn bundled_or_empty<T>(dataset: &str, parsed: anyhow::Result<Vec<T>>) -> Vec<T> {
    parsed.unwrap_or_else(|err| {
        warn!(dataset, error = %err, "bundled dataset unreadable");
        Vec::new()
    })
}
