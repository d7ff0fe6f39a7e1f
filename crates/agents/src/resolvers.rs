use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, warn};
use yatra_core::facts::{
    best_time_advice, best_time_fact, place_fact, road_fact, scalar_or_missing, train_fact,
    train_legs_fact, weather_fact,
};
use yatra_core::{Query, Scalar};
use yatra_fallback::{rounded_minutes, FallbackStore};
use yatra_observability::{AppMetrics, DataSource};

use crate::collaborators::CollaboratorClient;

pub struct Resolvers {
    collaborators: CollaboratorClient,
    fallback: Arc<FallbackStore>,
    metrics: Arc<AppMetrics>,
    current_month: fn() -> u32,
}

impl Resolvers {
    pub fn new(
        collaborators: CollaboratorClient,
        fallback: Arc<FallbackStore>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            collaborators,
            fallback,
            metrics,
            current_month: local_month,
        }
    }

    pub fn with_month(mut self, current_month: fn() -> u32) -> Self {
        self.current_month = current_month;
        self
    }

    pub fn fallback(&self) -> &FallbackStore {
        &self.fallback
    }

    pub async fn facts_for(&self, query: &Query) -> Vec<String> {
        match query {
            Query::Weather { location } => vec![self.weather(location).await],
            Query::TrainNumber { train_number } => vec![self.train_by_number(train_number).await],
            Query::TrainRoute { start, end } => vec![self.trains_by_route(start, end).await],
            Query::Road { start, end } => vec![self.road(start, end).await],
            Query::TripPlanning { start, end } => self.trip(start, end).await,
            Query::PlaceInfo { location } => vec![self.place_info(location).unwrap_or_else(|| {
                format!("I don't have specific tourist information about {location}.")
            })],
            Query::BestTime { location } => vec![self.best_time(location)],
        }
    }

    pub async fn weather(&self, location: &str) -> String {
        match self.collaborators.fetch_weather(location).await {
            Ok(live) => {
                self.metrics.record_source(DataSource::Live);
                return weather_fact(&live.location, &live.reading);
            }
            Err(err) => warn!(location, error = %err, "weather service failed"),
        }

        match self.fallback.weather_for(location) {
            Some(entry) => {
                debug!(location, "using fallback weather");
                self.metrics.record_source(DataSource::Fallback);
                weather_fact(location, &entry.real_time_weather)
            }
            None => {
                self.metrics.record_source(DataSource::Missing);
                format!("Sorry, I don't have weather data for {location}.")
            }
        }
    }

    pub async fn train_by_number(&self, number: &str) -> String {
        match self.collaborators.fetch_train(number).await {
            Ok(train) => {
                if let Some(fact) = train_fact(number, &train) {
                    self.metrics.record_source(DataSource::Live);
                    return fact;
                }
            }
            Err(err) => warn!(train_number = number, error = %err, "train service failed"),
        }

        match self
            .fallback
            .train_by_number(number)
            .and_then(|train| train_fact(number, train))
        {
            Some(fact) => {
                debug!(train_number = number, "using fallback train schedule");
                self.metrics.record_source(DataSource::Fallback);
                fact
            }
            None => {
                self.metrics.record_source(DataSource::Missing);
                format!("Sorry, no train with number {number} was found.")
            }
        }
    }

    pub async fn trains_by_route(&self, start: &str, end: &str) -> String {
        match self.collaborators.fetch_trains_between(start, end).await {
            Ok(legs) => {
                if let Some(fact) = train_legs_fact(&legs) {
                    self.metrics.record_source(DataSource::Live);
                    return fact;
                }
            }
            Err(err) => warn!(start, end, error = %err, "trains-between service failed"),
        }

        match train_legs_fact(&self.fallback.trains_between(start, end)) {
            Some(fact) => {
                debug!(start, end, "using fallback train routes");
                self.metrics.record_source(DataSource::Fallback);
                fact
            }
            None => {
                self.metrics.record_source(DataSource::Missing);
                format!("Sorry, no trains found from {start} to {end}.")
            }
        }
    }

    pub async fn road(&self, start: &str, end: &str) -> String {
        match self.collaborators.fetch_route(start, end).await {
            Ok(live) => {
                self.metrics.record_source(DataSource::Live);
                return road_fact(
                    start,
                    end,
                    &scalar_or_zero(live.eta.hours.as_ref()),
                    &scalar_or_zero(live.eta.minutes.as_ref()),
                    &scalar_or_missing(live.distance_km.as_ref()),
                );
            }
            Err(err) => warn!(start, end, error = %err, "road service failed"),
        }

        match self.fallback.road_route(start, end) {
            Some(route) => {
                debug!(start, end, "using fallback road route");
                self.metrics.record_source(DataSource::Fallback);
                road_fact(
                    start,
                    end,
                    &scalar_or_zero(route.eta.hours.as_ref()),
                    &rounded_minutes(&route.eta),
                    &scalar_or_missing(route.distance_km.as_ref()),
                )
            }
            None => {
                self.metrics.record_source(DataSource::Missing);
                format!("Sorry, I don't have road info from {start} to {end}.")
            }
        }
    }

    pub fn place_info(&self, place: &str) -> Option<String> {
        let fact = self.fallback.place(place).map(|entry| place_fact(place, entry));
        self.metrics.record_source(if fact.is_some() {
            DataSource::Fallback
        } else {
            DataSource::Missing
        });
        fact
    }

    pub fn best_time(&self, place: &str) -> String {
        match self.fallback.place(place) {
            Some(entry) => {
                self.metrics.record_source(DataSource::Fallback);
                best_time_fact(place, entry)
            }
            None => best_time_advice(place, (self.current_month)()),
        }
    }

    pub async fn trip(&self, start: &str, end: &str) -> Vec<String> {
        let (trains, road, weather) = tokio::join!(
            self.trains_by_route(start, end),
            self.road(start, end),
            self.weather(end),
        );

        let mut facts = vec![trains, road, weather];
        facts.extend(self.place_info(end));
        facts.push(self.best_time(end));
        facts
    }
}

fn scalar_or_zero(value: Option<&Scalar>) -> String {
    value
        .map(ToString::to_string)
        .unwrap_or_else(|| "0".to_string())
}

fn local_month() -> u32 {
    chrono::Local::now().month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use yatra_core::{TrainEntry, TrainStop};

    fn offline_resolvers() -> Resolvers {
        let collaborators =
            CollaboratorClient::new("http://127.0.0.1:9", Duration::from_millis(300)).unwrap();
        Resolvers::new(
            collaborators,
            Arc::new(FallbackStore::bundled()),
            AppMetrics::shared(),
        )
        .with_month(|| 7)
    }

    #[tokio::test]
    async fn weather_falls_back_to_bundled_data() {
        let resolvers = offline_resolvers();
        assert_eq!(
            resolvers.weather("Mumbai").await,
            "The current weather in Mumbai is Clear with temperature 30°C, humidity 60%, wind 5 m/s West."
        );
        assert_eq!(
            resolvers.weather("Atlantis").await,
            "Sorry, I don't have weather data for Atlantis."
        );

        let snapshot = resolvers.metrics.snapshot();
        assert_eq!(snapshot.fallback_hits_total, 1);
        assert_eq!(snapshot.misses_total, 1);
    }

    #[tokio::test]
    async fn train_number_uses_schedule_ends() {
        let resolvers = offline_resolvers();
        let fact = resolvers.train_by_number("12951").await;
        assert_eq!(
            fact,
            "Train 12951 (Mumbai Central - New Delhi Rajdhani Express) starts at 17:00 and ends at 08:32, covering 1384 km."
        );
        assert_eq!(
            resolvers.train_by_number("99999").await,
            "Sorry, no train with number 99999 was found."
        );
    }

    #[tokio::test]
    async fn train_number_reports_distance_at_last_stop() {
        let stop = |name: &str, distance: i64| TrainStop {
            station_name: name.to_string(),
            arrival_time: Some("--".to_string()),
            departure_time: Some("06:00".to_string()),
            distance: Some(Scalar::from(distance)),
        };
        let store = FallbackStore::new(
            Vec::new(),
            vec![TrainEntry {
                train_number: "12002".to_string(),
                train_name: "Shatabdi Express".to_string(),
                schedule: vec![stop("New Delhi", 0), stop("Terminus", 1384)],
            }],
            Vec::new(),
            Vec::new(),
        );
        let collaborators =
            CollaboratorClient::new("http://127.0.0.1:9", Duration::from_millis(300)).unwrap();
        let resolvers = Resolvers::new(collaborators, Arc::new(store), AppMetrics::shared());

        assert!(resolvers.train_by_number("12002").await.contains("1384"));
    }

    #[tokio::test]
    async fn road_fallback_rounds_minutes() {
        let resolvers = offline_resolvers();
        assert_eq!(
            resolvers.road("Delhi", "Agra").await,
            "By road, from Delhi to Agra it takes about 3 hours 35 minutes covering 233.1 km."
        );
        assert_eq!(
            resolvers.road("Agra", "Delhi").await,
            "Sorry, I don't have road info from Agra to Delhi."
        );
    }

    #[tokio::test]
    async fn train_routes_list_legs_or_apologise() {
        let resolvers = offline_resolvers();
        let fact = resolvers.trains_by_route("Mumbai", "Delhi").await;
        assert!(fact.contains("Train 12951"));
        assert!(fact.contains("departs at 17:00 and arrives at 08:32."));
        assert_eq!(
            resolvers.trains_by_route("Shillong", "Imphal").await,
            "Sorry, no trains found from Shillong to Imphal."
        );
    }

    #[tokio::test]
    async fn place_queries_use_tourism_then_seasons() {
        let resolvers = offline_resolvers();
        let facts = resolvers
            .facts_for(&Query::PlaceInfo {
                location: "Hampi".to_string(),
            })
            .await;
        assert_eq!(facts, vec!["I don't have specific tourist information about Hampi.".to_string()]);

        assert_eq!(resolvers.best_time("Goa"), "The best time to visit Goa is November to February.");
        assert!(resolvers.best_time("Hampi").starts_with("Currently it's monsoon season"));
    }

    #[tokio::test]
    async fn trip_facts_keep_their_order() {
        let resolvers = offline_resolvers();
        let facts = resolvers.trip("Delhi", "Jaipur").await;

        assert_eq!(facts.len(), 5);
        assert!(facts[0].starts_with("Train 12015"));
        assert!(facts[1].starts_with("By road, from Delhi to Jaipur"));
        assert!(facts[2].starts_with("The current weather in Jaipur"));
        assert!(facts[3].starts_with("Jaipur - Pink City"));
        assert_eq!(facts[4], "The best time to visit Jaipur is October to March.");
    }

    #[tokio::test]
    async fn trip_without_route_still_reports_the_destination() {
        let resolvers = offline_resolvers();
        let facts = resolvers.trip("Agra", "Varanasi").await;

        assert!(!facts.is_empty());
        assert_eq!(facts.len(), 5);
        assert_eq!(facts[0], "Sorry, no trains found from Agra to Varanasi.");
        assert_eq!(facts[1], "Sorry, I don't have road info from Agra to Varanasi.");
        assert!(facts[2].starts_with("The current weather in Varanasi is Light Fog"));
        assert!(facts[3].starts_with("Varanasi - One of the oldest living cities"));
        assert_eq!(facts[4], "The best time to visit Varanasi is October to March.");
    }

    #[tokio::test]
    async fn trip_to_uncatalogued_place_skips_highlights() {
        let resolvers = offline_resolvers();
        let facts = resolvers.trip("Delhi", "Hampi").await;

        assert_eq!(facts.len(), 4);
        assert_eq!(facts[0], "Sorry, no trains found from Delhi to Hampi.");
        assert_eq!(facts[1], "Sorry, I don't have road info from Delhi to Hampi.");
        assert_eq!(facts[2], "Sorry, I don't have weather data for Hampi.");
        assert!(facts[3].starts_with("Currently it's monsoon season"));
    }
}
