use crate::models::{Scalar, TourismPlace, TrainEntry, TrainLeg, WeatherReading};

const MISSING_VALUE: &str = "N/A";
const MISSING_TIME: &str = "--";

pub const MAX_TRAIN_LEGS: usize = 3;

pub fn weather_fact(location: &str, reading: &WeatherReading) -> String {
    format!(
        "The current weather in {} is {} with temperature {}°C, humidity {}%, wind {} m/s {}.",
        location,
        reading.weather_condition.as_deref().unwrap_or("Unknown"),
        scalar_or_missing(reading.temperature.as_ref()),
        scalar_or_missing(reading.humidity.as_ref()),
        scalar_or_missing(reading.wind_speed.as_ref()),
        reading.wind_direction.as_deref().unwrap_or_default(),
    )
}

pub fn train_fact(number: &str, train: &TrainEntry) -> Option<String> {
    let first = train.schedule.first()?;
    let last = train.schedule.last()?;

    Some(format!(
        "Train {} ({}) starts at {} and ends at {}, covering {} km.",
        number,
        train.train_name,
        first.departure_time.as_deref().unwrap_or(MISSING_TIME),
        last.arrival_time.as_deref().unwrap_or(MISSING_TIME),
        scalar_or_missing(last.distance.as_ref()),
    ))
}

pub fn train_legs_fact(legs: &[TrainLeg]) -> Option<String> {
    if legs.is_empty() {
        return None;
    }

    Some(
        legs.iter()
            .take(MAX_TRAIN_LEGS)
            .map(|leg| {
                format!(
                    "Train {} ({}) departs at {} and arrives at {}.",
                    leg.train_number,
                    leg.train_name,
                    leg.departure.as_deref().unwrap_or(MISSING_TIME),
                    leg.arrival.as_deref().unwrap_or(MISSING_TIME),
                )
            })
            .collect::<Vec<_>>()
            .join(" "),
    )
}

pub fn road_fact(start: &str, end: &str, hours: &str, minutes: &str, distance: &str) -> String {
    format!(
        "By road, from {start} to {end} it takes about {hours} hours {minutes} minutes covering {distance} km."
    )
}

pub fn place_fact(place: &str, entry: &TourismPlace) -> String {
    format!(
        "{} - {}. The best time to visit is {}. Top attractions include: {}.",
        place,
        entry.description,
        entry.best_time.as_deref().unwrap_or("any time of the year"),
        entry.attractions.join(", "),
    )
}

pub fn best_time_fact(place: &str, entry: &TourismPlace) -> String {
    format!(
        "The best time to visit {} is {}.",
        place,
        entry.best_time.as_deref().unwrap_or("any time of the year")
    )
}

pub fn scalar_or_missing(value: Option<&Scalar>) -> String {
    value
        .map(ToString::to_string)
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

const DESERT_REGIONS: &[&str] = &["rajasthan", "jaipur", "udaipur", "jodhpur", "jaisalmer"];
const COASTAL_REGIONS: &[&str] = &["goa", "mumbai", "kerala", "kochi"];
const NORTHERN_PLAINS: &[&str] = &["delhi", "agra", "varanasi", "lucknow"];
const HILL_STATIONS: &[&str] = &["darjeeling", "gangtok", "shimla", "manali", "srinagar"];

// `month` is 1-12.
pub fn best_time_advice(place: &str, month: u32) -> String {
    let lower = place.to_lowercase();
    let within = |regions: &[&str]| regions.contains(&lower.as_str());

    if within(DESERT_REGIONS) {
        return format!(
            "The best time to visit {place} is from October to March when the weather is pleasant and not too hot."
        );
    }
    if within(COASTAL_REGIONS) {
        return format!(
            "The best time to visit {place} is from November to February when it's not monsoon season and the weather is comfortable."
        );
    }
    if within(NORTHERN_PLAINS) {
        return format!(
            "The best time to visit {place} is from October to March when the weather is cooler and more comfortable."
        );
    }
    if within(HILL_STATIONS) {
        return format!(
            "The best time to visit {place} is from March to June or September to November, avoiding the monsoon season."
        );
    }

    match month {
        11 | 12 | 1 | 2 => format!(
            "Currently it's winter in most of India, making it a good time to visit {place} if it's in the plains or southern India."
        ),
        3..=5 => format!(
            "Currently it's summer in India, making it a good time to visit hill stations like Shimla or Darjeeling. If {place} is in the plains, it might be quite hot."
        ),
        6..=9 => format!(
            "Currently it's monsoon season in most of India. If {place} is affected by monsoons, you might want to check the weather forecast before planning your trip."
        ),
        _ => format!(
            "The post-monsoon season (October) is generally a good time to visit most places in India, including {place}."
        ),
    }
}
