use crate::extract::{location_after, route_pair, title_case, train_numbers, RoutePair};
use crate::models::{Classification, Intent};

const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temperature",
    "raining",
    "rain",
    "sunny",
    "forecast",
    "humidity",
    "climate",
    "hot",
    "cold",
    "windy",
    "thunderstorm",
    "precipitation",
];

const TRIP_KEYWORDS: &[&str] = &[
    "trip",
    "travel",
    "journey",
    "plan",
    "vacation",
    "holiday",
    "visit",
    "tour",
    "explore",
    "sightseeing",
    "tourist",
    "tourism",
];

const PLACE_PHRASES: &[&str] = &[
    "about",
    "information",
    "tell me about",
    "what is",
    "attractions",
    "places to see",
    "tourist spots",
    "best time",
    "when to visit",
];

const ROAD_KEYWORDS: &[&str] = &[
    "road",
    "drive",
    "driving",
    "car",
    "bus",
    "route",
    "travel by road",
    "highway",
    "travel time",
    "how long",
    "how far",
];

const WEATHER_PREPOSITIONS: &[&str] = &["in ", "for ", "at ", " of "];
const PLACE_PREPOSITIONS: &[&str] = &["about ", "visit ", "know about "];

const MAJOR_CITIES: &[&str] = &[
    "delhi",
    "mumbai",
    "bangalore",
    "chennai",
    "kolkata",
    "hyderabad",
    "ahmedabad",
    "pune",
    "jaipur",
    "lucknow",
];

const DEFAULT_WEATHER_LOCATION: &str = "Delhi";

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

struct Message<'a> {
    original: &'a str,
    lower: String,
}

impl Message<'_> {
    fn mentions(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    fn mentions_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.mentions(needle))
    }

    fn mentions_rail(&self) -> bool {
        self.mentions("train") || self.mentions("railway") || self.mentions("rail")
    }
}

struct Rule {
    name: &'static str,
    apply: fn(&Message<'_>) -> Option<Classification>,
}

// The first rule returning `Some` decides.
const RULES: &[Rule] = &[
    Rule {
        name: "train_number",
        apply: train_number_rule,
    },
    Rule {
        name: "weather",
        apply: weather_rule,
    },
    Rule {
        name: "trip_planning",
        apply: trip_rule,
    },
    Rule {
        name: "place",
        apply: place_rule,
    },
    Rule {
        name: "train_route",
        apply: train_route_rule,
    },
    Rule {
        name: "road",
        apply: road_rule,
    },
];

pub fn classify_intent_rules(text: &str) -> Classification {
    classify_with_rule(text).0
}

pub fn classify_with_rule(text: &str) -> (Classification, Option<&'static str>) {
    let message = Message {
        original: text,
        lower: text.to_lowercase(),
    };

    RULES
        .iter()
        .find_map(|rule| (rule.apply)(&message).map(|result| (result, Some(rule.name))))
        .unwrap_or_else(|| (Classification::unknown(), None))
}

fn train_number_rule(message: &Message<'_>) -> Option<Classification> {
    if !message.mentions_rail() {
        return None;
    }
    let number = train_numbers(message.original).into_iter().next()?;
    Some(Classification::new(Intent::TrainNumber).with("train_number", number))
}

fn weather_rule(message: &Message<'_>) -> Option<Classification> {
    if !message.mentions_any(WEATHER_KEYWORDS) {
        return None;
    }

    let location = WEATHER_PREPOSITIONS
        .iter()
        .find_map(|preposition| location_after(message.original, preposition))
        .or_else(|| {
            MAJOR_CITIES
                .iter()
                .find(|city| message.mentions(city))
                .map(|city| title_case(city))
        })
        .unwrap_or_else(|| DEFAULT_WEATHER_LOCATION.to_string());

    Some(Classification::new(Intent::Weather).with("location", location))
}

fn trip_rule(message: &Message<'_>) -> Option<Classification> {
    if !message.mentions_any(TRIP_KEYWORDS) {
        return None;
    }

    match route_pair(message.original) {
        RoutePair {
            start: Some(start),
            end: Some(end),
        } => Some(
            Classification::new(Intent::TripPlanning)
                .with("start", start)
                .with("end", end),
        ),
        RoutePair { end: Some(end), .. } => Some(Classification::new(Intent::PlaceInfo).with("location", end)),
        _ => None,
    }
}

fn place_rule(message: &Message<'_>) -> Option<Classification> {
    if !message.mentions_any(PLACE_PHRASES) {
        return None;
    }

    let location = PLACE_PREPOSITIONS
        .iter()
        .find_map(|preposition| location_after(message.original, preposition));

    // "best time" alone, or "when" together with "visit".
    let wants_best_time =
        message.mentions("best time") || (message.mentions("when") && message.mentions("visit"));

    if wants_best_time {
        return Some(match location {
            Some(location) => Classification::new(Intent::BestTime).with("location", location),
            None => Classification::unknown(),
        });
    }

    location.map(|location| Classification::new(Intent::PlaceInfo).with("location", location))
}

fn train_route_rule(message: &Message<'_>) -> Option<Classification> {
    if !(message.mentions("train") || message.mentions("rail")) {
        return None;
    }
    if !message.mentions_any(&["route", "from", "between"]) {
        return None;
    }
    pair_classification(Intent::TrainRoute, message.original)
}

fn road_rule(message: &Message<'_>) -> Option<Classification> {
    if !message.mentions_any(ROAD_KEYWORDS) {
        return None;
    }
    pair_classification(Intent::Road, message.original)
}

fn pair_classification(intent: Intent, text: &str) -> Option<Classification> {
    let pair = route_pair(text);
    let (start, end) = pair.both()?;
    Some(
        Classification::new(intent)
            .with("start", start)
            .with("end", end),
    )
}
