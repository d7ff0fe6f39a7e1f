use once_cell::sync::Lazy;
use regex::Regex;

pub const KNOWN_CITIES: &[&str] = &[
    "delhi",
    "mumbai",
    "chennai",
    "kolkata",
    "bangalore",
    "hyderabad",
    "jaipur",
    "pune",
    "ahmedabad",
    "lucknow",
];

pub const ROUTE_CITIES: &[&str] = &[
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
    "agra",
    "varanasi",
    "kochi",
    "goa",
    "srinagar",
    "shimla",
    "darjeeling",
];

#[derive(Debug, Clone, Copy)]
enum Order {
    StartThenEnd,
    EndThenStart,
}

static ROUTE_PATTERNS: Lazy<Vec<(Regex, Order)>> = Lazy::new(|| {
    [
        (
            r"(?i)from\s+([a-zA-Z\s]+)\s+to\s+([a-zA-Z\s]+)",
            Order::StartThenEnd,
        ),
        (
            r"(?i)between\s+([a-zA-Z\s]+)\s+and\s+([a-zA-Z\s]+)",
            Order::StartThenEnd,
        ),
        (
            r"(?i)to\s+([a-zA-Z\s]+)\s+from\s+([a-zA-Z\s]+)",
            Order::EndThenStart,
        ),
    ]
    .into_iter()
    .map(|(pattern, order)| (Regex::new(pattern).expect("valid route pattern"), order))
    .collect()
});

static CITY_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ROUTE_CITIES
        .iter()
        .map(|city| {
            let pattern = format!(r"\b{city}\b");
            (*city, Regex::new(&pattern).expect("valid city pattern"))
        })
        .collect()
});

static TRAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]{5})\b").expect("valid train number pattern"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePair {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RoutePair {
    pub fn both(&self) -> Option<(&str, &str)> {
        match (self.start.as_deref(), self.end.as_deref()) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

pub fn location_after(text: &str, preposition: &str) -> Option<String> {
    let index = find_ignore_ascii_case(text, preposition)?;
    let rest = &text[index + preposition.len()..];

    let mut words = Vec::new();
    for raw in rest.split_whitespace() {
        let word = raw.trim_end_matches(|ch: char| !ch.is_alphanumeric());
        if word.is_empty() || !(starts_uppercase(word) || is_known_city(word)) {
            break;
        }
        words.push(word);
        if word.len() != raw.len() {
            break;
        }
    }

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

// Pattern order is priority order; the city scan needs two distinct hits.
pub fn route_pair(text: &str) -> RoutePair {
    for (pattern, order) in ROUTE_PATTERNS.iter() {
        let Some(captures) = pattern.captures(text) else {
            continue;
        };

        let first = captures.get(1).map_or("", |m| m.as_str()).trim();
        let second = cut_at_punctuation(captures.get(2).map_or("", |m| m.as_str()));

        let (start, end) = match order {
            Order::StartThenEnd => (first, second),
            Order::EndThenStart => (second, first),
        };

        return RoutePair {
            start: non_empty(start),
            end: non_empty(end),
        };
    }

    let lower = text.to_lowercase();
    let mut hits = CITY_PATTERNS
        .iter()
        .filter_map(|(city, pattern)| pattern.find(&lower).map(|m| (m.start(), *city)))
        .collect::<Vec<_>>();
    hits.sort_by_key(|(position, _)| *position);

    match hits.as_slice() {
        [(_, start), (_, end), ..] => RoutePair {
            start: Some(title_case(start)),
            end: Some(title_case(end)),
        },
        _ => RoutePair::default(),
    }
}

pub fn train_numbers(text: &str) -> Vec<String> {
    TRAIN_NUMBER
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn is_known_city(word: &str) -> bool {
    let lower = word.to_lowercase();
    KNOWN_CITIES.contains(&lower.as_str())
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn cut_at_punctuation(value: &str) -> &str {
    value
        .split(|ch: char| !(ch.is_ascii_alphabetic() || ch.is_whitespace()))
        .next()
        .unwrap_or_default()
        .trim()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(index, _)| index).find(|&index| {
        haystack
            .get(index..index + needle.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(needle))
    })
}
