use thiserror::Error;

use crate::models::{Classification, Intent, Query};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please specify a valid location for the {}.", .0.label())]
    Location(Intent),
    #[error("Please provide a valid 5-digit train number.")]
    TrainNumber,
    #[error("Please specify a valid starting location for your {}.", .0.label())]
    Start(Intent),
    #[error("Please specify a valid destination for your {}.", .0.label())]
    Destination(Intent),
    #[error("I couldn't understand your request. Please try again with more details.")]
    Unrecognized,
}

const MIN_PLACE_CHARS: usize = 2;

pub fn validate(classification: &Classification) -> Result<Query, ValidationError> {
    let intent = classification.intent;

    match intent {
        Intent::Weather | Intent::PlaceInfo | Intent::BestTime => {
            let location = place_param(classification, "location")
                .ok_or(ValidationError::Location(intent))?;
            Ok(match intent {
                Intent::Weather => Query::Weather { location },
                Intent::PlaceInfo => Query::PlaceInfo { location },
                _ => Query::BestTime { location },
            })
        }
        Intent::TrainNumber => {
            let number = classification
                .param("train_number")
                .map(str::trim)
                .filter(|value| value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit()))
                .ok_or(ValidationError::TrainNumber)?;
            Ok(Query::TrainNumber {
                train_number: number.to_string(),
            })
        }
        Intent::TrainRoute | Intent::Road | Intent::TripPlanning => {
            let start =
                place_param(classification, "start").ok_or(ValidationError::Start(intent))?;
            let end =
                place_param(classification, "end").ok_or(ValidationError::Destination(intent))?;
            Ok(match intent {
                Intent::TrainRoute => Query::TrainRoute { start, end },
                Intent::Road => Query::Road { start, end },
                _ => Query::TripPlanning { start, end },
            })
        }
        Intent::Unknown => Err(ValidationError::Unrecognized),
    }
}

fn place_param(classification: &Classification, key: &str) -> Option<String> {
    classification
        .param(key)
        .map(str::trim)
        .filter(|value| value.chars().count() >= MIN_PLACE_CHARS)
        .map(ToString::to_string)
}
