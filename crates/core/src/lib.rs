pub mod extract;
pub mod facts;
pub mod intent;
pub mod models;
pub mod validate;

pub use extract::{location_after, route_pair, train_numbers, RoutePair};
pub use intent::{classify_intent_rules, classify_with_rule, normalize_text};
pub use models::*;
pub use validate::{validate, ValidationError};
