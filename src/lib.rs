//! `DiveTrip` - validation of agent-planned scuba dive trips
//!
//! A planning agent searches dive resorts and flights and answers with a
//! cost-sorted JSON list of travel packages. This library checks such answers
//! for schema conformance, cost ordering, flight/stay date consistency and
//! the presence of at least one package.

pub mod agent;
pub mod checks;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod payload;
pub mod pipeline;
pub mod request;
pub mod schema;

// Re-export core types for public API
pub use agent::{FinalAnswerGate, GatedAnswer, PlanningAgent};
pub use checks::{Check, CheckKind, CheckOutcome, MissingCostPolicy, Violation, ViolationKind};
pub use config::DiveTripConfig;
pub use error::{DiveTripError, ParseError};
pub use models::{ResultSet, TravelPackage};
pub use payload::{parse_payload, strip_json_fence};
pub use pipeline::{ValidationPipeline, ValidationReport};
pub use request::{DateRange, TripRequest, possible_date_ranges};
pub use schema::Schema;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DiveTripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
