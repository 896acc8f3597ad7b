use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock status for one console, as returned by `GET /availability/{console}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub console: String,
}

impl Availability {
    pub fn new(available: bool, console: impl Into<String>) -> Self {
        Self {
            available,
            console: console.into(),
        }
    }

    /// Stand-in result for a check that failed for any reason.
    pub fn unavailable(console: impl Into<String>) -> Self {
        Self::new(false, console)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "console: {}, availability: {}", self.console, self.available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload() {
        let availability: Availability =
            serde_json::from_str(r#"{"available":true,"console":"ps5"}"#).unwrap();
        assert_eq!(availability, Availability::new(true, "ps5"));
    }

    #[test]
    fn payload_missing_a_field_is_rejected() {
        assert!(serde_json::from_str::<Availability>(r#"{"console":"ps5"}"#).is_err());
        assert!(serde_json::from_str::<Availability>(r#"{"available":"yes","console":"ps5"}"#).is_err());
    }

    #[test]
    fn display_matches_log_line() {
        assert_eq!(
            Availability::unavailable("xbox").to_string(),
            "console: xbox, availability: false"
        );
    }
}
