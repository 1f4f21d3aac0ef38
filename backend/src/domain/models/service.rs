//! The salon's fixed service catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bookable service. The catalog is closed; order matches the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalonService {
    Haircut,
    HairColoring,
    Manicure,
    Pedicure,
    Facial,
}

impl SalonService {
    /// Every service in catalog order
    pub const CATALOG: [SalonService; 5] = [
        SalonService::Haircut,
        SalonService::HairColoring,
        SalonService::Manicure,
        SalonService::Pedicure,
        SalonService::Facial,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SalonService::Haircut => "Haircut",
            SalonService::HairColoring => "Hair Coloring",
            SalonService::Manicure => "Manicure",
            SalonService::Pedicure => "Pedicure",
            SalonService::Facial => "Facial",
        }
    }

    /// Price in whole dollars
    pub fn price(&self) -> f64 {
        match self {
            SalonService::Haircut => 30.0,
            SalonService::HairColoring => 80.0,
            SalonService::Manicure => 25.0,
            SalonService::Pedicure => 35.0,
            SalonService::Facial => 50.0,
        }
    }

    /// Display form, also the form written to storage: "Haircut - $30"
    pub fn label(&self) -> String {
        format!("{} - ${}", self.name(), self.price())
    }

    /// The entry preselected on the booking form
    pub fn default_selection() -> Self {
        Self::CATALOG[0]
    }
}

impl fmt::Display for SalonService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown service: '{0}'")]
pub struct UnknownServiceError(pub String);

impl FromStr for SalonService {
    type Err = UnknownServiceError;

    /// Accepts the bare name or the full label, case-insensitively
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let wanted = input.trim().to_lowercase();
        Self::CATALOG
            .iter()
            .copied()
            .find(|service| {
                service.name().to_lowercase() == wanted || service.label().to_lowercase() == wanted
            })
            .ok_or_else(|| UnknownServiceError(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_booking_form() {
        let labels: Vec<String> = SalonService::CATALOG.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Haircut - $30",
                "Hair Coloring - $80",
                "Manicure - $25",
                "Pedicure - $35",
                "Facial - $50",
            ]
        );
    }

    #[test]
    fn test_parse_accepts_name_and_label() {
        assert_eq!("Manicure".parse::<SalonService>().unwrap(), SalonService::Manicure);
        assert_eq!("hair coloring".parse::<SalonService>().unwrap(), SalonService::HairColoring);
        assert_eq!("  Facial - $50 ".parse::<SalonService>().unwrap(), SalonService::Facial);
    }

    #[test]
    fn test_parse_rejects_unknown_entries() {
        for input in ["", "Massage", "Haircut - $31", "Hair"] {
            assert!(input.parse::<SalonService>().is_err(), "'{}' should be rejected", input);
        }
    }

    #[test]
    fn test_default_selection_is_first_entry() {
        assert_eq!(SalonService::default_selection(), SalonService::Haircut);
    }
}
