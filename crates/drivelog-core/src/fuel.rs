//! Fuel types
//!
//! Fuel type arrives as free text (typed by the driver or read from an old
//! config file). It is normalized once into a closed set so the engine only
//! ever asks `is_electric()`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the vehicle runs on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FuelType {
    Gasoline,
    Ethanol,
    Diesel,
    /// No fuel cost is ever estimated for electric vehicles.
    Electric,
    /// Anything unrecognized, kept verbatim.
    Other(String),
}

impl Default for FuelType {
    fn default() -> Self {
        FuelType::Other("N/A".to_string())
    }
}

impl FuelType {
    /// Normalize free text, case-insensitively.
    ///
    /// Portuguese and English names are both accepted.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_uppercase().as_str() {
            "GASOLINA" | "GASOLINE" | "PETROL" => FuelType::Gasoline,
            "ETANOL" | "ETHANOL" => FuelType::Ethanol,
            "DIESEL" => FuelType::Diesel,
            "ELÉTRICO" | "ELETRICO" | "ELECTRIC" => FuelType::Electric,
            _ => FuelType::Other(trimmed.to_string()),
        }
    }

    /// Get the display name
    pub fn as_str(&self) -> &str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Ethanol => "Ethanol",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Other(name) => name,
        }
    }

    pub fn is_electric(&self) -> bool {
        matches!(self, FuelType::Electric)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for FuelType {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for FuelType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<FuelType> for String {
    fn from(fuel: FuelType) -> Self {
        fuel.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_electric_literals() {
        for s in ["ELÉTRICO", "elétrico", "Elétrico", "ELETRICO", "eletrico", "Electric"] {
            assert_eq!(FuelType::parse(s), FuelType::Electric, "{s}");
        }
    }

    #[test]
    fn test_known_fuels() {
        assert_eq!(FuelType::parse("Gasolina"), FuelType::Gasoline);
        assert_eq!(FuelType::parse(" gasoline "), FuelType::Gasoline);
        assert_eq!(FuelType::parse("Etanol"), FuelType::Ethanol);
        assert_eq!(FuelType::parse("DIESEL"), FuelType::Diesel);
    }

    #[test]
    fn test_other_kept_verbatim() {
        assert_eq!(FuelType::parse("GNV"), FuelType::Other("GNV".to_string()));
        assert!(!FuelType::parse("GNV").is_electric());
        assert_eq!(FuelType::default().as_str(), "N/A");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&FuelType::Electric).unwrap();
        assert_eq!(json, "\"Electric\"");
        let parsed: FuelType = serde_json::from_str("\"ELETRICO\"").unwrap();
        assert!(parsed.is_electric());
    }
}
