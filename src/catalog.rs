// 🏠 Option Catalogs - Fixed accommodation and food choices
// Closed sets: a selection outside the catalog is unrepresentable,
// string keys exist only at the presentation boundary

use crate::estimator::InvalidInput;
use serde::{Deserialize, Serialize};

// ============================================================================
// ACCOMMODATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accommodation {
    /// Ordinary room in an HDB flat
    HdbRoom,

    /// Ordinary room in a private condo
    CondoRoom,

    /// Homestay family, meals included
    Homestay,
}

impl Accommodation {
    /// Fixed catalog, in form display order
    pub const ALL: [Accommodation; 3] = [
        Accommodation::HdbRoom,
        Accommodation::CondoRoom,
        Accommodation::Homestay,
    ];

    /// Stable key used by forms and the API
    pub fn key(&self) -> &'static str {
        match self {
            Accommodation::HdbRoom => "hdb-room",
            Accommodation::CondoRoom => "condo-room",
            Accommodation::Homestay => "homestay",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Accommodation::HdbRoom => "HDB flat room",
            Accommodation::CondoRoom => "Condo room",
            Accommodation::Homestay => "Homestay (meals included)",
        }
    }

    /// Monthly cost in SGD
    pub fn monthly_cost_sgd(&self) -> f64 {
        match self {
            Accommodation::HdbRoom => 1000.0,
            Accommodation::CondoRoom => 1800.0,
            Accommodation::Homestay => 2200.0,
        }
    }

    /// Resolve a form/API key back to a catalog entry
    pub fn from_key(key: &str) -> Result<Self, InvalidInput> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.key() == key)
            .ok_or_else(|| InvalidInput::UnknownAccommodation(key.to_string()))
    }
}

// ============================================================================
// FOOD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Food {
    /// Hawker centres only
    HawkerOnly,

    /// Hawker centres plus the occasional restaurant
    Restaurant,
}

impl Food {
    /// Fixed catalog, in form display order
    pub const ALL: [Food; 2] = [Food::HawkerOnly, Food::Restaurant];

    /// Stable key used by forms and the API
    pub fn key(&self) -> &'static str {
        match self {
            Food::HawkerOnly => "hawker-only",
            Food::Restaurant => "restaurant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Food::HawkerOnly => "Hawker centres only",
            Food::Restaurant => "Occasional restaurant",
        }
    }

    /// Monthly cost in SGD
    pub fn monthly_cost_sgd(&self) -> f64 {
        match self {
            Food::HawkerOnly => 600.0,
            Food::Restaurant => 1000.0,
        }
    }

    /// Resolve a form/API key back to a catalog entry
    pub fn from_key(key: &str) -> Result<Self, InvalidInput> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key() == key)
            .ok_or_else(|| InvalidInput::UnknownFood(key.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accommodation_catalog_costs() {
        assert_eq!(Accommodation::HdbRoom.monthly_cost_sgd(), 1000.0);
        assert_eq!(Accommodation::CondoRoom.monthly_cost_sgd(), 1800.0);
        assert_eq!(Accommodation::Homestay.monthly_cost_sgd(), 2200.0);
    }

    #[test]
    fn test_food_catalog_costs() {
        assert_eq!(Food::HawkerOnly.monthly_cost_sgd(), 600.0);
        assert_eq!(Food::Restaurant.monthly_cost_sgd(), 1000.0);
    }

    #[test]
    fn test_accommodation_key_roundtrip() {
        for option in Accommodation::ALL {
            assert_eq!(Accommodation::from_key(option.key()).unwrap(), option);
        }
    }

    #[test]
    fn test_food_key_roundtrip() {
        for option in Food::ALL {
            assert_eq!(Food::from_key(option.key()).unwrap(), option);
        }
    }

    #[test]
    fn test_unknown_accommodation_key() {
        let err = Accommodation::from_key("penthouse").unwrap_err();
        assert_eq!(
            err,
            InvalidInput::UnknownAccommodation("penthouse".to_string())
        );
    }

    #[test]
    fn test_unknown_food_key() {
        let err = Food::from_key("michelin").unwrap_err();
        assert_eq!(err, InvalidInput::UnknownFood("michelin".to_string()));
    }

    #[test]
    fn test_serde_keys_match_catalog_keys() {
        // The API deserializes catalog enums straight from their keys
        let acc: Accommodation = serde_json::from_str("\"hdb-room\"").unwrap();
        assert_eq!(acc, Accommodation::HdbRoom);

        let food: Food = serde_json::from_str("\"hawker-only\"").unwrap();
        assert_eq!(food, Food::HawkerOnly);

        assert_eq!(
            serde_json::to_string(&Accommodation::Homestay).unwrap(),
            "\"homestay\""
        );
    }
}
