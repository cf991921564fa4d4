// ⚙️ Estimator Config - Fees, GST rate, and affordability thresholds
// Fees and thresholds drift over time while the formula does not,
// so they are configuration rather than literals

use crate::estimator::InvalidInput;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Fixed misc and transport allowance (SGD/month)
pub const DEFAULT_MISC_TRANSPORT_MONTHLY_SGD: f64 = 200.0;

/// Mandatory medical insurance (SGD/year)
pub const DEFAULT_INSURANCE_ANNUAL_SGD: f64 = 500.0;

/// Appointed-guardian fee for students under 18 (SGD/month)
pub const DEFAULT_GUARDIAN_FEE_MONTHLY_SGD: f64 = 1500.0;

/// Goods and Services Tax applied to tuition
pub const DEFAULT_GST_RATE: f64 = 0.09;

/// First-year funds below this are SURVIVAL_RISK (CNY)
pub const DEFAULT_TIGHT_FLOOR_CNY: f64 = 300_000.0;

/// First-year funds above this are COMFORTABLE (CNY)
pub const DEFAULT_TIGHT_CEILING_CNY: f64 = 450_000.0;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Misc and transport allowance (SGD/month)
    #[serde(default = "default_misc_transport")]
    pub misc_transport_monthly_sgd: f64,

    /// Mandatory medical insurance (SGD/year)
    #[serde(default = "default_insurance")]
    pub insurance_annual_sgd: f64,

    /// Guardian fee when guardianship is required (SGD/month)
    #[serde(default = "default_guardian_fee")]
    pub guardian_fee_monthly_sgd: f64,

    /// GST rate applied to tuition only
    #[serde(default = "default_gst_rate")]
    pub gst_rate: f64,

    /// Lower bound of the TIGHT band, inclusive (CNY)
    #[serde(default = "default_tight_floor")]
    pub tight_floor_cny: f64,

    /// Upper bound of the TIGHT band, inclusive (CNY)
    #[serde(default = "default_tight_ceiling")]
    pub tight_ceiling_cny: f64,
}

fn default_misc_transport() -> f64 {
    DEFAULT_MISC_TRANSPORT_MONTHLY_SGD
}

fn default_insurance() -> f64 {
    DEFAULT_INSURANCE_ANNUAL_SGD
}

fn default_guardian_fee() -> f64 {
    DEFAULT_GUARDIAN_FEE_MONTHLY_SGD
}

fn default_gst_rate() -> f64 {
    DEFAULT_GST_RATE
}

fn default_tight_floor() -> f64 {
    DEFAULT_TIGHT_FLOOR_CNY
}

fn default_tight_ceiling() -> f64 {
    DEFAULT_TIGHT_CEILING_CNY
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            misc_transport_monthly_sgd: DEFAULT_MISC_TRANSPORT_MONTHLY_SGD,
            insurance_annual_sgd: DEFAULT_INSURANCE_ANNUAL_SGD,
            guardian_fee_monthly_sgd: DEFAULT_GUARDIAN_FEE_MONTHLY_SGD,
            gst_rate: DEFAULT_GST_RATE,
            tight_floor_cny: DEFAULT_TIGHT_FLOOR_CNY,
            tight_ceiling_cny: DEFAULT_TIGHT_CEILING_CNY,
        }
    }
}

impl EstimatorConfig {
    /// Load config from a JSON file, falling back to defaults for
    /// omitted fields
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: EstimatorConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configs the estimator cannot price sanely
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.misc_transport_monthly_sgd < 0.0 {
            return Err(InvalidInput::BadConfig(format!(
                "misc_transport_monthly_sgd must be >= 0, got {}",
                self.misc_transport_monthly_sgd
            )));
        }
        if self.insurance_annual_sgd < 0.0 {
            return Err(InvalidInput::BadConfig(format!(
                "insurance_annual_sgd must be >= 0, got {}",
                self.insurance_annual_sgd
            )));
        }
        if self.guardian_fee_monthly_sgd < 0.0 {
            return Err(InvalidInput::BadConfig(format!(
                "guardian_fee_monthly_sgd must be >= 0, got {}",
                self.guardian_fee_monthly_sgd
            )));
        }
        if self.gst_rate < 0.0 {
            return Err(InvalidInput::BadConfig(format!(
                "gst_rate must be >= 0, got {}",
                self.gst_rate
            )));
        }
        if self.tight_floor_cny <= 0.0 || self.tight_ceiling_cny <= 0.0 {
            return Err(InvalidInput::BadConfig(
                "affordability thresholds must be positive".to_string(),
            ));
        }
        if self.tight_floor_cny > self.tight_ceiling_cny {
            return Err(InvalidInput::BadConfig(format!(
                "tight_floor_cny ({}) must not exceed tight_ceiling_cny ({})",
                self.tight_floor_cny, self.tight_ceiling_cny
            )));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_published_constants() {
        let config = EstimatorConfig::default();

        assert_eq!(config.misc_transport_monthly_sgd, 200.0);
        assert_eq!(config.insurance_annual_sgd, 500.0);
        assert_eq!(config.guardian_fee_monthly_sgd, 1500.0);
        assert_eq!(config.gst_rate, 0.09);
        assert_eq!(config.tight_floor_cny, 300_000.0);
        assert_eq!(config.tight_ceiling_cny, 450_000.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EstimatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: EstimatorConfig = serde_json::from_str(r#"{"gst_rate": 0.08}"#).unwrap();

        assert_eq!(config.gst_rate, 0.08);
        assert_eq!(config.insurance_annual_sgd, 500.0);
        assert_eq!(config.tight_floor_cny, 300_000.0);
    }

    #[test]
    fn test_negative_fee_rejected() {
        let config = EstimatorConfig {
            guardian_fee_monthly_sgd: -1.0,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(InvalidInput::BadConfig(_))
        ));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = EstimatorConfig {
            tight_floor_cny: 500_000.0,
            tight_ceiling_cny: 400_000.0,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(InvalidInput::BadConfig(_))
        ));
    }
}
