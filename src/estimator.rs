// 🧮 Cost Estimator - First-year cost and monthly remittance
// One deterministic pass: price the selections, apply GST to tuition,
// convert to CNY, classify into an affordability tier

use crate::catalog::{Accommodation, Food};
use crate::config::EstimatorConfig;
use serde::{Deserialize, Serialize};

/// Months in the academic funding year
const MONTHS_PER_YEAR: f64 = 12.0;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// Tuition budget below zero
    NegativeTuition(f64),

    /// Exchange rate must be strictly positive
    NonPositiveExchangeRate(f64),

    /// Accommodation key not in the fixed catalog
    UnknownAccommodation(String),

    /// Food key not in the fixed catalog
    UnknownFood(String),

    /// Config values the estimator cannot price with
    BadConfig(String),
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::NegativeTuition(v) => {
                write!(f, "tuition budget must be >= 0 SGD, got {}", v)
            }
            InvalidInput::NonPositiveExchangeRate(v) => {
                write!(f, "exchange rate must be > 0, got {}", v)
            }
            InvalidInput::UnknownAccommodation(key) => {
                write!(f, "unknown accommodation option: {:?}", key)
            }
            InvalidInput::UnknownFood(key) => {
                write!(f, "unknown food option: {:?}", key)
            }
            InvalidInput::BadConfig(msg) => write!(f, "bad estimator config: {}", msg),
        }
    }
}

impl std::error::Error for InvalidInput {}

// ============================================================================
// TIER
// ============================================================================

/// Qualitative affordability band for the first-year funds figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    SurvivalRisk,
    Tight,
    Comfortable,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::SurvivalRisk => "SURVIVAL_RISK",
            Tier::Tight => "TIGHT",
            Tier::Comfortable => "COMFORTABLE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::SurvivalRisk => "Survival risk",
            Tier::Tight => "Bare survival",
            Tier::Comfortable => "Comfort zone",
        }
    }

    /// The blunt-advisor verdict shown under the headline figures
    pub fn advice(&self) -> &'static str {
        match self {
            Tier::SurvivalRisk => {
                "Warning: surviving Singapore on this budget is extremely hard. \
                 It may only cover tuition and rent, and every breath will cost \
                 something. Consider Malaysia or Thailand instead."
            }
            Tier::Tight => {
                "Bare survival: expect an ascetic year with near-zero social life \
                 and no slack for illness or surprises. Make sure the student is \
                 independent and mentally tough."
            }
            Tier::Comfortable => {
                "Comfort zone: this is the realistic bar for studying in Singapore. \
                 The student can focus on school, eat out now and then, and live a \
                 normal student life."
            }
        }
    }
}

// ============================================================================
// INPUT / OUTPUT RECORDS
// ============================================================================

/// One form submission. Constructed fresh per calculation, never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorInput {
    /// Annual tuition budget (SGD), before GST
    pub tuition_annual_sgd: f64,

    pub accommodation: Accommodation,

    pub food: Food,

    /// Under 18 without an accompanying parent
    pub guardian_required: bool,

    /// SGD to CNY conversion rate
    pub exchange_rate_sgd_to_cny: f64,
}

impl EstimatorInput {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.tuition_annual_sgd < 0.0 {
            return Err(InvalidInput::NegativeTuition(self.tuition_annual_sgd));
        }
        if self.exchange_rate_sgd_to_cny <= 0.0 {
            return Err(InvalidInput::NonPositiveExchangeRate(
                self.exchange_rate_sgd_to_cny,
            ));
        }
        Ok(())
    }
}

/// Per-line cost detail, all figures in SGD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub tuition_with_tax: f64,
    pub accommodation_annual: f64,
    pub food_annual: f64,
    pub misc_transport_annual: f64,
    pub insurance_annual: f64,
    pub guardian_annual: f64,
    pub monthly_living_cost_sgd: f64,
    pub annual_living_cost_sgd: f64,
    pub total_annual_cost_sgd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorResult {
    pub breakdown: CostBreakdown,

    /// Total first-year funds needed, in CNY
    pub first_year_funds_cny: f64,

    /// What the family wires over each month to cover living costs, in CNY
    pub monthly_remittance_cny: f64,

    pub tier: Tier,
}

// ============================================================================
// ESTIMATOR
// ============================================================================

pub struct CostEstimator {
    config: EstimatorConfig,
}

impl CostEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        CostEstimator { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Price one submission. Pure and synchronous: same input, same result.
    pub fn estimate(&self, input: &EstimatorInput) -> Result<EstimatorResult, InvalidInput> {
        input.validate()?;

        let cfg = &self.config;

        let guardian_monthly = if input.guardian_required {
            cfg.guardian_fee_monthly_sgd
        } else {
            0.0
        };

        let monthly_living_cost_sgd = input.accommodation.monthly_cost_sgd()
            + input.food.monthly_cost_sgd()
            + cfg.misc_transport_monthly_sgd
            + guardian_monthly;

        let annual_living_cost_sgd = monthly_living_cost_sgd * MONTHS_PER_YEAR;

        let tuition_with_tax = input.tuition_annual_sgd * (1.0 + cfg.gst_rate);

        let total_annual_cost_sgd =
            tuition_with_tax + annual_living_cost_sgd + cfg.insurance_annual_sgd;

        let first_year_funds_cny = total_annual_cost_sgd * input.exchange_rate_sgd_to_cny;
        let monthly_remittance_cny = monthly_living_cost_sgd * input.exchange_rate_sgd_to_cny;

        let breakdown = CostBreakdown {
            tuition_with_tax,
            accommodation_annual: input.accommodation.monthly_cost_sgd() * MONTHS_PER_YEAR,
            food_annual: input.food.monthly_cost_sgd() * MONTHS_PER_YEAR,
            misc_transport_annual: cfg.misc_transport_monthly_sgd * MONTHS_PER_YEAR,
            insurance_annual: cfg.insurance_annual_sgd,
            guardian_annual: guardian_monthly * MONTHS_PER_YEAR,
            monthly_living_cost_sgd,
            annual_living_cost_sgd,
            total_annual_cost_sgd,
        };

        Ok(EstimatorResult {
            breakdown,
            first_year_funds_cny,
            monthly_remittance_cny,
            tier: self.classify(first_year_funds_cny),
        })
    }

    /// Band the first-year funds figure. Both thresholds land in TIGHT:
    /// below the floor is SURVIVAL_RISK, above the ceiling is COMFORTABLE.
    pub fn classify(&self, first_year_funds_cny: f64) -> Tier {
        if first_year_funds_cny < self.config.tight_floor_cny {
            Tier::SurvivalRisk
        } else if first_year_funds_cny <= self.config.tight_ceiling_cny {
            Tier::Tight
        } else {
            Tier::Comfortable
        }
    }
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn base_input() -> EstimatorInput {
        EstimatorInput {
            tuition_annual_sgd: 30_000.0,
            accommodation: Accommodation::HdbRoom,
            food: Food::HawkerOnly,
            guardian_required: false,
            exchange_rate_sgd_to_cny: 5.4,
        }
    }

    #[test]
    fn test_scenario_hdb_hawker_no_guardian() {
        let estimator = CostEstimator::default();
        let result = estimator.estimate(&base_input()).unwrap();

        assert_eq!(result.breakdown.monthly_living_cost_sgd, 1800.0);
        assert_eq!(result.breakdown.annual_living_cost_sgd, 21_600.0);
        assert_close(result.breakdown.tuition_with_tax, 32_700.0);
        assert_close(result.breakdown.total_annual_cost_sgd, 54_800.0);
        assert_close(result.first_year_funds_cny, 295_920.0);
        assert_close(result.monthly_remittance_cny, 9_720.0);
        assert_eq!(result.tier, Tier::SurvivalRisk);
    }

    #[test]
    fn test_scenario_guardian_fee_added() {
        let estimator = CostEstimator::default();
        let mut input = base_input();
        input.guardian_required = true;

        let result = estimator.estimate(&input).unwrap();

        assert_eq!(result.breakdown.monthly_living_cost_sgd, 3300.0);
        assert_eq!(result.breakdown.annual_living_cost_sgd, 39_600.0);
        assert_eq!(result.breakdown.guardian_annual, 18_000.0);
        assert_close(result.breakdown.total_annual_cost_sgd, 72_800.0);
        assert_close(result.first_year_funds_cny, 393_120.0);
        assert_eq!(result.tier, Tier::Tight);
    }

    #[test]
    fn test_scenario_condo_restaurant() {
        let estimator = CostEstimator::default();
        let input = EstimatorInput {
            tuition_annual_sgd: 50_000.0,
            accommodation: Accommodation::CondoRoom,
            food: Food::Restaurant,
            guardian_required: false,
            exchange_rate_sgd_to_cny: 5.4,
        };

        let result = estimator.estimate(&input).unwrap();

        assert_eq!(result.breakdown.monthly_living_cost_sgd, 3000.0);
        assert_eq!(result.breakdown.annual_living_cost_sgd, 36_000.0);
        assert_close(result.breakdown.tuition_with_tax, 54_500.0);
        assert_close(result.breakdown.total_annual_cost_sgd, 91_000.0);
        assert_close(result.first_year_funds_cny, 491_400.0);
        assert_eq!(result.tier, Tier::Comfortable);
    }

    #[test]
    fn test_negative_tuition_rejected() {
        let estimator = CostEstimator::default();
        let mut input = base_input();
        input.tuition_annual_sgd = -1.0;

        assert_eq!(
            estimator.estimate(&input).unwrap_err(),
            InvalidInput::NegativeTuition(-1.0)
        );
    }

    #[test]
    fn test_zero_exchange_rate_rejected() {
        let estimator = CostEstimator::default();
        let mut input = base_input();
        input.exchange_rate_sgd_to_cny = 0.0;

        assert_eq!(
            estimator.estimate(&input).unwrap_err(),
            InvalidInput::NonPositiveExchangeRate(0.0)
        );
    }

    #[test]
    fn test_negative_exchange_rate_rejected() {
        let estimator = CostEstimator::default();
        let mut input = base_input();
        input.exchange_rate_sgd_to_cny = -5.0;

        assert_eq!(
            estimator.estimate(&input).unwrap_err(),
            InvalidInput::NonPositiveExchangeRate(-5.0)
        );
    }

    #[test]
    fn test_annual_living_is_exactly_twelve_months() {
        let estimator = CostEstimator::default();

        for accommodation in Accommodation::ALL {
            for food in Food::ALL {
                for guardian_required in [false, true] {
                    let input = EstimatorInput {
                        tuition_annual_sgd: 17_500.0,
                        accommodation,
                        food,
                        guardian_required,
                        exchange_rate_sgd_to_cny: 5.23,
                    };
                    let result = estimator.estimate(&input).unwrap();

                    assert_eq!(
                        result.breakdown.annual_living_cost_sgd,
                        result.breakdown.monthly_living_cost_sgd * 12.0
                    );
                }
            }
        }
    }

    #[test]
    fn test_totals_are_non_negative_and_consistent() {
        let estimator = CostEstimator::default();

        for accommodation in Accommodation::ALL {
            for food in Food::ALL {
                let input = EstimatorInput {
                    tuition_annual_sgd: 0.0,
                    accommodation,
                    food,
                    guardian_required: true,
                    exchange_rate_sgd_to_cny: 0.01,
                };
                let result = estimator.estimate(&input).unwrap();
                let b = &result.breakdown;

                assert!(b.total_annual_cost_sgd >= 0.0);
                assert!(result.first_year_funds_cny >= 0.0);
                assert!(result.monthly_remittance_cny >= 0.0);
                assert_close(
                    b.total_annual_cost_sgd,
                    b.tuition_with_tax + b.annual_living_cost_sgd + b.insurance_annual,
                );
            }
        }
    }

    #[test]
    fn test_classify_boundaries_are_tight_inclusive() {
        let estimator = CostEstimator::default();

        assert_eq!(estimator.classify(299_999.99), Tier::SurvivalRisk);
        assert_eq!(estimator.classify(300_000.0), Tier::Tight);
        assert_eq!(estimator.classify(450_000.0), Tier::Tight);
        assert_eq!(estimator.classify(450_000.01), Tier::Comfortable);
    }

    #[test]
    fn test_boundary_funds_reached_through_estimate() {
        // GST set to zero keeps every figure an exact integer in f64, so the
        // headline lands on the threshold with no rounding error
        let estimator = CostEstimator::new(EstimatorConfig {
            gst_rate: 0.0,
            ..Default::default()
        });

        // 277_900 + 1800 * 12 + 500 = 300_000
        let mut input = base_input();
        input.tuition_annual_sgd = 277_900.0;
        input.exchange_rate_sgd_to_cny = 1.0;

        let result = estimator.estimate(&input).unwrap();
        assert_eq!(result.first_year_funds_cny, 300_000.0);
        assert_eq!(result.tier, Tier::Tight);

        // 427_900 + 1800 * 12 + 500 = 450_000
        input.tuition_annual_sgd = 427_900.0;
        let result = estimator.estimate(&input).unwrap();
        assert_eq!(result.first_year_funds_cny, 450_000.0);
        assert_eq!(result.tier, Tier::Tight);
    }

    #[test]
    fn test_classify_respects_config_thresholds() {
        let estimator = CostEstimator::new(EstimatorConfig {
            tight_floor_cny: 100.0,
            tight_ceiling_cny: 200.0,
            ..Default::default()
        });

        assert_eq!(estimator.classify(99.0), Tier::SurvivalRisk);
        assert_eq!(estimator.classify(100.0), Tier::Tight);
        assert_eq!(estimator.classify(200.0), Tier::Tight);
        assert_eq!(estimator.classify(201.0), Tier::Comfortable);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let estimator = CostEstimator::default();
        let input = base_input();

        let first = estimator.estimate(&input).unwrap();
        let second = estimator.estimate(&input).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_tier_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&Tier::SurvivalRisk).unwrap(),
            "\"SURVIVAL_RISK\""
        );
        assert_eq!(serde_json::to_string(&Tier::Tight).unwrap(), "\"TIGHT\"");
        assert_eq!(
            serde_json::to_string(&Tier::Comfortable).unwrap(),
            "\"COMFORTABLE\""
        );
    }

    #[test]
    fn test_tier_advice_is_fixed_copy() {
        assert!(Tier::SurvivalRisk.advice().starts_with("Warning:"));
        assert!(Tier::Tight.advice().starts_with("Bare survival:"));
        assert!(Tier::Comfortable.advice().starts_with("Comfort zone:"));
    }
}
