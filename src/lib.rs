// Singapore Study-Cost Estimator - Core Library
// Exposes all modules for use in the TUI, API server, and tests

pub mod catalog;
pub mod config;
pub mod estimator;
pub mod format;

// Re-export commonly used types
pub use catalog::{Accommodation, Food};
pub use config::EstimatorConfig;
pub use estimator::{
    CostBreakdown, CostEstimator, EstimatorInput, EstimatorResult, InvalidInput, Tier,
};
pub use format::{format_amount, format_cny, format_sgd};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
