//! Rent vs Buy - monthly NPV comparison of buying a home against renting
//!
//! This library provides:
//! - Annual to monthly rate conversion
//! - Level-payment mortgage amortization
//! - Home value and rent projections with present-value discounting
//! - The month-by-month buy/rent projection with break-even detection
//! - Batch and sensitivity runs over many input sets

pub mod error;
pub mod rates;
pub mod amortization;
pub mod inputs;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ModelError, Result};
pub use inputs::{Inputs, SaleAssumption};
pub use projection::{run, ModelEngine, ModelResult, MonthRecord, Summary};
pub use rates::RateConvention;
pub use scenario::ScenarioRunner;
