//! Annual to monthly rate conversion

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Method for converting an annual rate to a monthly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateConvention {
    /// Nominal APR compounded monthly: r_monthly = r_annual / 12
    /// (how mortgage rates are quoted)
    #[default]
    Apr,
    /// Effective annual rate: r_monthly = (1 + r_annual)^(1/12) - 1
    Effective,
}

impl RateConvention {
    pub fn monthly(self, field: &'static str, annual_rate: f64) -> Result<f64> {
        match self {
            RateConvention::Apr => {
                require_at_least_minus_one(field, annual_rate)?;
                Ok(annual_rate / 12.0)
            }
            RateConvention::Effective => to_monthly(field, annual_rate),
        }
    }
}

/// Convert an annual effective rate to the equivalent monthly compounding rate.
///
/// Compounding the result twelve times reproduces `annual_rate`. Rates below
/// -100% have no real monthly equivalent and are rejected.
pub fn to_monthly(field: &'static str, annual_rate: f64) -> Result<f64> {
    require_at_least_minus_one(field, annual_rate)?;
    Ok((1.0 + annual_rate).powf(1.0 / 12.0) - 1.0)
}

fn require_at_least_minus_one(field: &'static str, annual_rate: f64) -> Result<()> {
    if !annual_rate.is_finite() {
        return Err(ModelError::domain(field, format!("rate {annual_rate} is not finite")));
    }
    if annual_rate < -1.0 {
        return Err(ModelError::domain(
            field,
            format!("annual rate {annual_rate} is below -100%"),
        ));
    }
    Ok(())
}

/// Compound a monthly rate over twelve months
pub fn to_annual(monthly_rate: f64) -> f64 {
    (1.0 + monthly_rate).powi(12) - 1.0
}

/// Growth factor (1 + r)^months
pub fn growth_factor(monthly_rate: f64, months: u32) -> f64 {
    (1.0 + monthly_rate).powi(months as i32)
}
