//! Home value and rent projections
//!
//! Both are plain exponential growth from month 0. Negative rates shrink the
//! sequence and need no special handling.

use crate::rates;

#[derive(Debug, Clone, Copy)]
pub struct ValuationProjector {
    home_price: f64,
    monthly_appreciation: f64,
    initial_rent: f64,
    monthly_rent_inflation: f64,
}

impl ValuationProjector {
    pub fn new(
        home_price: f64,
        monthly_appreciation: f64,
        initial_rent: f64,
        monthly_rent_inflation: f64,
    ) -> Self {
        Self {
            home_price,
            monthly_appreciation,
            initial_rent,
            monthly_rent_inflation,
        }
    }

    /// Projected home value at `month`
    pub fn home_value(&self, month: u32) -> f64 {
        self.home_price * rates::growth_factor(self.monthly_appreciation, month)
    }

    /// Projected monthly rent at `month`
    pub fn rent(&self, month: u32) -> f64 {
        self.initial_rent * rates::growth_factor(self.monthly_rent_inflation, month)
    }
}
