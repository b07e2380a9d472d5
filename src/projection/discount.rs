//! Present-value discounting
//!
//! The discount rate is the annual opportunity cost of capital. It is
//! converted to an equivalent monthly rate once; month `i` is discounted by
//! `1 / (1 + r_monthly)^i`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rates;

/// Monthly discount curve derived from a single annual rate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscountCurve {
    /// Annual effective discount rate
    pub annual_rate: f64,

    /// Equivalent monthly rate
    pub monthly_rate: f64,
}

impl DiscountCurve {
    pub fn from_annual(annual_rate: f64) -> Result<Self> {
        Ok(Self {
            annual_rate,
            monthly_rate: rates::to_monthly("discount_rate", annual_rate)?,
        })
    }

    /// Discount factor for `month` (1.0 at month 0)
    pub fn discount_factor(&self, month: u32) -> f64 {
        if month == 0 {
            return 1.0;
        }
        1.0 / rates::growth_factor(self.monthly_rate, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_month_zero_is_one() {
        for rate in [-0.5, 0.0, 0.05, 3.0] {
            let curve = DiscountCurve::from_annual(rate).unwrap();
            assert_eq!(curve.discount_factor(0), 1.0);
        }
    }

    #[test]
    fn test_twelve_months_is_annual_discount() {
        let curve = DiscountCurve::from_annual(0.05).unwrap();
        assert_relative_eq!(curve.discount_factor(12), 1.0 / 1.05, epsilon = 1e-12);
        assert_relative_eq!(curve.discount_factor(120), 1.05_f64.powi(-10), epsilon = 1e-12);
    }

    #[test]
    fn test_strictly_decreasing_for_positive_rate() {
        let curve = DiscountCurve::from_annual(0.07).unwrap();
        let factors: Vec<f64> = (0..=360).map(|m| curve.discount_factor(m)).collect();
        assert_eq!(factors.len(), 361);
        for pair in factors.windows(2) {
            assert!(pair[1] < pair[0]);
            assert!(pair[1] > 0.0 && pair[1] <= 1.0);
        }
    }

    #[test]
    fn test_zero_rate_is_flat() {
        let curve = DiscountCurve::from_annual(0.0).unwrap();
        assert!((0..=120).all(|m| curve.discount_factor(m) == 1.0));
    }

    #[test]
    fn test_keeps_annual_rate() {
        let curve = DiscountCurve::from_annual(0.10).unwrap();
        assert_eq!(curve.annual_rate, 0.10);
        assert_relative_eq!(rates::to_annual(curve.monthly_rate), 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_below_minus_one_rejected() {
        assert!(DiscountCurve::from_annual(-1.5).is_err());
    }
}
