//! Economic assumptions for one buy-versus-rent run

pub mod loader;

pub use loader::{load_inputs, DEFAULT_INPUTS_PATH};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::rates::{self, RateConvention};

/// Optional sell-at-month-M mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleAssumption {
    /// Month in which the home is sold (1..=analysis months)
    pub month: u32,
    /// Selling costs as a fraction of the sale price
    #[serde(default)]
    pub selling_cost_rate: f64,
}

/// Immutable configuration for one model run.
///
/// Every rate is a fraction (0.06 for 6%), never a times-100 percentage.
/// Flat amounts are monthly unless the name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inputs {
    pub analysis_years: u32,
    /// Annual effective discount rate (opportunity cost of capital)
    pub discount_rate: f64,

    // Purchase and financing
    pub home_price: f64,
    pub down_payment_fraction: f64,
    pub mortgage_rate: f64,
    pub mortgage_rate_convention: RateConvention,
    pub mortgage_term_years: u32,

    // Recurring ownership costs
    pub hoa_monthly: f64,
    /// Annual fraction of the current home value
    pub property_tax_rate: f64,
    pub home_insurance_monthly: f64,
    /// Annual fraction of the current home value
    pub maintenance_rate: f64,
    pub home_appreciation_rate: f64,

    // One-time costs at month 0
    pub closing_costs: f64,
    pub loan_fees: f64,

    // Renting
    pub monthly_rent: f64,
    pub rent_inflation_rate: f64,
    pub renters_insurance_monthly: f64,
    pub other_rent_costs_monthly: f64,

    pub sale: Option<SaleAssumption>,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            analysis_years: 10,
            discount_rate: 0.05,
            home_price: 500_000.0,
            down_payment_fraction: 0.20,
            mortgage_rate: 0.06,
            mortgage_rate_convention: RateConvention::Apr,
            mortgage_term_years: 30,
            hoa_monthly: 0.0,
            property_tax_rate: 0.0,
            home_insurance_monthly: 0.0,
            maintenance_rate: 0.0,
            home_appreciation_rate: 0.0,
            closing_costs: 0.0,
            loan_fees: 0.0,
            monthly_rent: 2_500.0,
            rent_inflation_rate: 0.0,
            renters_insurance_monthly: 0.0,
            other_rent_costs_monthly: 0.0,
            sale: None,
        }
    }
}

impl Inputs {
    /// Months in the analysis, truncated at the sale month in sale mode
    pub fn analysis_months(&self) -> u32 {
        let horizon = self.analysis_years.saturating_mul(12);
        match self.sale {
            Some(sale) => sale.month.min(horizon),
            None => horizon,
        }
    }

    pub fn mortgage_term_months(&self) -> u32 {
        self.mortgage_term_years.saturating_mul(12)
    }

    pub fn down_payment(&self) -> f64 {
        self.home_price * self.down_payment_fraction
    }

    pub fn loan_amount(&self) -> f64 {
        self.home_price - self.down_payment()
    }

    /// Reject any input that would make a formula undefined or non-finite.
    ///
    /// Returns the converted monthly rates so the engine never converts twice.
    pub fn validate(&self) -> Result<MonthlyRates> {
        let amounts = [
            ("home_price", self.home_price),
            ("hoa_monthly", self.hoa_monthly),
            ("home_insurance_monthly", self.home_insurance_monthly),
            ("closing_costs", self.closing_costs),
            ("loan_fees", self.loan_fees),
            ("monthly_rent", self.monthly_rent),
            ("renters_insurance_monthly", self.renters_insurance_monthly),
            ("other_rent_costs_monthly", self.other_rent_costs_monthly),
        ];
        for (field, value) in amounts {
            require_finite(field, value)?;
            if value < 0.0 {
                return Err(ModelError::invalid(field, format!("amount {value} is negative")));
            }
        }

        let fractions = [
            ("down_payment_fraction", self.down_payment_fraction),
            ("property_tax_rate", self.property_tax_rate),
            ("maintenance_rate", self.maintenance_rate),
        ];
        for (field, value) in fractions {
            require_fraction(field, value)?;
        }

        let months = self.analysis_years.checked_mul(12).ok_or_else(|| {
            ModelError::invalid("analysis_years", "horizon overflows a month count")
        })?;

        if let Some(sale) = self.sale {
            require_fraction("sale.selling_cost_rate", sale.selling_cost_rate)?;
            if sale.month == 0 || sale.month > months {
                return Err(ModelError::invalid(
                    "sale.month",
                    format!("sale month {} must lie in 1..={}", sale.month, months),
                ));
            }
        }

        if self.discount_rate == -1.0 {
            return Err(ModelError::domain(
                "discount_rate",
                "a -100% discount rate makes every future discount factor infinite",
            ));
        }

        let rates = MonthlyRates {
            discount: rates::to_monthly("discount_rate", self.discount_rate)?,
            mortgage: self
                .mortgage_rate_convention
                .monthly("mortgage_rate", self.mortgage_rate)?,
            appreciation: rates::to_monthly("home_appreciation_rate", self.home_appreciation_rate)?,
            rent_inflation: rates::to_monthly("rent_inflation_rate", self.rent_inflation_rate)?,
        };

        let term = self.mortgage_term_years.checked_mul(12).ok_or_else(|| {
            ModelError::invalid("mortgage_term_years", "term overflows a month count")
        })?;
        if term > i32::MAX as u32 {
            return Err(ModelError::invalid("mortgage_term_years", "term is too long"));
        }
        if months > i32::MAX as u32 {
            return Err(ModelError::invalid("analysis_years", "horizon is too long"));
        }

        let loan = self.loan_amount();
        if loan > 0.0 && term == 0 {
            return Err(ModelError::domain(
                "mortgage_term_years",
                format!("a loan of {loan:.2} needs a positive term"),
            ));
        }

        let endpoints = [
            ("discount_rate", 1.0 / rates::growth_factor(rates.discount, months)),
            ("home_appreciation_rate", self.home_price * rates::growth_factor(rates.appreciation, months)),
            ("rent_inflation_rate", self.monthly_rent * rates::growth_factor(rates.rent_inflation, months)),
        ];
        for (field, value) in endpoints {
            if !value.is_finite() {
                return Err(ModelError::domain(
                    field,
                    format!("projection over {months} months is not finite"),
                ));
            }
        }

        if loan > 0.0 {
            let payment = crate::amortization::payment_for(loan, rates.mortgage, term);
            if !payment.is_finite() || payment < 0.0 {
                return Err(ModelError::domain(
                    "mortgage_rate",
                    format!("level payment {payment} is not a finite positive amount"),
                ));
            }
        }

        Ok(rates)
    }
}

/// Monthly equivalents of the annual input rates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRates {
    pub discount: f64,
    pub mortgage: f64,
    pub appreciation: f64,
    pub rent_inflation: f64,
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::invalid(field, format!("value {value} is not finite")))
    }
}

fn require_fraction(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::invalid(field, format!("fraction {value} is outside [0, 1]")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let inputs = Inputs::default();
        let rates = inputs.validate().unwrap();
        assert!((rates.mortgage - 0.005).abs() < 1e-15);
        assert_eq!(inputs.analysis_months(), 120);
        assert_eq!(inputs.loan_amount(), 400_000.0);
    }

    #[test]
    fn test_zero_term_with_loan_is_domain_error() {
        let inputs = Inputs { mortgage_term_years: 0, ..Inputs::default() };
        let err = inputs.validate().unwrap_err();
        assert!(matches!(err, ModelError::Domain { field: "mortgage_term_years", .. }));
    }

    #[test]
    fn test_zero_term_without_loan_is_fine() {
        let inputs = Inputs {
            mortgage_term_years: 0,
            down_payment_fraction: 1.0,
            ..Inputs::default()
        };
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_rate_below_minus_one_rejected() {
        let inputs = Inputs { rent_inflation_rate: -1.2, ..Inputs::default() };
        assert!(matches!(
            inputs.validate().unwrap_err(),
            ModelError::Domain { field: "rent_inflation_rate", .. }
        ));

        let inputs = Inputs { discount_rate: -1.0, ..Inputs::default() };
        assert!(matches!(
            inputs.validate().unwrap_err(),
            ModelError::Domain { field: "discount_rate", .. }
        ));
    }

    #[test]
    fn test_percentages_must_be_fractions() {
        // 20 meaning "20%" is a caller error
        let inputs = Inputs { down_payment_fraction: 20.0, ..Inputs::default() };
        let err = inputs.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, ModelError::InvalidInput { field: "down_payment_fraction", .. }));
    }

    #[test]
    fn test_negative_amount_and_nan_rejected() {
        let inputs = Inputs { monthly_rent: -1.0, ..Inputs::default() };
        assert!(inputs.validate().is_err());

        let inputs = Inputs { hoa_monthly: f64::NAN, ..Inputs::default() };
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_sale_month_bounds() {
        let sale = SaleAssumption { month: 0, selling_cost_rate: 0.06 };
        let inputs = Inputs { sale: Some(sale), ..Inputs::default() };
        assert!(inputs.validate().is_err());

        let sale = SaleAssumption { month: 121, selling_cost_rate: 0.06 };
        let inputs = Inputs { sale: Some(sale), ..Inputs::default() };
        assert!(inputs.validate().is_err());

        let sale = SaleAssumption { month: 60, selling_cost_rate: 0.06 };
        let inputs = Inputs { sale: Some(sale), ..Inputs::default() };
        assert!(inputs.validate().is_ok());
        assert_eq!(inputs.analysis_months(), 60);
    }

    #[test]
    fn test_exploding_growth_rejected() {
        let inputs = Inputs {
            analysis_years: 2_000,
            home_appreciation_rate: 1e6,
            ..Inputs::default()
        };
        assert!(matches!(
            inputs.validate().unwrap_err(),
            ModelError::Domain { field: "home_appreciation_rate", .. }
        ));
    }

    #[test]
    fn test_overlong_term_rejected_without_panic() {
        let inputs = Inputs { mortgage_term_years: 400_000_000, ..Inputs::default() };
        assert!(matches!(
            inputs.validate().unwrap_err(),
            ModelError::InvalidInput { field: "mortgage_term_years", .. }
        ));

        // All-cash purchases still reject the term before any projection
        let inputs = Inputs {
            mortgage_term_years: 400_000_000,
            down_payment_fraction: 1.0,
            ..Inputs::default()
        };
        assert!(crate::projection::run(inputs.clone()).is_err());
        assert_eq!(inputs.mortgage_term_months(), u32::MAX);

        let inputs = Inputs { mortgage_term_years: 200_000_000, ..Inputs::default() };
        assert!(matches!(
            inputs.validate().unwrap_err(),
            ModelError::InvalidInput { field: "mortgage_term_years", .. }
        ));

        let inputs = Inputs { analysis_years: u32::MAX, ..Inputs::default() };
        assert!(inputs.validate().is_err());
        assert_eq!(inputs.analysis_months(), u32::MAX);
    }

    #[test]
    fn test_mortgage_rate_below_minus_one_rejected() {
        for convention in [RateConvention::Apr, RateConvention::Effective] {
            let inputs = Inputs {
                mortgage_rate: -2.0,
                mortgage_rate_convention: convention,
                ..Inputs::default()
            };
            assert!(matches!(
                inputs.validate().unwrap_err(),
                ModelError::Domain { field: "mortgage_rate", .. }
            ));
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let inputs: Inputs = serde_json::from_str(r#"{"home_price": 300000.0}"#).unwrap();
        assert_eq!(inputs.home_price, 300_000.0);
        assert_eq!(inputs.mortgage_term_years, 30);
        assert_eq!(inputs.mortgage_rate_convention, RateConvention::Apr);
    }
}
