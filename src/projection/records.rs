//! Output structures for a model run

use serde::{Deserialize, Serialize};

use crate::inputs::Inputs;

/// One month of the buy and rent scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub month: u32,

    // Renting
    pub rent_payment: f64,
    pub rent_cash_flow: f64,
    pub rent_discounted_cash_flow: f64,
    pub rent_cumulative_discounted_cash_flow: f64,
    pub rent_cumulative_npv: f64,

    // Mortgage
    pub mortgage_payment: f64,
    pub mortgage_interest: f64,
    pub mortgage_principal: f64,
    pub mortgage_balance: f64,

    // Recurring ownership costs
    pub property_tax: f64,
    pub maintenance: f64,
    pub home_insurance: f64,
    pub hoa: f64,

    // Balance sheet (stocks)
    pub home_value: f64,
    pub percentage_paid_off: f64,
    pub equity: f64,

    // Buying
    pub sale_proceeds: f64,
    pub buy_cash_flow: f64,
    pub buy_discounted_cash_flow: f64,
    pub buy_cumulative_discounted_cash_flow: f64,
    pub buy_cumulative_npv: f64,

    pub discount_factor: f64,
}

impl MonthRecord {
    /// Create a record with all flows zeroed
    pub fn new(month: u32, discount_factor: f64) -> Self {
        Self {
            month,
            rent_payment: 0.0,
            rent_cash_flow: 0.0,
            rent_discounted_cash_flow: 0.0,
            rent_cumulative_discounted_cash_flow: 0.0,
            rent_cumulative_npv: 0.0,
            mortgage_payment: 0.0,
            mortgage_interest: 0.0,
            mortgage_principal: 0.0,
            mortgage_balance: 0.0,
            property_tax: 0.0,
            maintenance: 0.0,
            home_insurance: 0.0,
            hoa: 0.0,
            home_value: 0.0,
            percentage_paid_off: 0.0,
            equity: 0.0,
            sale_proceeds: 0.0,
            buy_cash_flow: 0.0,
            buy_discounted_cash_flow: 0.0,
            buy_cumulative_discounted_cash_flow: 0.0,
            buy_cumulative_npv: 0.0,
            discount_factor,
        }
    }

    /// Recurring ownership costs other than the mortgage
    pub fn ownership_costs(&self) -> f64 {
        self.property_tax + self.maintenance + self.home_insurance + self.hoa
    }

    /// Discounted equity folded into the buy NPV for this month
    pub fn discounted_equity(&self) -> f64 {
        self.equity * self.discount_factor
    }

    /// Every numeric field is finite
    pub fn is_finite(&self) -> bool {
        [
            self.rent_payment,
            self.rent_cash_flow,
            self.rent_discounted_cash_flow,
            self.rent_cumulative_discounted_cash_flow,
            self.rent_cumulative_npv,
            self.mortgage_payment,
            self.mortgage_interest,
            self.mortgage_principal,
            self.mortgage_balance,
            self.property_tax,
            self.maintenance,
            self.home_insurance,
            self.hoa,
            self.home_value,
            self.percentage_paid_off,
            self.equity,
            self.sale_proceeds,
            self.buy_cash_flow,
            self.buy_discounted_cash_flow,
            self.buy_cumulative_discounted_cash_flow,
            self.buy_cumulative_npv,
            self.discount_factor,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Derived totals for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Months elapsed in the analysis (records hold months 0..=total_months)
    pub total_months: u32,

    /// Final buy cumulative NPV, including discounted terminal equity
    pub buy_total_npv: f64,

    /// Final rent cumulative NPV (no stock term)
    pub rent_total_npv: f64,

    /// `buy_total_npv - rent_total_npv`; positive means buying is better.
    ///
    /// Both totals are signed (outflows negative), so this is buy minus rent,
    /// not the rent minus buy form used when NPVs are stated as positive costs.
    pub npv_difference: f64,

    pub break_even_month: Option<u32>,
    pub break_even_years: Option<f64>,

    pub loan_amount: f64,
    pub level_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_buy_outflows: f64,
    pub total_rent_outflows: f64,
    pub sale_proceeds: f64,

    pub final_home_value: f64,
    pub final_mortgage_balance: f64,
    pub final_equity: f64,
}

impl Summary {
    /// True when buying ends the horizon at least as well off as renting
    pub fn buying_preferred(&self) -> bool {
        self.npv_difference >= 0.0
    }
}

/// Complete result of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResult {
    pub inputs: Inputs,
    pub monthly: Vec<MonthRecord>,
    pub summary: Summary,
}

impl ModelResult {
    pub fn month(&self, month: u32) -> Option<&MonthRecord> {
        self.monthly.get(month as usize)
    }

    pub fn last(&self) -> Option<&MonthRecord> {
        self.monthly.last()
    }
}

/// First month whose buy NPV is at least the rent NPV.
///
/// Ties count as break-even, so a month-0 tie reports month 0.
pub fn break_even_month(records: &[MonthRecord]) -> Option<u32> {
    records
        .iter()
        .find(|r| r.buy_cumulative_npv >= r.rent_cumulative_npv)
        .map(|r| r.month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: u32, buy: f64, rent: f64) -> MonthRecord {
        let mut r = MonthRecord::new(month, 1.0);
        r.buy_cumulative_npv = buy;
        r.rent_cumulative_npv = rent;
        r
    }

    #[test]
    fn test_break_even_first_crossing() {
        let records = vec![
            record(0, -100.0, 0.0),
            record(1, -50.0, -20.0),
            record(2, -30.0, -30.0),
            record(3, -10.0, -40.0),
        ];
        assert_eq!(break_even_month(&records), Some(2));
    }

    #[test]
    fn test_break_even_month_zero_tie() {
        let records = vec![record(0, 0.0, 0.0), record(1, -10.0, -5.0)];
        assert_eq!(break_even_month(&records), Some(0));
    }

    #[test]
    fn test_no_break_even() {
        let records = vec![record(0, -100.0, 0.0), record(1, -90.0, -5.0)];
        assert_eq!(break_even_month(&records), None);
    }

    #[test]
    fn test_new_record_is_finite() {
        assert!(MonthRecord::new(0, 1.0).is_finite());
        let mut r = MonthRecord::new(1, 1.0);
        r.equity = f64::NAN;
        assert!(!r.is_finite());
    }

    #[test]
    fn test_non_finite_flow_detected() {
        let mut r = MonthRecord::new(1, 1.0);
        r.buy_cash_flow = f64::INFINITY;
        assert!(!r.is_finite());

        let mut r = MonthRecord::new(1, 1.0);
        r.rent_cumulative_discounted_cash_flow = f64::NEG_INFINITY;
        assert!(!r.is_finite());

        let mut r = MonthRecord::new(1, 1.0);
        r.mortgage_interest = f64::NAN;
        assert!(!r.is_finite());
    }
}
