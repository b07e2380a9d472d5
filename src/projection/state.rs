//! Running state carried from one month to the next

use crate::inputs::Inputs;

/// State at the end of a month, consumed by the following month
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current month (0 = purchase date)
    pub month: u32,

    /// Outstanding loan balance at the end of the month
    pub mortgage_balance: f64,

    /// Running sum of discounted buy cash flows
    pub buy_discounted_sum: f64,

    /// Running sum of discounted rent cash flows
    pub rent_discounted_sum: f64,

    /// Whether the home has been sold (sale mode only)
    pub sold: bool,
}

impl ProjectionState {
    /// State at the purchase date, before any month-0 cash flows
    pub fn from_inputs(inputs: &Inputs) -> Self {
        Self {
            month: 0,
            mortgage_balance: inputs.loan_amount().max(0.0),
            buy_discounted_sum: 0.0,
            rent_discounted_sum: 0.0,
            sold: false,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Whether this month still carries a mortgage payment
    pub fn mortgage_active(&self, term_months: u32) -> bool {
        !self.sold && self.month <= term_months && self.mortgage_balance > 0.0
    }

    /// Add this month's discounted flows to the running sums
    pub fn accumulate(&mut self, buy_discounted: f64, rent_discounted: f64) {
        self.buy_discounted_sum += buy_discounted;
        self.rent_discounted_sum += rent_discounted;
    }
}
