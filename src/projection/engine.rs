//! Monthly buy-versus-rent projection engine

use log::{debug, info, warn};

use super::discount::DiscountCurve;
use super::equity::{equity, percentage_paid_off};
use super::records::{break_even_month, ModelResult, MonthRecord, Summary};
use super::state::ProjectionState;
use super::valuation::ValuationProjector;
use crate::amortization::{self, AmortizationStep};
use crate::error::{ModelError, Result};
use crate::inputs::{Inputs, MonthlyRates};

/// Main projection engine
///
/// Built from validated inputs; `run` is a pure function of them and may be
/// called any number of times.
#[derive(Debug, Clone)]
pub struct ModelEngine {
    inputs: Inputs,
    rates: MonthlyRates,
    discount: DiscountCurve,
    valuation: ValuationProjector,
    level_payment: f64,
}

impl ModelEngine {
    /// Validate `inputs` and prepare the engine
    pub fn new(inputs: Inputs) -> Result<Self> {
        let rates = inputs.validate()?;

        let loan = inputs.loan_amount();
        let level_payment = if loan > 0.0 {
            amortization::payment_for(loan, rates.mortgage, inputs.mortgage_term_months())
        } else {
            0.0
        };

        debug!(
            "monthly rates: discount={:.8} mortgage={:.8} appreciation={:.8} rent_inflation={:.8}",
            rates.discount, rates.mortgage, rates.appreciation, rates.rent_inflation
        );
        debug!("loan {:.2}, level payment {:.2}", loan, level_payment);

        Ok(Self {
            discount: DiscountCurve::from_annual(inputs.discount_rate)?,
            valuation: ValuationProjector::new(
                inputs.home_price,
                rates.appreciation,
                inputs.monthly_rent,
                rates.rent_inflation,
            ),
            inputs,
            rates,
            level_payment,
        })
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn level_payment(&self) -> f64 {
        self.level_payment
    }

    /// Project every month of the analysis and summarize
    pub fn run(&self) -> Result<ModelResult> {
        let months = self.inputs.analysis_months();
        let mut state = ProjectionState::from_inputs(&self.inputs);
        let mut monthly = Vec::with_capacity(months as usize + 1);

        monthly.push(self.purchase_month(&mut state));
        for _month in 1..=months {
            state.advance_month();
            monthly.push(self.calculate_month(&mut state));
        }

        if let Some(bad) = monthly.iter().find(|r| !r.is_finite()) {
            return Err(ModelError::domain(
                "inputs",
                format!("month {} produced a non-finite value", bad.month),
            ));
        }

        let summary = self.summarize(&monthly);
        match summary.break_even_month {
            Some(month) => info!(
                "projected {} months, break-even at month {} ({:.2} years)",
                months,
                month,
                month as f64 / 12.0
            ),
            None => warn!("projected {} months, buying never breaks even", months),
        }

        Ok(ModelResult {
            inputs: self.inputs.clone(),
            monthly,
            summary,
        })
    }

    /// Month 0: one-time purchase outflows, no mortgage activity
    fn purchase_month(&self, state: &mut ProjectionState) -> MonthRecord {
        let mut row = MonthRecord::new(0, self.discount.discount_factor(0));

        row.mortgage_balance = state.mortgage_balance;
        row.home_value = self.valuation.home_value(0);
        row.percentage_paid_off =
            percentage_paid_off(self.inputs.loan_amount(), state.mortgage_balance);
        row.equity = equity(row.home_value, row.mortgage_balance);

        row.buy_cash_flow =
            -(self.inputs.down_payment() + self.inputs.closing_costs + self.inputs.loan_fees);

        self.discount_and_accumulate(state, &mut row);
        row
    }

    /// Months 1..=N
    fn calculate_month(&self, state: &mut ProjectionState) -> MonthRecord {
        let month = state.month;
        let mut row = MonthRecord::new(month, self.discount.discount_factor(month));

        let step = self.mortgage_step(state);
        row.mortgage_payment = step.payment;
        row.mortgage_interest = step.interest;
        row.mortgage_principal = step.principal;
        row.mortgage_balance = step.new_balance;
        state.mortgage_balance = step.new_balance;

        row.home_value = self.valuation.home_value(month);
        row.property_tax = row.home_value * self.inputs.property_tax_rate / 12.0;
        row.maintenance = row.home_value * self.inputs.maintenance_rate / 12.0;
        row.home_insurance = self.inputs.home_insurance_monthly;
        row.hoa = self.inputs.hoa_monthly;

        // Pure cash outflow; equity is a stock and stays out of the flow
        row.buy_cash_flow = -(row.mortgage_payment + row.ownership_costs());

        row.rent_payment = self.valuation.rent(month);
        row.rent_cash_flow = -(row.rent_payment
            + self.inputs.renters_insurance_monthly
            + self.inputs.other_rent_costs_monthly);

        row.percentage_paid_off =
            percentage_paid_off(self.inputs.loan_amount(), row.mortgage_balance);
        row.equity = equity(row.home_value, row.mortgage_balance);

        if let Some(sale) = self.inputs.sale.filter(|s| s.month == month) {
            row.sale_proceeds =
                row.home_value * (1.0 - sale.selling_cost_rate) - row.mortgage_balance;
            row.buy_cash_flow += row.sale_proceeds;

            // Loan retired from the proceeds; nothing left on the balance sheet
            row.mortgage_balance = 0.0;
            row.home_value = 0.0;
            row.equity = 0.0;
            row.percentage_paid_off = 1.0;
            state.mortgage_balance = 0.0;
            state.sold = true;
        }

        self.discount_and_accumulate(state, &mut row);
        row
    }

    fn mortgage_step(&self, state: &ProjectionState) -> AmortizationStep {
        let term = self.inputs.mortgage_term_months();
        if !state.mortgage_active(term) {
            return AmortizationStep {
                new_balance: state.mortgage_balance,
                ..AmortizationStep::default()
            };
        }

        if state.month == term {
            amortization::payoff(state.mortgage_balance, self.rates.mortgage)
        } else {
            amortization::step(state.mortgage_balance, self.level_payment, self.rates.mortgage)
        }
    }

    /// Discount this month's flows, add them to the running sums and fold the
    /// discounted equity into the buy NPV
    fn discount_and_accumulate(&self, state: &mut ProjectionState, row: &mut MonthRecord) {
        row.buy_discounted_cash_flow = row.buy_cash_flow * row.discount_factor;
        row.rent_discounted_cash_flow = row.rent_cash_flow * row.discount_factor;
        state.accumulate(row.buy_discounted_cash_flow, row.rent_discounted_cash_flow);

        row.buy_cumulative_discounted_cash_flow = state.buy_discounted_sum;
        row.rent_cumulative_discounted_cash_flow = state.rent_discounted_sum;

        row.buy_cumulative_npv = state.buy_discounted_sum + row.discounted_equity();
        row.rent_cumulative_npv = state.rent_discounted_sum;
    }

    fn summarize(&self, monthly: &[MonthRecord]) -> Summary {
        let total_interest: f64 = monthly.iter().map(|r| r.mortgage_interest).sum();
        let total_principal: f64 = monthly.iter().map(|r| r.mortgage_principal).sum();
        let sale_proceeds: f64 = monthly.iter().map(|r| r.sale_proceeds).sum();
        let total_buy_cf: f64 = monthly.iter().map(|r| r.buy_cash_flow).sum();
        let total_rent_cf: f64 = monthly.iter().map(|r| r.rent_cash_flow).sum();

        let (buy_total_npv, rent_total_npv, final_home_value, final_mortgage_balance, final_equity) =
            monthly
                .last()
                .map(|r| {
                    (
                        r.buy_cumulative_npv,
                        r.rent_cumulative_npv,
                        r.home_value,
                        r.mortgage_balance,
                        r.equity,
                    )
                })
                .unwrap_or_default();

        let break_even = break_even_month(monthly);

        Summary {
            total_months: self.inputs.analysis_months(),
            buy_total_npv,
            rent_total_npv,
            npv_difference: buy_total_npv - rent_total_npv,
            break_even_month: break_even,
            break_even_years: break_even.map(|m| m as f64 / 12.0),
            loan_amount: self.inputs.loan_amount(),
            level_payment: self.level_payment,
            total_interest,
            total_principal,
            total_buy_outflows: -(total_buy_cf - sale_proceeds),
            total_rent_outflows: -total_rent_cf,
            sale_proceeds,
            final_home_value,
            final_mortgage_balance,
            final_equity,
        }
    }
}

/// Run the model for one set of inputs
pub fn run(inputs: Inputs) -> Result<ModelResult> {
    ModelEngine::new(inputs)?.run()
}
