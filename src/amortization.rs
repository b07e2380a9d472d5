//! Level-payment loan amortization

use serde::{Deserialize, Serialize};

/// Interest/principal split for one monthly payment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AmortizationStep {
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub new_balance: f64,
}

/// Level monthly payment for a loan.
///
/// Standard annuity formula `P·r·(1+r)^n / ((1+r)^n - 1)`; a zero rate
/// degenerates to straight-line repayment. Callers must pass `num_payments > 0`.
pub fn payment_for(principal: f64, monthly_rate: f64, num_payments: u32) -> f64 {
    debug_assert!(num_payments > 0, "payment_for requires a positive term");
    let n = num_payments as f64;

    if monthly_rate.abs() < 1e-15 {
        return principal / n;
    }

    let growth = (1.0 + monthly_rate).powi(num_payments as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Apply one level payment to `balance`.
///
/// Principal is clamped to the outstanding balance so the loan never goes
/// negative; a paid-off loan yields an all-zero step.
pub fn step(balance: f64, payment: f64, monthly_rate: f64) -> AmortizationStep {
    if balance <= 0.0 {
        return AmortizationStep::default();
    }

    let interest = balance * monthly_rate;
    let principal = (payment - interest).min(balance);

    AmortizationStep {
        payment: interest + principal,
        interest,
        principal,
        new_balance: (balance - principal).max(0.0),
    }
}

/// Final payment: interest plus exactly the remaining balance
pub fn payoff(balance: f64, monthly_rate: f64) -> AmortizationStep {
    if balance <= 0.0 {
        return AmortizationStep::default();
    }

    let interest = balance * monthly_rate;
    AmortizationStep {
        payment: interest + balance,
        interest,
        principal: balance,
        new_balance: 0.0,
    }
}

/// Full amortization schedule for a standalone loan
pub fn schedule(principal: f64, monthly_rate: f64, num_payments: u32) -> Vec<AmortizationStep> {
    if num_payments == 0 || principal <= 0.0 {
        return Vec::new();
    }

    let payment = payment_for(principal, monthly_rate, num_payments);
    let mut balance = principal;
    let mut rows = Vec::with_capacity(num_payments as usize);

    for month in 1..=num_payments {
        let row = if month == num_payments {
            payoff(balance, monthly_rate)
        } else {
            step(balance, payment, monthly_rate)
        };
        balance = row.new_balance;
        rows.push(row);
    }

    rows
}
