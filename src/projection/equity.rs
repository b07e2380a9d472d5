//! Owner's equity in the property
//!
//! Equity is a balance-sheet stock: current home value less the outstanding
//! loan. It is recomputed from scratch every month and never accumulated.
//! The owner holds the whole asset from month 0, so appreciation is not
//! scaled by how much of the loan has been repaid.

/// Net position in the property
pub fn equity(home_value: f64, loan_balance: f64) -> f64 {
    home_value - loan_balance
}

/// Fraction of the original loan repaid, in [0, 1].
///
/// A purchase without a loan counts as fully paid off.
pub fn percentage_paid_off(original_loan: f64, loan_balance: f64) -> f64 {
    if original_loan <= 0.0 {
        return 1.0;
    }
    (1.0 - loan_balance / original_loan).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equity_is_value_minus_balance() {
        assert_eq!(equity(500_000.0, 400_000.0), 100_000.0);
        // Underwater
        assert_eq!(equity(350_000.0, 400_000.0), -50_000.0);
    }

    #[test]
    fn test_appreciation_flows_fully_to_equity() {
        // 10% appreciation with nothing repaid still adds the full gain
        let before = equity(500_000.0, 400_000.0);
        let after = equity(550_000.0, 400_000.0);
        assert_eq!(after - before, 50_000.0);
    }

    #[test]
    fn test_percentage_paid_off() {
        assert_eq!(percentage_paid_off(400_000.0, 400_000.0), 0.0);
        assert_eq!(percentage_paid_off(400_000.0, 100_000.0), 0.75);
        assert_eq!(percentage_paid_off(400_000.0, 0.0), 1.0);
        assert_eq!(percentage_paid_off(0.0, 0.0), 1.0);
    }
}
