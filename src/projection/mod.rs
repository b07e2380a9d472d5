//! Monthly projection of the buy and rent scenarios

mod state;
mod engine;
mod records;
pub mod discount;
pub mod equity;
pub mod valuation;

pub use state::ProjectionState;
pub use engine::{run, ModelEngine};
pub use records::{break_even_month, ModelResult, MonthRecord, Summary};
pub use discount::DiscountCurve;
pub use valuation::ValuationProjector;
