//! Compare buy NPVs across mortgage terms
//!
//! Usage: cargo run --bin compare_terms -- [MORTGAGE_RATE] [DISCOUNT_RATE]
//!
//! A longer term wins whenever the mortgage rate is below the discount rate,
//! because repaying cheap debt early forgoes the better return elsewhere.

use anyhow::{Context, Result};
use rent_vs_buy::{Inputs, ScenarioRunner};

const TERMS: [u32; 4] = [10, 15, 20, 30];

fn parse_rate(arg: Option<String>, default: f64) -> Result<f64> {
    match arg {
        Some(raw) => raw.parse().with_context(|| format!("invalid rate: {raw}")),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mortgage_rate = parse_rate(args.next(), 0.04)?;
    let discount_rate = parse_rate(args.next(), 0.07)?;

    let runner = ScenarioRunner::new(Inputs {
        mortgage_rate,
        discount_rate,
        analysis_years: 30,
        ..Inputs::default()
    });

    println!(
        "Mortgage rate {:.2}%, discount rate {:.2}%, {}-year horizon\n",
        mortgage_rate * 100.0,
        discount_rate * 100.0,
        runner.inputs().analysis_years
    );
    println!("{:>5} {:>12} {:>14} {:>16}", "Term", "Payment", "Interest", "Buy total NPV");
    println!("{}", "-".repeat(50));

    let mut best: Option<(u32, f64)> = None;
    for (years, result) in TERMS.iter().zip(runner.compare_terms(&TERMS)) {
        let result = result.with_context(|| format!("{years}-year run failed"))?;
        let summary = &result.summary;
        println!(
            "{:>5} {:>12.2} {:>14.2} {:>16.2}",
            years, summary.level_payment, summary.total_interest, summary.buy_total_npv
        );
        if best.map_or(true, |(_, npv)| summary.buy_total_npv > npv) {
            best = Some((*years, summary.buy_total_npv));
        }
    }

    if let Some((years, npv)) = best {
        println!("\nBest term: {} years (buy NPV ${:.2})", years, npv);
    }
    Ok(())
}
