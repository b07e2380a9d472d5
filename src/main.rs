//! Rent vs Buy CLI
//!
//! Command-line interface for running the buy/rent projection

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use rent_vs_buy::amortization;
use rent_vs_buy::inputs::{load_inputs, DEFAULT_INPUTS_PATH};
use rent_vs_buy::{Inputs, ModelResult, MonthRecord, RateConvention, SaleAssumption};

#[derive(Debug, Parser)]
#[command(name = "rent-vs-buy", version, about = "Compare buying a home against renting on an NPV basis")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the monthly projection
    Run(RunArgs),
    /// Print the amortization schedule of the mortgage alone
    Schedule(ScheduleArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Write monthly records to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the full result to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of months to print
    #[arg(long, default_value_t = 24)]
    show: usize,
}

#[derive(Debug, Args)]
struct ScheduleArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Print every month instead of one row per year
    #[arg(long)]
    monthly: bool,
}

/// Input file plus per-field overrides
#[derive(Debug, Args)]
struct InputArgs {
    /// JSON or CSV inputs file
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Load the inputs file from the default location
    #[arg(long, conflicts_with = "inputs")]
    use_default_file: bool,

    #[arg(long)]
    analysis_years: Option<u32>,
    #[arg(long)]
    discount_rate: Option<f64>,
    #[arg(long)]
    home_price: Option<f64>,
    #[arg(long)]
    down_payment_fraction: Option<f64>,
    #[arg(long)]
    mortgage_rate: Option<f64>,
    /// Quote the mortgage rate as an effective annual rate instead of an APR
    #[arg(long)]
    effective_mortgage_rate: bool,
    #[arg(long)]
    mortgage_term_years: Option<u32>,
    #[arg(long)]
    hoa_monthly: Option<f64>,
    #[arg(long)]
    property_tax_rate: Option<f64>,
    #[arg(long)]
    home_insurance_monthly: Option<f64>,
    #[arg(long)]
    maintenance_rate: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    home_appreciation_rate: Option<f64>,
    #[arg(long)]
    closing_costs: Option<f64>,
    #[arg(long)]
    loan_fees: Option<f64>,
    #[arg(long)]
    monthly_rent: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    rent_inflation_rate: Option<f64>,
    #[arg(long)]
    renters_insurance_monthly: Option<f64>,
    #[arg(long)]
    other_rent_costs_monthly: Option<f64>,
    /// Sell the home in this month
    #[arg(long)]
    sale_month: Option<u32>,
    /// Selling costs as a fraction of the sale price
    #[arg(long)]
    selling_cost_rate: Option<f64>,
}

impl InputArgs {
    fn resolve(&self) -> Result<Inputs> {
        let file = match (&self.inputs, self.use_default_file) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(PathBuf::from(DEFAULT_INPUTS_PATH)),
            (None, false) => None,
        };

        let mut inputs = match file {
            Some(path) => load_inputs(&path)
                .with_context(|| format!("failed to load inputs from {}", path.display()))?,
            None => Inputs::default(),
        };

        set(&mut inputs.analysis_years, self.analysis_years);
        set(&mut inputs.discount_rate, self.discount_rate);
        set(&mut inputs.home_price, self.home_price);
        set(&mut inputs.down_payment_fraction, self.down_payment_fraction);
        set(&mut inputs.mortgage_rate, self.mortgage_rate);
        set(&mut inputs.mortgage_term_years, self.mortgage_term_years);
        set(&mut inputs.hoa_monthly, self.hoa_monthly);
        set(&mut inputs.property_tax_rate, self.property_tax_rate);
        set(&mut inputs.home_insurance_monthly, self.home_insurance_monthly);
        set(&mut inputs.maintenance_rate, self.maintenance_rate);
        set(&mut inputs.home_appreciation_rate, self.home_appreciation_rate);
        set(&mut inputs.closing_costs, self.closing_costs);
        set(&mut inputs.loan_fees, self.loan_fees);
        set(&mut inputs.monthly_rent, self.monthly_rent);
        set(&mut inputs.rent_inflation_rate, self.rent_inflation_rate);
        set(&mut inputs.renters_insurance_monthly, self.renters_insurance_monthly);
        set(&mut inputs.other_rent_costs_monthly, self.other_rent_costs_monthly);

        if self.effective_mortgage_rate {
            inputs.mortgage_rate_convention = RateConvention::Effective;
        }
        if let Some(month) = self.sale_month {
            inputs.sale = Some(SaleAssumption {
                month,
                selling_cost_rate: self.selling_cost_rate.unwrap_or(0.0),
            });
        }

        Ok(inputs)
    }
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Command::Run(args) => run_projection(&args),
        Command::Schedule(args) => print_schedule(&args),
    }
}

fn run_projection(args: &RunArgs) -> Result<()> {
    let inputs = args.inputs.resolve()?;
    let result = rent_vs_buy::run(inputs).context("model run failed")?;

    print_months(&result.monthly, args.show);
    print_summary(&result);

    if let Some(path) = &args.csv {
        write_csv(path, &result.monthly)?;
        println!("\nMonthly records written to: {}", path.display());
    }
    if let Some(path) = &args.json {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result).context("unable to write JSON result")?;
        println!("Full result written to: {}", path.display());
    }

    Ok(())
}

fn print_months(monthly: &[MonthRecord], show: usize) {
    println!(
        "{:>5} {:>12} {:>12} {:>10} {:>14} {:>14} {:>14} {:>14}",
        "Month", "Mortgage", "Interest", "Rent", "Balance", "Equity", "Buy NPV", "Rent NPV"
    );
    println!("{}", "-".repeat(104));

    for row in monthly.iter().take(show) {
        println!(
            "{:>5} {:>12.2} {:>12.2} {:>10.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            row.month,
            row.mortgage_payment,
            row.mortgage_interest,
            row.rent_payment,
            row.mortgage_balance,
            row.equity,
            row.buy_cumulative_npv,
            row.rent_cumulative_npv,
        );
    }

    if monthly.len() > show {
        println!("... ({} more months)", monthly.len() - show);
    }
}

fn print_summary(result: &ModelResult) {
    let summary = &result.summary;
    println!("\nSummary:");
    println!("  Months analysed:   {}", summary.total_months);
    println!("  Loan amount:       ${:.2}", summary.loan_amount);
    println!("  Level payment:     ${:.2}", summary.level_payment);
    println!("  Total interest:    ${:.2}", summary.total_interest);
    println!("  Buy outflows:      ${:.2}", summary.total_buy_outflows);
    println!("  Rent outflows:     ${:.2}", summary.total_rent_outflows);
    if summary.sale_proceeds != 0.0 {
        println!("  Sale proceeds:     ${:.2}", summary.sale_proceeds);
    }
    println!("  Final equity:      ${:.2}", summary.final_equity);
    println!("  Buy total NPV:     ${:.2}", summary.buy_total_npv);
    println!("  Rent total NPV:    ${:.2}", summary.rent_total_npv);
    println!("  Difference:        ${:.2}", summary.npv_difference);

    match (summary.break_even_month, summary.break_even_years) {
        (Some(month), Some(years)) => {
            println!("  Break-even:        month {} ({:.2} years)", month, years)
        }
        _ => println!("  Break-even:        none within the horizon"),
    }

    let verdict = if summary.buying_preferred() { "Buying" } else { "Renting" };
    println!("\n{} comes out ahead over the horizon.", verdict);
}

fn write_csv(path: &Path, monthly: &[MonthRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    for row in monthly {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_schedule(args: &ScheduleArgs) -> Result<()> {
    let inputs = args.inputs.resolve()?;
    let rates = inputs.validate().context("invalid inputs")?;

    let rows = amortization::schedule(
        inputs.loan_amount(),
        rates.mortgage,
        inputs.mortgage_term_months(),
    );
    if rows.is_empty() {
        println!("No mortgage: the purchase is paid in cash.");
        return Ok(());
    }

    println!(
        "Loan ${:.2} over {} months at {:.4}% per month",
        inputs.loan_amount(),
        rows.len(),
        rates.mortgage * 100.0
    );
    println!("{:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "Payment", "Interest", "Principal", "Balance");
    println!("{}", "-".repeat(59));

    for (i, row) in rows.iter().enumerate() {
        let month = i + 1;
        if args.monthly || month % 12 == 0 || month == rows.len() {
            println!(
                "{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                month, row.payment, row.interest, row.principal, row.new_balance
            );
        }
    }

    let total_interest: f64 = rows.iter().map(|r| r.interest).sum();
    println!("\nTotal interest: ${:.2}", total_interest);
    Ok(())
}
