//! Command line front end: project a saved scenario and print period tables

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use rentobuy::market::{annual_returns_from_prices, Instrument, MarketHistory};
use rentobuy::projection::{sweep_investment_returns, DEFAULT_HORIZON_MONTHS};
use rentobuy::report::{
    canonical_periods, format_currency, write_monthly_csv, NumberStyle, PeriodReport,
};
use rentobuy::{
    NetWorthSnapshot, ProjectionConfig, ProjectionEngine, RawInputs, ScenarioConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "rentobuy",
    about = "Month-by-month buy-vs-rent and sell-vs-keep projections"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print net worth and amortization tables for one scenario
    Project {
        #[command(flatten)]
        source: ScenarioSource,
        #[command(flatten)]
        output: OutputOptions,
        #[arg(long, help = "Write every projected month to this CSV file")]
        csv: Option<PathBuf>,
        #[arg(long, help = "Market data cache to show historical returns from")]
        market_data: Option<PathBuf>,
    },
    /// Compare the net worth gap across several investment return rates
    Sweep {
        #[command(flatten)]
        source: ScenarioSource,
        #[command(flatten)]
        output: OutputOptions,
        #[arg(
            long,
            value_delimiter = ',',
            required = true,
            help = "Annual return rates in percent, e.g. 4,6,8"
        )]
        rates: Vec<f64>,
    },
    /// Show cached market returns, optionally importing a price history
    Market {
        #[arg(long, help = "Market data cache (JSON)")]
        data: PathBuf,
        #[arg(long, requires = "prices", help = "Ticker to import: VOO, QQQ, VTI or BND")]
        import: Option<String>,
        #[arg(long, requires = "import", help = "Daily price CSV with Date and Adj Close columns")]
        prices: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ScenarioSource {
    #[arg(long, help = "Saved form inputs (JSON of field -> text)")]
    inputs: Option<PathBuf>,
    #[arg(long, help = "Structured scenario (JSON)")]
    scenario: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OutputOptions {
    #[arg(long, help = "Show full dollar amounts instead of K/M")]
    full_numbers: bool,
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS, help = "Projection horizon in months")]
    horizon: u32,
}

impl OutputOptions {
    fn style(&self) -> NumberStyle {
        if self.full_numbers {
            NumberStyle::Full
        } else {
            NumberStyle::Compact
        }
    }

    fn engine(&self) -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig {
            horizon_months: self.horizon,
        })
    }
}

impl ScenarioSource {
    fn load(&self) -> Result<ScenarioConfig> {
        if let Some(path) = &self.inputs {
            let raw = RawInputs::load(path)
                .with_context(|| format!("Failed to read inputs from {}", path.display()))?;
            return raw
                .to_scenario()
                .with_context(|| format!("Invalid inputs in {}", path.display()));
        }
        if let Some(path) = &self.scenario {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("Invalid scenario in {}", path.display()));
        }
        anyhow::bail!("either --inputs or --scenario is required")
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project {
            source,
            output,
            csv,
            market_data,
        } => run_project(&source, &output, csv.as_deref(), market_data.as_deref()),
        Command::Sweep {
            source,
            output,
            rates,
        } => run_sweep(&source, &output, &rates),
        Command::Market {
            data,
            import,
            prices,
        } => run_market(&data, import.as_deref(), prices.as_deref()),
    }
}

fn run_project(
    source: &ScenarioSource,
    output: &OutputOptions,
    csv: Option<&Path>,
    market_data: Option<&Path>,
) -> Result<()> {
    let scenario = source.load()?;
    let projection = output.engine().project(&scenario)?;
    let report = PeriodReport::build(&projection);
    let style = output.style();
    let fmt = |amount: f64| format_currency(amount, style);

    println!("\n=== {} ({} months) ===", title(&scenario), report.horizon_months);
    if report.monthly_payment > 0.0 {
        println!("Monthly loan payment: {}", fmt(report.monthly_payment));
    }

    match &scenario {
        ScenarioConfig::BuyVsRent(_) => {
            println!(
                "\n{:>8} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10}",
                "Period", "Value", "Loan", "Buy NW", "Savings", "Market", "Rent NW", "RENT-BUY"
            );
            for row in &report.rows {
                let NetWorthSnapshot::BuyVsRent(s) = &row.net_worth else {
                    continue;
                };
                println!(
                    "{:>8} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10}",
                    row.period,
                    fmt(s.asset_value),
                    fmt(s.loan_balance),
                    fmt(s.buying_net_worth),
                    fmt(s.cumulative_savings),
                    fmt(s.market_return),
                    fmt(s.renting_net_worth),
                    fmt(s.rent_minus_buy),
                );
            }
        }
        ScenarioConfig::SellVsKeep(_) => {
            println!(
                "\n{:>8} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10}",
                "Period", "Sell NW", "Sale net", "Invested", "Real cost", "Keep NW", "SELL-KEEP"
            );
            for row in &report.rows {
                let NetWorthSnapshot::SellVsKeep(s) = &row.net_worth else {
                    continue;
                };
                println!(
                    "{:>8} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10}",
                    row.period,
                    fmt(s.sell_net_worth),
                    fmt(s.sale.net_proceeds),
                    fmt(s.keep_invested),
                    fmt(s.keep_real_cost),
                    fmt(s.keep_net_worth),
                    fmt(s.sell_minus_keep),
                );
            }
        }
    }

    if !report.amortization.is_empty() {
        println!(
            "\n{:>8} | {:>10} | {:>10} | {:>10}",
            "Period", "Principal", "Interest", "Balance"
        );
        for (label, row) in &report.amortization {
            println!(
                "{:>8} | {:>10} | {:>10} | {:>10}",
                label,
                fmt(row.principal_paid),
                fmt(row.interest_paid),
                fmt(row.balance),
            );
        }
    }

    if let Some(path) = csv {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_monthly_csv(&projection, file)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Monthly series written to {}", path.display());
        println!("\nMonthly series written to {}", path.display());
    }

    if let Some(path) = market_data {
        print_market_averages(path)?;
    }

    Ok(())
}

fn run_sweep(source: &ScenarioSource, output: &OutputOptions, rates: &[f64]) -> Result<()> {
    let scenario = source.load()?;
    let engine = output.engine();
    let style = output.style();

    let loan = scenario.loan();
    let loan_term = if loan.has_loan() { loan.term_months } else { 0 };
    let periods: Vec<_> = canonical_periods(loan_term, scenario.economics().extended_periods)
        .into_iter()
        .filter(|p| p.months <= output.horizon)
        .collect();
    let months: Vec<u32> = periods.iter().map(|p| p.months).collect();

    info!("Sweeping {} return rates over {} periods", rates.len(), months.len());
    let rows = sweep_investment_returns(&engine, &scenario, rates, &months)?;

    let gap_label = match &scenario {
        ScenarioConfig::BuyVsRent(_) => "RENT-BUY",
        ScenarioConfig::SellVsKeep(_) => "SELL-KEEP",
    };
    println!("\n=== {} by investment return ({}) ===", gap_label, title(&scenario));

    print!("{:>8}", "Period");
    for row in &rows {
        print!(" | {:>10}", format!("{:.1}%", row.investment_return_rate));
    }
    println!();

    for (i, period) in periods.iter().enumerate() {
        print!("{:>8}", period.label);
        for row in &rows {
            print!(" | {:>10}", format_currency(row.points[i].gap, style));
        }
        println!();
    }

    Ok(())
}

fn run_market(data: &Path, import: Option<&str>, prices: Option<&Path>) -> Result<()> {
    if let (Some(ticker), Some(prices)) = (import, prices) {
        let instrument = Instrument::from_ticker(ticker)?;
        let file = File::open(prices)
            .with_context(|| format!("Failed to open {}", prices.display()))?;
        let returns = annual_returns_from_prices(file)
            .with_context(|| format!("Failed to read prices from {}", prices.display()))?;

        let mut history = MarketHistory::load(data)
            .with_context(|| format!("Failed to load {}", data.display()))?;
        history.merge_returns(instrument, &returns, Local::now().date_naive());
        history
            .save(data)
            .with_context(|| format!("Failed to save {}", data.display()))?;
        info!(
            "Imported {} years of {} returns into {}",
            returns.len(),
            instrument.ticker(),
            data.display()
        );
    }

    let history = MarketHistory::load(data)
        .with_context(|| format!("Failed to load {}", data.display()))?;

    println!("\n{:>6} | {:>8} | {:>8} | {:>8} | {:>8}", "Year", "VOO", "QQQ", "VTI", "BND");
    let years: std::collections::BTreeSet<i32> = Instrument::ALL
        .iter()
        .flat_map(|i| history.returns(*i).keys().copied())
        .collect();
    for year in years {
        print!("{:>6}", year);
        for instrument in Instrument::ALL {
            match history.returns(instrument).get(&year) {
                Some(ret) => print!(" | {:>7.1}%", ret),
                None => print!(" | {:>8}", "-"),
            }
        }
        println!();
    }

    print_market_averages(data)
}

fn print_market_averages(path: &Path) -> Result<()> {
    let history = MarketHistory::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let today = Local::now().date_naive();
    if history.is_stale(today) {
        warn!("Market data in {} is out of date", path.display());
    }

    match history.averages(today.year()) {
        Some(avg) => {
            println!("\nAverage annual returns over the last {} complete years:", avg.years);
            println!("  VOO (S&P 500):        {:>6.1}%", avg.voo);
            println!("  QQQ (Nasdaq 100):     {:>6.1}%", avg.qqq);
            println!("  VTI (Total market):   {:>6.1}%", avg.vti);
            println!("  BND (Total bond):     {:>6.1}%", avg.bnd);
            println!("  60/40 VTI/BND:        {:>6.1}%", avg.mix_60_40);
        }
        None => println!("\nNo historical market returns available"),
    }
    Ok(())
}

fn title(scenario: &ScenarioConfig) -> &'static str {
    match scenario {
        ScenarioConfig::BuyVsRent(_) => "Buy vs Rent",
        ScenarioConfig::SellVsKeep(_) => "Sell vs Keep",
    }
}
