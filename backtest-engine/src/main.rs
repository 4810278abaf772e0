use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;

use backtest_engine::{
    buy_and_hold_signal, generate_synthetic_closes, run_csv_backtest, run_vectorized_backtest,
    summarize, BacktestConfig, SummaryStats,
};

#[derive(Parser, Debug)]
#[command(name = "backtest-engine")]
#[command(version = "0.1.0")]
#[command(about = "Buy-and-hold performance statistics over daily close prices", long_about = None)]
struct Args {
    /// CSV/JSON price files to backtest. If none provided, uses synthetic data.
    files: Vec<PathBuf>,

    /// Header of the timestamp column
    #[arg(long, default_value = "datetime")]
    date_col: String,

    /// Header of the price column
    #[arg(long, default_value = "adj_close")]
    price_col: String,

    /// Transaction cost in basis points per unit of position change
    #[arg(long, default_value = "0.0")]
    cost_bps: f64,

    /// Number of days of synthetic data (used when no file is provided)
    #[arg(short, long, default_value = "252")]
    days: usize,

    /// Initial price for synthetic data
    #[arg(long, default_value = "100.0")]
    initial_price: f64,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text")]
    output: String,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, serde::Serialize)]
struct Report {
    source: String,
    stats: SummaryStats,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = BacktestConfig::default()
        .with_date_column(&args.date_col)
        .with_price_column(&args.price_col)
        .with_cost_bps(args.cost_bps);

    let reports: Vec<Report> = if args.files.is_empty() {
        eprintln!(
            "Generating {} days of synthetic data (initial price: ${:.2})...",
            args.days, args.initial_price
        );
        let prices = generate_synthetic_closes(args.days, args.initial_price);
        let signal = buy_and_hold_signal(&prices);
        let result = run_vectorized_backtest(&prices, &signal, config.cost_bps);
        vec![Report {
            source: "synthetic".to_string(),
            stats: summarize(&result),
        }]
    } else {
        eprintln!("Running {} backtest(s)...", args.files.len());
        // Independent pure computations, one per file
        args.files
            .par_iter()
            .map(|path| {
                let stats = run_csv_backtest(path, &config)?;
                Ok(Report {
                    source: path.display().to_string(),
                    stats,
                })
            })
            .collect::<Result<Vec<_>>>()?
    };

    match args.output.as_str() {
        "json" => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string(&reports)?
            };
            println!("{}", json);
        }
        "text" => {
            for report in &reports {
                print_text_report(report);
            }
        }
        _ => {
            eprintln!("Unknown output format: {}. Using text.", args.output);
            for report in &reports {
                print_text_report(report);
            }
        }
    }

    Ok(())
}

fn print_text_report(report: &Report) {
    let stats = &report.stats;
    println!();
    println!("================================================================");
    println!("  BUY-AND-HOLD BACKTEST - {}", report.source);
    println!("================================================================");
    println!();
    println!("  Observations:     {:>12}", stats.n_obs);
    println!("  Final Equity:     {:>12.4}", stats.final_equity);
    println!(
        "  Total Return:     {:>11.2}%",
        stats.total_return * 100.0
    );
    println!("  CAGR:             {:>11.2}%", stats.cagr * 100.0);
    println!();
    println!("----------------------------------------------------------------");
    println!("  RISK METRICS");
    println!("----------------------------------------------------------------");
    println!("  Volatility (Ann): {:>11.2}%", stats.vol * 100.0);
    println!("  Sharpe Ratio:     {:>12.3}", stats.sharpe);
    println!(
        "  Max Drawdown:     {:>11.2}%",
        stats.max_drawdown * 100.0
    );
    println!();
    println!("================================================================");
}
