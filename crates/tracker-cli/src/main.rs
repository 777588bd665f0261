//! Stock watchlist CLI
//!
//! Tracks a watchlist against Yahoo Finance, refreshing in the background
//! and printing BUY/SELL alerts as thresholds are crossed.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session with two symbols, refreshed every 10 seconds
//! cargo run -p tracker-cli -- --symbols AAPL,MSFT --buy -2 --sell 5
//!
//! # One refresh, then print the table as JSON
//! cargo run -p tracker-cli -- --symbols AAPL --once --json
//! ```

mod commands;
mod render;
mod scheduler;

use clap::Parser;
use commands::{CliError, Command};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use stock_tracker::{StockTracker, Thresholds, YahooFinanceClient};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracker_utils::WatchSettings;

#[derive(Parser, Debug)]
#[command(name = "stock-watch")]
#[command(about = "Track a stock watchlist with dollar buy/sell thresholds", long_about = None)]
struct Args {
    /// Symbols to track, comma separated
    #[arg(short, long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Default buy threshold in dollars (usually negative)
    #[arg(long, allow_negative_numbers = true)]
    buy: Option<f64>,

    /// Default sell threshold in dollars (usually positive)
    #[arg(long, allow_negative_numbers = true)]
    sell: Option<f64>,

    /// Seconds between background refreshes
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// JSON settings file with tracker config and watchlist
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh once, print the watchlist and exit
    #[arg(long)]
    once: bool,

    /// Print the watchlist as JSON (with --once)
    #[arg(long, requires = "once")]
    json: bool,
}

fn load_settings(args: &Args) -> anyhow::Result<WatchSettings> {
    let mut settings = match &args.config {
        Some(path) => WatchSettings::from_file(path)?,
        None => WatchSettings::default(),
    }
    .with_env()?;

    settings.extend_symbols(args.symbols.iter().cloned());
    if let Some(buy) = args.buy {
        settings.thresholds.buy = buy;
    }
    if let Some(sell) = args.sell {
        settings.thresholds.sell = sell;
    }
    if let Some(secs) = args.interval {
        settings.tracker.refresh_interval = Duration::from_secs(secs);
    }
    settings.tracker.validate()?;

    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracker_utils::init_tracing();

    let args = Args::parse();
    let settings = load_settings(&args)?;

    let source = Arc::new(YahooFinanceClient::new(&settings.tracker)?);
    let tracker = Arc::new(StockTracker::with_config(source, settings.tracker.clone()));

    for (symbol, thresholds) in settings.entries() {
        match tracker.track(&symbol, thresholds).await {
            Ok(symbol) => info!("Added {}", symbol),
            Err(e) => warn!("Failed to add {}: {}", symbol, e),
        }
    }

    if args.once {
        return print_once(&tracker, args.json).await;
    }

    println!("{}\n", Command::help());
    println!("{}", render_watchlist(&tracker).await);

    let refresher = scheduler::spawn_periodic_refresh(
        Arc::clone(&tracker),
        settings.tracker.refresh_interval,
        settings.tracker.alert_min_move,
    );

    let result = run_repl(&tracker, settings.thresholds).await;
    refresher.abort();
    info!("Shutdown complete");
    result
}

async fn print_once(tracker: &StockTracker, json: bool) -> anyhow::Result<()> {
    if json {
        let snapshots = tracker.list_snapshots().await;
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        println!("{}", render_watchlist(tracker).await);
    }
    Ok(())
}

async fn run_repl(tracker: &StockTracker, defaults: Thresholds) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"watch> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!("\nGoodbye!");
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("Error: {e}\n");
                continue;
            }
        };

        if command == Command::Exit {
            println!("Goodbye!");
            break;
        }

        match execute(tracker, command, defaults).await {
            Ok(output) => println!("{output}\n"),
            Err(e) => eprintln!("Error: {e}\n"),
        }
    }

    Ok(())
}

async fn execute(
    tracker: &StockTracker,
    command: Command,
    defaults: Thresholds,
) -> Result<String, CliError> {
    match command {
        Command::Add { symbol, thresholds } => {
            let symbol = tracker
                .track(&symbol, thresholds.unwrap_or(defaults))
                .await?;
            Ok(format!(
                "Added {symbol} successfully\n{}",
                render_watchlist(tracker).await
            ))
        }
        Command::Remove { symbol } => {
            if tracker.remove(&symbol).await {
                Ok(format!("Removed {symbol}"))
            } else {
                Err(CliError::CommandError(format!("{symbol} is not being tracked")))
            }
        }
        Command::Clear => {
            tracker.clear_all().await;
            Ok("All stocks cleared".to_string())
        }
        Command::Refresh => {
            if tracker.is_empty().await {
                return Ok("No stocks to update".to_string());
            }
            let results = tracker
                .refresh_all_with_progress(|done, total| {
                    eprint!("\rUpdating... {done}/{total} stocks");
                })
                .await;
            eprintln!();

            let failed = results.values().filter(|ok| !**ok).count();
            let mut output = render_watchlist(tracker).await;
            if failed > 0 {
                output.push_str(&format!("\n{failed} symbol(s) failed to update"));
            }
            Ok(output)
        }
        Command::List => Ok(render_watchlist(tracker).await),
        Command::Show { symbol } => match tracker.get_snapshot(&symbol).await {
            Some(snapshot) if snapshot.history.len() > 1 => Ok(format!(
                "{} history (base {})\n{}",
                snapshot.symbol,
                render::format_price(snapshot.base_price),
                render::history_table(&snapshot)
            )),
            Some(_) => Ok(format!("Insufficient data for {symbol} yet")),
            None if tracker.get(&symbol).await.is_some() => {
                Ok(format!("No price data for {symbol} yet"))
            }
            None => Err(CliError::CommandError(format!("{symbol} is not being tracked"))),
        },
        Command::Alerts => {
            let alerts = tracker.check_alerts().await;
            if alerts.is_empty() {
                Ok("No alerts".to_string())
            } else {
                Ok(render::alerts_table(&alerts).to_string())
            }
        }
        Command::Help => Ok(Command::help().to_string()),
        Command::Exit => Ok(String::new()),
    }
}

async fn render_watchlist(tracker: &StockTracker) -> String {
    let snapshots = tracker.list_snapshots().await;
    if snapshots.is_empty() && tracker.is_empty().await {
        return "Ready - add stocks to begin tracking".to_string();
    }

    let pending: Vec<String> = tracker
        .symbols()
        .await
        .into_iter()
        .filter(|symbol| !snapshots.iter().any(|s| &s.symbol == symbol))
        .collect();

    format!(
        "{}\nLast updated: {}",
        render::watchlist_table(&snapshots, &pending),
        chrono::Local::now().format("%H:%M:%S")
    )
}
