use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use trade_analytics::data::storage;
use trade_analytics::engine::{filter, stats};
use trade_analytics::errors::AppError;
use trade_analytics::import::{import_statement, read_statement_file, AccountSetup};
use trade_analytics::models::{
    Currency, DirectionFilter, FilterCriteria, ResultFilter, SymbolFilter,
};
use trade_analytics::utils::export;

#[derive(Parser)]
#[command(name = "trade-analytics", about = "Broker statement import and performance analytics")]
struct Cli {
    /// Path to the analytics database.
    #[arg(long, default_value = "trade-analytics.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a broker statement export, replacing the stored account.
    Import {
        /// Statement file (HTML export from MT4/FTMO).
        file: PathBuf,
        #[arg(long, default_value = "")]
        account_name: String,
        #[arg(long, default_value = "MT4")]
        account_type: String,
        /// Starting capital; defaults to 10 000 when omitted or unparsable.
        #[arg(long, default_value = "")]
        capital: String,
        /// Display currency: EUR or USD.
        #[arg(long, default_value = "EUR")]
        currency: String,
    },
    /// Show the analytics snapshot over the stored (optionally filtered) trades.
    Stats {
        /// Inclusive lower date bound (YYYY-MM-DD).
        #[arg(long)]
        from: Option<chrono::NaiveDate>,
        /// Inclusive upper date bound (YYYY-MM-DD).
        #[arg(long)]
        to: Option<chrono::NaiveDate>,
        /// Exact symbol to keep.
        #[arg(long)]
        symbol: Option<String>,
        /// long or short.
        #[arg(long)]
        direction: Option<String>,
        /// win or loss.
        #[arg(long)]
        result: Option<String>,
    },
    /// Export the stored trades and statistics to CSV files.
    Export {
        /// Output directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Clear the stored trades and account metadata.
    Reset,
}

fn main() -> anyhow::Result<()> {
    trade_analytics::init_tracing();

    let cli = Cli::parse();
    let mut conn = storage::open_database(&cli.db.to_string_lossy())
        .context("Failed to open analytics database")?;

    match cli.command {
        Commands::Import { file, account_name, account_type, capital, currency } => {
            let raw = read_statement_file(&file)?;
            let setup = AccountSetup {
                account_name,
                account_type,
                starting_capital: capital,
                currency: Currency::from_code(&currency),
            };
            let summary = import_statement(&mut conn, &raw, setup)?;
            println!(
                "Imported {} trades ({}) for account '{}'",
                summary.trades,
                summary.format.as_str(),
                summary.account_name
            );
        }
        Commands::Stats { from, to, symbol, direction, result } => {
            let meta = storage::load_meta(&conn)?.ok_or(AppError::NoAccountData)?;
            let trades = storage::load_trades(&conn)?;

            let criteria = FilterCriteria {
                from_date: from,
                to_date: to,
                symbol: symbol.map(SymbolFilter::Exact).unwrap_or_default(),
                direction: parse_direction(direction.as_deref())?,
                result: parse_result(result.as_deref())?,
            };
            let filtered = filter::apply(&trades, &criteria);
            let snapshot = stats::compute(&filtered, meta.starting_capital);
            print_snapshot(&meta, &snapshot);
        }
        Commands::Export { out } => {
            let meta = storage::load_meta(&conn)?.ok_or(AppError::NoAccountData)?;
            let trades = storage::load_trades(&conn)?;
            let snapshot = stats::compute(&trades, meta.starting_capital);

            let trades_path = out.join("trades.csv");
            let stats_path = out.join("stats.csv");
            export::write_trades_csv(&trades, &trades_path)?;
            export::write_stats_csv(&snapshot, &stats_path)?;
            info!("Exported {} trades", trades.len());
            println!("Wrote {} and {}", trades_path.display(), stats_path.display());
        }
        Commands::Reset => {
            storage::reset(&mut conn)?;
            println!("Account data cleared");
        }
    }

    Ok(())
}

fn parse_direction(value: Option<&str>) -> anyhow::Result<DirectionFilter> {
    match value.map(str::to_lowercase).as_deref() {
        None | Some("all") => Ok(DirectionFilter::All),
        Some("long") => Ok(DirectionFilter::Long),
        Some("short") => Ok(DirectionFilter::Short),
        Some(other) => anyhow::bail!("Unknown direction filter: {}", other),
    }
}

fn parse_result(value: Option<&str>) -> anyhow::Result<ResultFilter> {
    match value.map(str::to_lowercase).as_deref() {
        None | Some("all") => Ok(ResultFilter::All),
        Some("win") => Ok(ResultFilter::Win),
        Some("loss") => Ok(ResultFilter::Loss),
        Some(other) => anyhow::bail!("Unknown result filter: {}", other),
    }
}

fn print_snapshot(
    meta: &trade_analytics::models::AccountMeta,
    s: &trade_analytics::models::StatisticsResult,
) {
    let cur = meta.currency.symbol();
    println!("Account: {} ({})", meta.account_name, meta.account_type);
    println!("Trades:            {}", s.total_trades);
    println!("Net PnL:           {:.2} {}", s.net, cur);
    println!("Win rate:          {}", fmt_pct(s.win_rate_pct));
    println!("Wins / losses:     {} / {}", s.wins, s.losses);
    println!("Gross profit:      {:.2} {}", s.gross_profit, cur);
    println!("Gross loss:        {:.2} {}", s.gross_loss, cur);
    println!("Profit factor:     {}", fmt_opt(s.profit_factor));
    println!("Avg PnL:           {}", fmt_opt(s.avg_pnl));
    println!("Avg win / loss:    {} / {}", fmt_opt(s.avg_win), fmt_opt(s.avg_loss));
    println!("Starting capital:  {:.2} {}", s.starting_capital, cur);
    println!("Closed equity:     {:.2} {}", s.closed_equity, cur);
    println!("Max drawdown:      {:.2} {} ({:.2} %)", s.max_drawdown_abs, cur, s.max_drawdown_pct);
    println!("Longest streaks:   {}W / {}L", s.longest_win_streak, s.longest_loss_streak);
    if let Some(best) = &s.best_trade {
        println!("Best trade:        {} {:.2} {}", best.symbol, best.profit, cur);
    }
    if let Some(worst) = &s.worst_trade {
        println!("Worst trade:       {} {:.2} {}", worst.symbol, worst.profit, cur);
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "–".to_string(),
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1} %", v),
        None => "–".to_string(),
    }
}
