use std::path::Path;

use crate::errors::AppError;
use crate::models::{StatisticsResult, Trade};

/// Write the trade list to a CSV file.
pub fn write_trades_csv(trades: &[Trade], path: &Path) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::FileWrite(format!("Cannot create CSV: {}", e)))?;

    // Header
    wtr.write_record([
        "Ticket",
        "Symbol",
        "Direction",
        "Volume",
        "Open Time",
        "Close Time",
        "Open Price",
        "Close Price",
        "S/L",
        "T/P",
        "Commission",
        "Swap",
        "Profit",
    ])
    .map_err(|e| AppError::FileWrite(e.to_string()))?;

    for t in trades {
        wtr.write_record([
            &t.ticket,
            &t.symbol,
            &t.direction.as_str().to_string(),
            &format!("{:.2}", t.volume),
            &t.open_time,
            &t.close_time,
            &format!("{:.5}", t.open_price),
            &format!("{:.5}", t.close_price),
            &format!("{:.5}", t.stop_loss),
            &format!("{:.5}", t.take_profit),
            &format!("{:.2}", t.commission),
            &format!("{:.2}", t.swap),
            &format!("{:.2}", t.profit),
        ])
        .map_err(|e| AppError::FileWrite(e.to_string()))?;
    }

    wtr.flush().map_err(|e| AppError::FileWrite(e.to_string()))?;
    Ok(())
}

/// Write the statistics snapshot as a key-value CSV report.
pub fn write_stats_csv(stats: &StatisticsResult, path: &Path) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::FileWrite(format!("Cannot create CSV: {}", e)))?;

    wtr.write_record(["Metric", "Value"])
        .map_err(|e| AppError::FileWrite(e.to_string()))?;

    let rows: Vec<(&str, String)> = vec![
        ("Total Trades", stats.total_trades.to_string()),
        ("Net PnL", format!("{:.2}", stats.net)),
        ("Wins", stats.wins.to_string()),
        ("Losses", stats.losses.to_string()),
        ("Win Rate %", fmt_opt(stats.win_rate_pct)),
        ("Instruments", stats.instruments.to_string()),
        ("Gross Profit", format!("{:.2}", stats.gross_profit)),
        ("Gross Loss", format!("{:.2}", stats.gross_loss)),
        ("Profit Factor", fmt_opt(stats.profit_factor)),
        ("Avg PnL", fmt_opt(stats.avg_pnl)),
        ("Avg Win", fmt_opt(stats.avg_win)),
        ("Avg Loss", fmt_opt(stats.avg_loss)),
        ("Starting Capital", format!("{:.2}", stats.starting_capital)),
        ("Closed Equity", format!("{:.2}", stats.closed_equity)),
        ("Max Drawdown", format!("{:.2}", stats.max_drawdown_abs)),
        ("Max Drawdown %", format!("{:.2}", stats.max_drawdown_pct)),
        ("Longest Win Streak", stats.longest_win_streak.to_string()),
        ("Longest Loss Streak", stats.longest_loss_streak.to_string()),
    ];

    for (name, value) in rows {
        wtr.write_record([name, value.as_str()])
            .map_err(|e| AppError::FileWrite(e.to_string()))?;
    }

    wtr.flush().map_err(|e| AppError::FileWrite(e.to_string()))?;
    Ok(())
}

/// "–" for absent values, matching the on-screen rendering convention.
fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "–".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::compute;
    use crate::models::TradeDirection;

    fn sample_trade() -> Trade {
        Trade {
            ticket: "1001".to_string(),
            symbol: "EURUSD".to_string(),
            direction: TradeDirection::Buy,
            volume: 0.5,
            open_time: "2024.01.10 09:00:00".to_string(),
            close_time: "2024.01.10 15:30:00".to_string(),
            open_price: 1.085,
            close_price: 1.09,
            stop_loss: 0.0,
            take_profit: 0.0,
            commission: -2.5,
            swap: 0.0,
            profit: 125.0,
        }
    }

    #[test]
    fn test_write_trades_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        write_trades_csv(&[sample_trade()], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("Ticket,Symbol,Direction"));
        let data = lines.next().unwrap();
        assert!(data.starts_with("1001,EURUSD,buy,0.50,"));
        assert!(data.contains("2024.01.10 09:00:00"));
        assert!(data.ends_with("125.00"));
    }

    #[test]
    fn test_write_stats_csv_renders_absent_values_as_dash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let stats = compute(&[], 5000.0);
        write_stats_csv(&stats, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Profit Factor,–"));
        assert!(content.contains("Closed Equity,5000.00"));
    }
}
