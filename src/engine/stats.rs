//! Statistics engine: single-pass aggregation of a trade subset into the
//! full analytics snapshot.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use crate::models::{EquityPoint, StatisticsResult, Trade};
use crate::utils::numeric::parse_timestamp;

use super::reference_time;

/// Compute the analytics snapshot for a trade subset.
///
/// Trades are processed in ascending order of their reference time (close
/// time preferred, open time as fallback; trades with neither parseable
/// sort at the current time). The weekday and hour PnL buckets are keyed
/// off the open time instead — "when entered" rather than "when
/// realized" — while the sort and the equity curve follow the close time.
pub fn compute(trades: &[Trade], starting_capital: f64) -> StatisticsResult {
    let total_trades = trades.len();
    if total_trades == 0 {
        return empty_result(starting_capital);
    }

    // Resolve every sort key up front, against a single "now", so the
    // result is identical however often it is recomputed within a run.
    let now = Local::now().naive_local();
    let mut sorted: Vec<(&Trade, NaiveDateTime)> = trades
        .iter()
        .map(|t| (t, reference_time(t).unwrap_or(now)))
        .collect();
    sorted.sort_by_key(|(_, dt)| *dt);

    let mut net = 0.0f64;
    let mut gross_profit = 0.0f64;
    let mut gross_loss = 0.0f64;
    let mut wins = 0usize;
    let mut losses = 0usize;

    let mut best_trade: Option<&Trade> = None;
    let mut worst_trade: Option<&Trade> = None;

    let mut current_win_streak = 0usize;
    let mut current_loss_streak = 0usize;
    let mut longest_win_streak = 0usize;
    let mut longest_loss_streak = 0usize;

    let mut min_equity = starting_capital;
    let mut peak_equity = starting_capital;

    let mut equity_points = Vec::with_capacity(total_trades);
    let mut pnl_by_symbol: HashMap<String, f64> = HashMap::new();
    let mut pnl_by_weekday = [0.0f64; 7];
    let mut pnl_by_hour = [0.0f64; 24];
    let mut symbols: HashSet<&str> = HashSet::new();

    for &(trade, reference) in &sorted {
        let p = trade.profit;
        net += p;

        if p > 0.0 {
            wins += 1;
            gross_profit += p;
            current_win_streak += 1;
            current_loss_streak = 0;
            longest_win_streak = longest_win_streak.max(current_win_streak);
        } else if p < 0.0 {
            losses += 1;
            gross_loss += p;
            current_loss_streak += 1;
            current_win_streak = 0;
            longest_loss_streak = longest_loss_streak.max(current_loss_streak);
        } else {
            // A flat trade breaks both runs.
            current_win_streak = 0;
            current_loss_streak = 0;
        }

        // Ties keep the earliest extreme: only a strictly better profit
        // replaces the current best/worst.
        if best_trade.map_or(true, |b| p > b.profit) {
            best_trade = Some(trade);
        }
        if worst_trade.map_or(true, |w| p < w.profit) {
            worst_trade = Some(trade);
        }

        let equity = starting_capital + net;
        peak_equity = peak_equity.max(equity);
        min_equity = min_equity.min(equity);

        equity_points.push(EquityPoint {
            timestamp: reference.format("%Y-%m-%d %H:%M:%S").to_string(),
            equity,
        });

        *pnl_by_symbol.entry(trade.symbol.clone()).or_insert(0.0) += p;
        symbols.insert(trade.symbol.as_str());

        // Entry-time buckets, falling back to the reference time when the
        // open time does not parse.
        let entered = parse_timestamp(&trade.open_time).unwrap_or(reference);
        let weekday = entered.weekday().num_days_from_sunday() as usize;
        pnl_by_weekday[weekday] += p;
        pnl_by_hour[entered.hour() as usize] += p;
    }

    let avg_pnl = net / total_trades as f64;
    let avg_win = (wins > 0).then(|| gross_profit / wins as f64);
    let avg_loss = (losses > 0).then(|| gross_loss / losses as f64);
    let profit_factor = (gross_loss < 0.0).then(|| gross_profit / gross_loss.abs());
    let win_rate_pct = wins as f64 / total_trades as f64 * 100.0;

    let closed_equity = starting_capital + net;
    // Signed on purpose: negative means equity never fell below the
    // starting capital.
    let max_drawdown_abs = starting_capital - min_equity;
    let max_drawdown_pct = if starting_capital > 0.0 {
        max_drawdown_abs / starting_capital * 100.0
    } else {
        0.0
    };

    StatisticsResult {
        total_trades,
        net,
        wins,
        losses,
        win_rate_pct: Some(win_rate_pct),
        instruments: symbols.len(),
        gross_profit,
        gross_loss,
        profit_factor,
        avg_pnl: Some(avg_pnl),
        avg_win,
        avg_loss,
        best_trade: best_trade.cloned(),
        worst_trade: worst_trade.cloned(),
        starting_capital,
        closed_equity,
        max_drawdown_abs,
        max_drawdown_pct,
        longest_win_streak,
        longest_loss_streak,
        equity_points,
        pnl_by_symbol,
        pnl_by_weekday,
        pnl_by_hour,
    }
}

/// Zero-valued snapshot for an empty trade set. The nullable fields stay
/// None so "no trades" can never be mistaken for "break-even".
fn empty_result(starting_capital: f64) -> StatisticsResult {
    StatisticsResult {
        total_trades: 0,
        net: 0.0,
        wins: 0,
        losses: 0,
        win_rate_pct: None,
        instruments: 0,
        gross_profit: 0.0,
        gross_loss: 0.0,
        profit_factor: None,
        avg_pnl: None,
        avg_win: None,
        avg_loss: None,
        best_trade: None,
        worst_trade: None,
        starting_capital,
        closed_equity: starting_capital,
        max_drawdown_abs: 0.0,
        max_drawdown_pct: 0.0,
        longest_win_streak: 0,
        longest_loss_streak: 0,
        equity_points: Vec::new(),
        pnl_by_symbol: HashMap::new(),
        pnl_by_weekday: [0.0; 7],
        pnl_by_hour: [0.0; 24],
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;
    use crate::models::TradeDirection;

    fn make_trade(symbol: &str, open_time: &str, close_time: &str, profit: f64) -> Trade {
        Trade {
            ticket: String::new(),
            symbol: symbol.to_string(),
            direction: TradeDirection::Buy,
            volume: 1.0,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
            open_price: 0.0,
            close_price: 0.0,
            stop_loss: 0.0,
            take_profit: 0.0,
            commission: 0.0,
            swap: 0.0,
            profit,
        }
    }

    fn trade(profit: f64) -> Trade {
        make_trade("EURUSD", "2024.01.10 09:00:00", "2024.01.10 10:00:00", profit)
    }

    #[test]
    fn test_empty_trade_set() {
        let s = compute(&[], 5000.0);
        assert_eq!(s.total_trades, 0);
        assert_eq!(s.closed_equity, 5000.0);
        assert_eq!(s.max_drawdown_abs, 0.0);
        assert!(s.profit_factor.is_none());
        assert!(s.avg_pnl.is_none());
        assert!(s.avg_win.is_none());
        assert!(s.avg_loss.is_none());
        assert!(s.win_rate_pct.is_none());
        assert!(s.equity_points.is_empty());
    }

    #[test]
    fn test_worked_example() {
        let trades = vec![trade(100.0), trade(-50.0), trade(30.0)];
        let s = compute(&trades, 10000.0);
        assert_eq!(s.total_trades, 3);
        assert!((s.net - 80.0).abs() < 1e-9);
        assert_eq!(s.wins, 2);
        assert_eq!(s.losses, 1);
        assert!((s.gross_profit - 130.0).abs() < 1e-9);
        assert!((s.gross_loss - (-50.0)).abs() < 1e-9);
        assert!((s.profit_factor.unwrap() - 2.6).abs() < 1e-9);
        assert!((s.closed_equity - 10080.0).abs() < 1e-9);
        assert!((s.avg_pnl.unwrap() - 80.0 / 3.0).abs() < 1e-9);
        assert!((s.avg_win.unwrap() - 65.0).abs() < 1e-9);
        assert!((s.avg_loss.unwrap() - (-50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_net_equals_sum_of_profits() {
        let trades = vec![trade(12.5), trade(-3.25), trade(0.0), trade(7.75)];
        let s = compute(&trades, 1000.0);
        let sum: f64 = trades.iter().map(|t| t.profit).sum();
        assert!((s.net - sum).abs() < 1e-9);
    }

    #[test]
    fn test_profit_factor_none_without_losses() {
        let s = compute(&[trade(10.0), trade(20.0)], 1000.0);
        assert!(s.profit_factor.is_none());
        assert!(s.avg_loss.is_none());
        assert_eq!(s.avg_win, Some(15.0));
    }

    #[test]
    fn test_equity_curve_sorted_by_close_time() {
        let trades = vec![
            make_trade("EURUSD", "2024.01.12 09:00:00", "2024.01.12 10:00:00", 30.0),
            make_trade("EURUSD", "2024.01.10 09:00:00", "2024.01.10 10:00:00", 100.0),
            make_trade("EURUSD", "2024.01.11 09:00:00", "2024.01.11 10:00:00", -50.0),
        ];
        let s = compute(&trades, 10000.0);
        let timestamps: Vec<&str> =
            s.equity_points.iter().map(|p| p.timestamp.as_str()).collect();
        assert_eq!(
            timestamps,
            ["2024-01-10 10:00:00", "2024-01-11 10:00:00", "2024-01-12 10:00:00"]
        );
        let equities: Vec<f64> = s.equity_points.iter().map(|p| p.equity).collect();
        assert_eq!(equities, [10100.0, 10050.0, 10080.0]);
    }

    #[test]
    fn test_streaks_and_zero_profit_resets_both() {
        let trades = vec![
            trade(10.0),
            trade(10.0),
            trade(10.0),
            trade(0.0),
            trade(10.0),
            trade(-5.0),
            trade(-5.0),
        ];
        let s = compute(&trades, 1000.0);
        assert_eq!(s.longest_win_streak, 3);
        assert_eq!(s.longest_loss_streak, 2);
    }

    #[test]
    fn test_best_worst_tie_keeps_earliest() {
        let trades = vec![
            make_trade("FIRST", "2024.01.10 09:00:00", "2024.01.10 10:00:00", 50.0),
            make_trade("SECOND", "2024.01.11 09:00:00", "2024.01.11 10:00:00", 50.0),
            make_trade("THIRD", "2024.01.12 09:00:00", "2024.01.12 10:00:00", -50.0),
            make_trade("FOURTH", "2024.01.13 09:00:00", "2024.01.13 10:00:00", -50.0),
        ];
        let s = compute(&trades, 1000.0);
        assert_eq!(s.best_trade.unwrap().symbol, "FIRST");
        assert_eq!(s.worst_trade.unwrap().symbol, "THIRD");
    }

    #[test]
    fn test_drawdown_negative_when_equity_never_dips() {
        // Equity only climbs, so the minimum observed equity sits above
        // the starting capital and the drawdown goes negative. Asserted
        // rather than clamped.
        let s = compute(&[trade(100.0), trade(50.0)], 1000.0);
        assert!((s.max_drawdown_abs - (-100.0)).abs() < 1e-9);
        assert!((s.max_drawdown_pct - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_positive_after_dip() {
        let s = compute(&[trade(-200.0), trade(500.0)], 1000.0);
        // Minimum equity was 800 after the first trade.
        assert!((s.max_drawdown_abs - 200.0).abs() < 1e-9);
        assert!((s.max_drawdown_pct - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_pct_zero_for_non_positive_capital() {
        let s = compute(&[trade(-100.0)], 0.0);
        assert_eq!(s.max_drawdown_pct, 0.0);
        assert!((s.max_drawdown_abs - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekday_and_hour_buckets_use_open_time() {
        // Opened Wednesday 09:xx, closed Thursday 16:xx. The buckets must
        // follow the open time even though sorting follows the close.
        let t = make_trade("EURUSD", "2024.01.10 09:30:00", "2024.01.11 16:00:00", 42.0);
        assert_eq!(parse_timestamp(&t.open_time).unwrap().weekday().num_days_from_sunday(), 3);

        let s = compute(&[t], 1000.0);
        assert_eq!(s.pnl_by_weekday[3], 42.0);
        assert_eq!(s.pnl_by_weekday[4], 0.0);
        assert_eq!(s.pnl_by_hour[9], 42.0);
        assert_eq!(s.pnl_by_hour[16], 0.0);
    }

    #[test]
    fn test_pnl_by_symbol_and_instrument_count() {
        let trades = vec![
            make_trade("EURUSD", "2024.01.10 09:00:00", "2024.01.10 10:00:00", 10.0),
            make_trade("EURUSD", "2024.01.11 09:00:00", "2024.01.11 10:00:00", -4.0),
            make_trade("XAUUSD", "2024.01.12 09:00:00", "2024.01.12 10:00:00", 7.0),
        ];
        let s = compute(&trades, 1000.0);
        assert_eq!(s.instruments, 2);
        assert!((s.pnl_by_symbol["EURUSD"] - 6.0).abs() < 1e-9);
        assert!((s.pnl_by_symbol["XAUUSD"] - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let trades = vec![trade(10.0), trade(-5.0), trade(0.0)];
        let a = compute(&trades, 1000.0);
        let b = compute(&trades, 1000.0);
        assert_eq!(a.net, b.net);
        assert_eq!(a.longest_win_streak, b.longest_win_streak);
        assert_eq!(a.equity_points.len(), b.equity_points.len());
        for (pa, pb) in a.equity_points.iter().zip(b.equity_points.iter()) {
            assert_eq!(pa.timestamp, pb.timestamp);
            assert_eq!(pa.equity, pb.equity);
        }
    }
}
