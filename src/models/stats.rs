use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// A point on the equity curve. One point per closed trade, in
/// chronological order, starting from the initial capital.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: String,
    pub equity: f64,
}

/// Full analytics snapshot over a (possibly filtered) trade set.
///
/// Fully derived and recomputed on demand. `Option<f64>` fields are None
/// when there is no data to derive them from ("no trades" must never read
/// as "break-even"), never 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub total_trades: usize,
    pub net: f64,
    pub wins: usize,
    pub losses: usize,
    /// Wins as a percentage of total trades. None when there are no trades.
    pub win_rate_pct: Option<f64>,
    /// Number of distinct symbols in the trade set.
    pub instruments: usize,

    /// Sum of strictly positive profits.
    pub gross_profit: f64,
    /// Sum of strictly negative profits, kept negative.
    pub gross_loss: f64,
    /// gross_profit / |gross_loss|. None when there is no gross loss.
    pub profit_factor: Option<f64>,
    pub avg_pnl: Option<f64>,
    pub avg_win: Option<f64>,
    pub avg_loss: Option<f64>,

    /// Earliest trade reaching the highest profit (ties favor the first).
    pub best_trade: Option<Trade>,
    /// Earliest trade reaching the lowest profit (ties favor the first).
    pub worst_trade: Option<Trade>,

    pub starting_capital: f64,
    pub closed_equity: f64,
    /// starting_capital - lowest equity observed. Negative when equity
    /// never dipped below starting capital; deliberately not floored at 0.
    pub max_drawdown_abs: f64,
    pub max_drawdown_pct: f64,

    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,

    pub equity_points: Vec<EquityPoint>,
    pub pnl_by_symbol: HashMap<String, f64>,
    /// Indexed by weekday of the open time, 0 = Sunday.
    pub pnl_by_weekday: [f64; 7],
    /// Indexed by hour of the open time, 0-23.
    pub pnl_by_hour: [f64; 24],
}
