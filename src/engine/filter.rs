//! Filter engine: pure predicate over the full trade set.

use crate::models::{
    DirectionFilter, FilterCriteria, ResultFilter, SymbolFilter, Trade, TradeDirection,
};

use super::reference_time;

/// Apply the filter criteria to a trade set, keeping source order.
pub fn apply(trades: &[Trade], criteria: &FilterCriteria) -> Vec<Trade> {
    trades
        .iter()
        .filter(|t| matches(t, criteria))
        .cloned()
        .collect()
}

/// Whether a single trade passes the criteria.
///
/// Date bounds are inclusive and only apply when the trade has a
/// parseable reference date: a dateless trade is never excluded by the
/// period, only by the symbol/direction/result predicates.
pub fn matches(trade: &Trade, criteria: &FilterCriteria) -> bool {
    if let Some(date) = reference_time(trade).map(|dt| dt.date()) {
        if let Some(from) = criteria.from_date {
            if date < from {
                return false;
            }
        }
        if let Some(to) = criteria.to_date {
            if date > to {
                return false;
            }
        }
    }

    if let SymbolFilter::Exact(symbol) = &criteria.symbol {
        if &trade.symbol != symbol {
            return false;
        }
    }

    match criteria.direction {
        DirectionFilter::All => {}
        DirectionFilter::Long => {
            if trade.direction != TradeDirection::Buy {
                return false;
            }
        }
        DirectionFilter::Short => {
            if trade.direction != TradeDirection::Sell {
                return false;
            }
        }
    }

    match criteria.result {
        ResultFilter::All => {}
        ResultFilter::Win => {
            if !(trade.profit > 0.0) {
                return false;
            }
        }
        ResultFilter::Loss => {
            if !(trade.profit < 0.0) {
                return false;
            }
        }
    }

    true
}
