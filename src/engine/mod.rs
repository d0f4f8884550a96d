//! Pure analytics over the canonical trade list: filtering and the
//! statistics snapshot. Both are deterministic transforms with no shared
//! state; recomputing over the same inputs always yields the same output.

pub mod filter;
pub mod stats;

use chrono::NaiveDateTime;

use crate::models::Trade;
use crate::utils::numeric::parse_timestamp;

/// Reference time of a trade: close time when parseable, open time as
/// fallback, None when neither parses.
pub fn reference_time(trade: &Trade) -> Option<NaiveDateTime> {
    parse_timestamp(&trade.close_time).or_else(|| parse_timestamp(&trade.open_time))
}
