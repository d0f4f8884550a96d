//! Best-effort fallback for MT4 exports without section markers.
//!
//! Scans every table for rows carrying a literal buy/sell cell and infers
//! the neighboring columns from that cell's position. The offsets are a
//! heuristic: volume sits just before the type cell, the symbol just
//! after, and the profit in the last cell. There is no close-time column
//! to find, so the close time is set equal to the open time — an explicit
//! approximation. This tier is lower-reliability by design and only runs
//! when both format-specific parsers produced nothing.

use tracing::debug;

use super::document::Document;
use crate::models::{Trade, TradeDirection};
use crate::utils::numeric::parse_amount;

/// Parse any recognizable trade rows out of a classic MT4 export.
pub fn parse(doc: &Document) -> Vec<Trade> {
    let mut trades = Vec::new();

    for table in &doc.tables {
        for row in &table.rows {
            if row.cells.len() < 8 {
                continue;
            }

            let Some((type_idx, direction)) = row
                .cells
                .iter()
                .enumerate()
                .find_map(|(i, c)| TradeDirection::from_type_cell(c).map(|d| (i, d)))
            else {
                continue;
            };

            let symbol = row
                .cell(type_idx + 1)
                .filter(|s| !s.is_empty())
                .or_else(|| row.cell(2))
                .unwrap_or("")
                .to_string();
            if symbol.is_empty() {
                continue;
            }

            let open_time = row.cell(0).unwrap_or("").to_string();
            let volume = match type_idx {
                0 => 0.0,
                i => parse_amount(row.cell(i - 1).unwrap_or("")),
            };
            let profit = parse_amount(row.cells.last().map(String::as_str).unwrap_or(""));

            trades.push(Trade {
                ticket: String::new(),
                symbol,
                direction,
                volume,
                close_time: open_time.clone(),
                open_time,
                open_price: 0.0,
                close_price: 0.0,
                stop_loss: 0.0,
                take_profit: 0.0,
                commission: 0.0,
                swap: 0.0,
                profit,
            });
        }
    }

    debug!("MT4 classic fallback extracted {} trades", trades.len());
    trades
}
