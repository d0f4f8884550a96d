//! Parser for MT4 "Statement" exports.
//!
//! The export carries "Closed Transactions:", "Open Trades:" and
//! "Summary:" sections inside one results table. Columns: Ticket, Open
//! Time, Type, Size, Item, Price, S/L, T/P, Close Time, Price, Commission,
//! Taxes, Swap, Profit.

use tracing::debug;

use super::document::Document;
use crate::models::{Trade, TradeDirection};
use crate::utils::numeric::parse_amount;

pub const CLOSED_MARKER: &str = "Closed Transactions:";
pub const OPEN_MARKER: &str = "Open Trades:";
pub const SUMMARY_MARKER: &str = "Summary:";

/// Signature check on the raw text, before any table extraction.
pub fn matches(raw: &str) -> bool {
    raw.contains(CLOSED_MARKER) && raw.contains(OPEN_MARKER) && raw.contains(SUMMARY_MARKER)
}

/// Parse the closed transactions section of an MT4 statement.
///
/// Balance, deposit, pending and cancelled rows carry a non buy/sell type
/// and are skipped silently.
pub fn parse(doc: &Document) -> Vec<Trade> {
    let Some(table) = doc.find_table(&[CLOSED_MARKER, OPEN_MARKER]) else {
        return Vec::new();
    };
    let Some(closed_idx) = table.find_row(CLOSED_MARKER) else {
        return Vec::new();
    };

    let mut trades = Vec::new();

    // closed_idx + 1 is the column header row; data starts at + 2.
    for row in table.rows.iter().skip(closed_idx + 2) {
        let text = row.text();
        if text.trim().is_empty() {
            continue;
        }
        if text.contains(OPEN_MARKER) {
            break;
        }
        if row.cells.len() < 14 {
            continue;
        }

        let Some(direction) = TradeDirection::from_type_cell(row.cell(2).unwrap_or("")) else {
            continue;
        };

        trades.push(Trade {
            ticket: row.cell(0).unwrap_or("").to_string(),
            symbol: row.cell(4).unwrap_or("").to_uppercase(),
            direction,
            volume: parse_amount(row.cell(3).unwrap_or("")),
            open_time: row.cell(1).unwrap_or("").to_string(),
            close_time: row.cell(8).unwrap_or("").to_string(),
            open_price: parse_amount(row.cell(5).unwrap_or("")),
            close_price: parse_amount(row.cell(9).unwrap_or("")),
            stop_loss: parse_amount(row.cell(6).unwrap_or("")),
            take_profit: parse_amount(row.cell(7).unwrap_or("")),
            commission: parse_amount(row.cell(10).unwrap_or("")),
            // Cell 11 is the taxes column, intentionally unused.
            swap: parse_amount(row.cell(12).unwrap_or("")),
            profit: parse_amount(row.cell(13).unwrap_or("")),
        });
    }

    debug!("MT4 statement parser extracted {} trades", trades.len());
    trades
}
