//! Parser for FTMO trading history reports.
//!
//! The report is a single large table with section marker rows. The
//! "Positions" section holds the closed positions: one header row below
//! the marker, then data rows until the orders section begins.

use tracing::debug;

use super::document::Document;
use crate::models::{Trade, TradeDirection};
use crate::utils::numeric::parse_amount;

/// Markers that must all be present in the raw text for this format.
pub const TITLE_MARKER: &str = "Rapport d'historique de trading";
pub const POSITIONS_MARKER: &str = "Positions";
pub const TRANSACTIONS_MARKER: &str = "Transactions";

/// The positions section ends where the orders section starts. The report
/// localizes this heading, so both spellings are accepted.
const ORDERS_MARKERS: [&str; 2] = ["Orders", "Ordres"];

/// Signature check on the raw text, before any table extraction.
pub fn matches(raw: &str) -> bool {
    raw.contains(TITLE_MARKER)
        && raw.contains(POSITIONS_MARKER)
        && raw.contains(TRANSACTIONS_MARKER)
}

/// Parse all closed positions out of an FTMO report.
///
/// Returns an empty list when the document does not hold a positions
/// section. Rows that are not buy/sell positions (balance lines, section
/// footers) are skipped, never treated as errors.
pub fn parse(doc: &Document) -> Vec<Trade> {
    let Some(table) = doc.find_table(&[POSITIONS_MARKER]) else {
        return Vec::new();
    };
    let Some(positions_idx) = table.find_row(POSITIONS_MARKER) else {
        return Vec::new();
    };

    let mut trades = Vec::new();

    // positions_idx + 1 is the column header row; data starts at + 2.
    for row in table.rows.iter().skip(positions_idx + 2) {
        let text = row.text();
        if text.trim().is_empty() {
            continue;
        }
        if ORDERS_MARKERS.iter().any(|m| text.contains(m)) {
            break;
        }
        if row.cells.len() < 10 {
            continue;
        }

        // Columns: Time, Position, Symbol, Type, [hidden], Volume, Price,
        // SL, TP, Close Time, Close Price, Commission, Swap, Profit
        let symbol = row.cell(2).unwrap_or("").to_string();
        let Some(direction) = TradeDirection::from_type_cell(row.cell(3).unwrap_or("")) else {
            continue;
        };
        if symbol.is_empty() {
            continue;
        }

        trades.push(Trade {
            ticket: row.cell(1).unwrap_or("").to_string(),
            symbol,
            direction,
            volume: parse_amount(row.cell(5).unwrap_or("")),
            open_time: row.cell(0).unwrap_or("").to_string(),
            close_time: row.cell(9).unwrap_or("").to_string(),
            open_price: parse_amount(row.cell(6).unwrap_or("")),
            close_price: parse_amount(row.cell(10).unwrap_or("")),
            stop_loss: parse_amount(row.cell(7).unwrap_or("")),
            take_profit: parse_amount(row.cell(8).unwrap_or("")),
            commission: parse_amount(row.cell(11).unwrap_or("")),
            swap: parse_amount(row.cell(12).unwrap_or("")),
            profit: parse_amount(row.cell(13).unwrap_or("")),
        });
    }

    debug!("FTMO parser extracted {} trades", trades.len());
    trades
}
