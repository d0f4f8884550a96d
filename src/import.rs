//! Import flow: read a statement export, detect its format, normalize the
//! trades and replace the stored account wholesale.

use std::path::Path;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::storage;
use crate::errors::AppError;
use crate::models::{AccountMeta, Currency};
use crate::parser::{self, ReportFormat};
use crate::utils::numeric::parse_amount;

/// Starting capital assumed when the user supplies none (or a value that
/// parses to 0).
pub const DEFAULT_CAPITAL: f64 = 10_000.0;

/// Account values supplied alongside the statement file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSetup {
    pub account_name: String,
    pub account_type: String,
    /// Free-form user input; normalized through the shared amount parser.
    pub starting_capital: String,
    pub currency: Currency,
}

impl AccountSetup {
    fn into_meta(self) -> AccountMeta {
        let mut starting_capital = parse_amount(&self.starting_capital);
        if starting_capital <= 0.0 {
            starting_capital = DEFAULT_CAPITAL;
        }
        let account_name = match self.account_name.trim() {
            "" => "Local account".to_string(),
            name => name.to_string(),
        };
        AccountMeta {
            account_name,
            account_type: self.account_type,
            starting_capital,
            currency: self.currency,
        }
    }
}

/// Outcome of a successful import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub format: ReportFormat,
    pub trades: usize,
    pub account_name: String,
}

/// Read a statement file from disk. I/O failures surface as a read
/// error, distinct from the "zero trades parsed" validation outcome.
pub fn read_statement_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::FileRead(format!("{}: {}", path.display(), e)))
}

/// Parse a raw statement and replace the stored account with its trades.
///
/// A statement no parser recognizes is a validation failure
/// ([`AppError::NoTradesFound`]), not a crash; a few malformed rows in an
/// otherwise valid statement are skipped by the parsers and never abort
/// the import.
pub fn import_statement(
    conn: &mut Connection,
    raw: &str,
    setup: AccountSetup,
) -> Result<ImportSummary, AppError> {
    let (format, trades) = parser::detect_and_parse(raw).ok_or(AppError::NoTradesFound)?;

    let meta = setup.into_meta();
    storage::replace_account(conn, &trades, &meta)?;

    info!(
        format = format.as_str(),
        trades = trades.len(),
        account = %meta.account_name,
        "statement imported"
    );

    Ok(ImportSummary {
        format,
        trades: trades.len(),
        account_name: meta.account_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::{load_meta, load_trades, open_in_memory};

    fn setup() -> AccountSetup {
        AccountSetup {
            account_name: "  ".to_string(),
            account_type: "MT4".to_string(),
            starting_capital: "abc".to_string(),
            currency: Currency::Eur,
        }
    }

    fn mt4_statement() -> String {
        "Summary:<table>\
         <tr><td>Closed Transactions:</td></tr>\
         <tr><td>Ticket</td><td>Open Time</td><td>Type</td><td>Size</td><td>Item</td>\
         <td>Price</td><td>S/L</td><td>T/P</td><td>Close Time</td><td>Price</td>\
         <td>Commission</td><td>Taxes</td><td>Swap</td><td>Profit</td></tr>\
         <tr><td>1</td><td>2024.02.01 10:00:00</td><td>buy</td><td>0.10</td><td>eurusd</td>\
         <td>1.08</td><td>0</td><td>0</td><td>2024.02.01 12:00:00</td><td>1.09</td>\
         <td>0</td><td>0</td><td>0</td><td>100.00</td></tr>\
         <tr><td>Open Trades:</td></tr></table>"
            .to_string()
    }

    #[test]
    fn test_import_persists_trades_and_meta() {
        let mut conn = open_in_memory().unwrap();
        let summary = import_statement(&mut conn, &mt4_statement(), setup()).unwrap();

        assert_eq!(summary.format, ReportFormat::Mt4Statement);
        assert_eq!(summary.trades, 1);
        assert_eq!(summary.account_name, "Local account");

        assert_eq!(load_trades(&conn).unwrap().len(), 1);
        let meta = load_meta(&conn).unwrap().unwrap();
        // Unparsable capital falls back to the default.
        assert_eq!(meta.starting_capital, DEFAULT_CAPITAL);
    }

    #[test]
    fn test_unrecognized_statement_is_a_validation_error() {
        let mut conn = open_in_memory().unwrap();
        let err = import_statement(&mut conn, "<p>nothing here</p>", setup()).unwrap_err();
        assert!(matches!(err, AppError::NoTradesFound));
        // Nothing was replaced.
        assert!(load_trades(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_reimport_replaces_previous_account() {
        let mut conn = open_in_memory().unwrap();
        import_statement(&mut conn, &mt4_statement(), setup()).unwrap();

        let mut second = setup();
        second.account_name = "Second".to_string();
        second.starting_capital = "25 000,00".to_string();
        import_statement(&mut conn, &mt4_statement(), second).unwrap();

        let meta = load_meta(&conn).unwrap().unwrap();
        assert_eq!(meta.account_name, "Second");
        assert_eq!(meta.starting_capital, 25000.0);
        assert_eq!(load_trades(&conn).unwrap().len(), 1);
    }
}
