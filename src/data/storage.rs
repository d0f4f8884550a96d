//! SQLite persistence of the normalized trade list and account metadata.
//!
//! Two records, replaced wholesale on each import (one active account at
//! a time). The round-trip is lossless: numeric fields are stored as
//! REAL, the raw broker timestamps as TEXT and never re-derived on load.

use rusqlite::{params, Connection};
use tracing::info;

use crate::errors::AppError;
use crate::models::{AccountMeta, Currency, Trade, TradeDirection};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS trades (
    seq             INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket          TEXT NOT NULL,
    symbol          TEXT NOT NULL,
    direction       TEXT NOT NULL,
    volume          REAL NOT NULL,
    open_time       TEXT NOT NULL,
    close_time      TEXT NOT NULL,
    open_price      REAL NOT NULL,
    close_price     REAL NOT NULL,
    stop_loss       REAL NOT NULL,
    take_profit     REAL NOT NULL,
    commission      REAL NOT NULL,
    swap            REAL NOT NULL,
    profit          REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS account_meta (
    id               INTEGER PRIMARY KEY CHECK (id = 1),
    account_name     TEXT NOT NULL,
    account_type     TEXT NOT NULL,
    starting_capital REAL NOT NULL,
    currency         TEXT NOT NULL
);
"#;

/// Open (or create) the analytics database and ensure the schema exists.
pub fn open_database(path: &str) -> Result<Connection, AppError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(conn)
}

/// In-memory database with the schema applied. For tests.
pub fn open_in_memory() -> Result<Connection, AppError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(conn)
}

/// Replace the stored trade list and account metadata in one transaction.
/// Last write wins; there is no merging across imports.
pub fn replace_account(
    conn: &mut Connection,
    trades: &[Trade],
    meta: &AccountMeta,
) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM trades", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO trades (ticket, symbol, direction, volume, open_time, close_time,
                                 open_price, close_price, stop_loss, take_profit,
                                 commission, swap, profit)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )?;
        for t in trades {
            stmt.execute(params![
                t.ticket,
                t.symbol,
                t.direction.as_str(),
                t.volume,
                t.open_time,
                t.close_time,
                t.open_price,
                t.close_price,
                t.stop_loss,
                t.take_profit,
                t.commission,
                t.swap,
                t.profit,
            ])?;
        }
    }

    tx.execute("DELETE FROM account_meta", [])?;
    tx.execute(
        "INSERT INTO account_meta (id, account_name, account_type, starting_capital, currency)
         VALUES (1, ?1, ?2, ?3, ?4)",
        params![
            meta.account_name,
            meta.account_type,
            meta.starting_capital,
            meta.currency.as_str(),
        ],
    )?;

    tx.commit()?;
    info!("Stored {} trades for account '{}'", trades.len(), meta.account_name);
    Ok(())
}

/// Load all stored trades in import order.
pub fn load_trades(conn: &Connection) -> Result<Vec<Trade>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT ticket, symbol, direction, volume, open_time, close_time,
                open_price, close_price, stop_loss, take_profit, commission, swap, profit
         FROM trades ORDER BY seq",
    )?;

    let rows = stmt.query_map([], |row| {
        let direction: String = row.get(2)?;
        Ok(Trade {
            ticket: row.get(0)?,
            symbol: row.get(1)?,
            direction: TradeDirection::from_type_cell(&direction)
                .unwrap_or(TradeDirection::Buy),
            volume: row.get(3)?,
            open_time: row.get(4)?,
            close_time: row.get(5)?,
            open_price: row.get(6)?,
            close_price: row.get(7)?,
            stop_loss: row.get(8)?,
            take_profit: row.get(9)?,
            commission: row.get(10)?,
            swap: row.get(11)?,
            profit: row.get(12)?,
        })
    })?;

    let mut trades = Vec::new();
    for trade in rows {
        trades.push(trade?);
    }
    Ok(trades)
}

/// Load the account metadata, if any account has been imported.
pub fn load_meta(conn: &Connection) -> Result<Option<AccountMeta>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT account_name, account_type, starting_capital, currency
         FROM account_meta WHERE id = 1",
    )?;
    let mut rows = stmt.query_map([], |row| {
        let currency: String = row.get(3)?;
        Ok(AccountMeta {
            account_name: row.get(0)?,
            account_type: row.get(1)?,
            starting_capital: row.get(2)?,
            currency: Currency::from_code(&currency),
        })
    })?;

    match rows.next() {
        Some(meta) => Ok(Some(meta?)),
        None => Ok(None),
    }
}

/// Clear both records. Used by the reset flow.
pub fn reset(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM trades", [])?;
    tx.execute("DELETE FROM account_meta", [])?;
    tx.commit()?;
    info!("Account data reset");
    Ok(())
}
