use serde::{Deserialize, Serialize};

/// Direction of a closed position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    /// Parse a broker type cell ("buy"/"sell", any case). Anything else —
    /// balance lines, pending orders, cancelled entries — is not a trade.
    pub fn from_type_cell(text: &str) -> Option<TradeDirection> {
        match text.trim().to_lowercase().as_str() {
            "buy" => Some(TradeDirection::Buy),
            "sell" => Some(TradeDirection::Sell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "buy",
            TradeDirection::Sell => "sell",
        }
    }
}

/// A closed position extracted from a broker statement.
///
/// Timestamps are kept as the raw broker-local text from the statement
/// (no timezone); they are parsed on demand by the filter and statistics
/// engines and must survive persistence verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Broker ticket/position id. Empty when the source format has none.
    pub ticket: String,
    pub symbol: String,
    pub direction: TradeDirection,
    pub volume: f64,
    pub open_time: String,
    pub close_time: String,
    pub open_price: f64,
    pub close_price: f64,
    /// 0.0 = not set.
    pub stop_loss: f64,
    /// 0.0 = not set.
    pub take_profit: f64,
    pub commission: f64,
    pub swap: f64,
    pub profit: f64,
}

/// Display currency of the account. A label, never a conversion rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Eur,
    Usd,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    pub fn from_code(code: &str) -> Currency {
        match code.trim().to_uppercase().as_str() {
            "USD" => Currency::Usd,
            _ => Currency::Eur,
        }
    }
}

/// Account metadata captured at import time. One active account at a time;
/// replaced wholesale on each import, cleared on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMeta {
    pub account_name: String,
    pub account_type: String,
    pub starting_capital: f64,
    pub currency: Currency,
}
