use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction filter choice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DirectionFilter {
    #[default]
    All,
    Long,
    Short,
}

/// Result filter choice. Win and Loss are strict: a zero-profit trade
/// matches neither.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ResultFilter {
    #[default]
    All,
    Win,
    Loss,
}

/// Symbol filter: everything, or an exact case-sensitive match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SymbolFilter {
    #[default]
    All,
    Exact(String),
}

/// Stateless filter criteria, rebuilt from user input on every change.
/// `Default` is the identity filter (no trade excluded).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FilterCriteria {
    /// Inclusive lower bound on the trade's reference date.
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper bound on the trade's reference date.
    pub to_date: Option<NaiveDate>,
    pub symbol: SymbolFilter,
    pub direction: DirectionFilter,
    pub result: ResultFilter,
}

impl FilterCriteria {
    pub fn is_identity(&self) -> bool {
        self.from_date.is_none()
            && self.to_date.is_none()
            && self.symbol == SymbolFilter::All
            && self.direction == DirectionFilter::All
            && self.result == ResultFilter::All
    }
}
