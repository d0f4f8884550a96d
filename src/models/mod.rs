pub mod filter;
pub mod stats;
pub mod trade;

pub use filter::{DirectionFilter, FilterCriteria, ResultFilter, SymbolFilter};
pub use stats::{EquityPoint, StatisticsResult};
pub use trade::{AccountMeta, Currency, Trade, TradeDirection};
