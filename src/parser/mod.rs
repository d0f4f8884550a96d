//! Statement parsing: format detection and the per-format parsers.
//!
//! Each supported layout is a [`ReportFormat`] variant with a signature
//! predicate over the raw text and a parser over the extracted table
//! model. Detection walks the variants in priority order and
//! short-circuits on the first one that yields trades; a document nobody
//! can read is "zero trades", a validation outcome, never an error.

pub mod document;
pub mod ftmo;
pub mod mt4_classic;
pub mod mt4_statement;

use tracing::info;

use crate::models::Trade;
use document::Document;

/// Supported statement layouts, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReportFormat {
    FtmoReport,
    Mt4Statement,
    /// Generic neighbor-offset heuristic. Best-effort: only tried when
    /// both format-specific parsers come up empty.
    Mt4Classic,
}

impl ReportFormat {
    /// Fixed priority order. The classic fallback always comes last.
    pub const DETECTION_ORDER: [ReportFormat; 3] = [
        ReportFormat::FtmoReport,
        ReportFormat::Mt4Statement,
        ReportFormat::Mt4Classic,
    ];

    /// Cheap signature check on the raw text. The fallback has no
    /// signature; it applies to anything.
    pub fn applies_to(&self, raw: &str) -> bool {
        match self {
            ReportFormat::FtmoReport => ftmo::matches(raw),
            ReportFormat::Mt4Statement => mt4_statement::matches(raw),
            ReportFormat::Mt4Classic => true,
        }
    }

    /// Run this format's parser over the extracted document.
    /// Non-matching content yields an empty list, never an error.
    pub fn parse(&self, doc: &Document) -> Vec<Trade> {
        match self {
            ReportFormat::FtmoReport => ftmo::parse(doc),
            ReportFormat::Mt4Statement => mt4_statement::parse(doc),
            ReportFormat::Mt4Classic => mt4_classic::parse(doc),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::FtmoReport => "FTMO report",
            ReportFormat::Mt4Statement => "MT4 statement",
            ReportFormat::Mt4Classic => "MT4 classic (best effort)",
        }
    }
}

/// Detect the statement format and parse it into canonical trades.
///
/// Returns the winning format and its trades, or None when every parser
/// comes up empty.
pub fn detect_and_parse(raw: &str) -> Option<(ReportFormat, Vec<Trade>)> {
    let doc = document::extract(raw);

    for format in ReportFormat::DETECTION_ORDER {
        if !format.applies_to(raw) {
            continue;
        }
        let trades = format.parse(&doc);
        if !trades.is_empty() {
            info!(format = format.as_str(), trades = trades.len(), "statement parsed");
            return Some((format, trades));
        }
    }

    None
}
