use serde::Serialize;

/// All application errors, categorized by domain.
///
/// Parsing and statistics never produce errors: malformed rows are
/// skipped and malformed fields degrade to 0/None. Only I/O, storage and
/// the "nothing recognized" validation outcome surface here.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ── Import ──
    #[error("Failed to read statement file: {0}")]
    FileRead(String),

    #[error("No trades found in this statement; check that it is an MT4/FTMO export")]
    NoTradesFound,

    // ── Storage ──
    #[error("Database error: {0}")]
    Database(String),

    #[error("No account data stored; import a statement first")]
    NoAccountData,

    // ── Export ──
    #[error("Failed to write file: {0}")]
    FileWrite(String),

    // ── Serialization ──
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Serializable error response for external consumers.
#[derive(Debug, Serialize, Clone)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = match err {
            AppError::FileRead(_) => "FILE_READ",
            AppError::NoTradesFound => "NO_TRADES_FOUND",
            AppError::Database(_) => "DATABASE",
            AppError::NoAccountData => "NO_ACCOUNT_DATA",
            AppError::FileWrite(_) => "FILE_WRITE",
            AppError::Serialization(_) => "SERIALIZATION",
        };
        ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

// ── Conversions from external errors ──

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileRead(err.to_string())
    }
}
