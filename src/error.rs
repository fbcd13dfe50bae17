use thiserror::Error;

/// Errors raised when a caller breaks the ledger's contract.
///
/// An invalid transaction is not an error: it is reported by `TxHandler::is_valid_tx`
/// returning `false`, or by the transaction being absent from the epoch result.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Failed to encode transaction: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Invalid SHA-256 length. Expected: {expected} but got: {actual}")]
    InvalidHashLength { expected: usize, actual: usize },

    #[error("Invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed ledger file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
