use crate::domain::card::CardNetwork;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosnetError {
    #[error("Invalid {network} card number. It must be 8 digits.")]
    InvalidCardNumber { network: CardNetwork, number: String },
    #[error("Customer identity document must not be empty.")]
    MissingIdentityDocument,
    #[error("Card type not supported. Only Visa or AMEX.")]
    UnsupportedCardType(String),
    #[error("Card not registered or invalid.")]
    CardNotRegistered(String),
    #[error("Insufficient card limit for this payment.")]
    InsufficientLimit,
    #[error("Installments must be between 1 and 6, got {0}.")]
    InvalidInstallments(i64),
    #[error("Amount must be positive.")]
    InvalidAmount,
    #[error("Amount is too large to process.")]
    AmountTooLarge,
    #[error("Malformed operation: {0}")]
    MalformedOperation(String),
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PosnetError {
    /// Whether the error was caused by the caller's input rather than by the
    /// process itself.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::CsvError(_) | Self::IoError(_))
    }
}

pub type Result<T> = std::result::Result<T, PosnetError>;
