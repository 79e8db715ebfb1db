// ⚠️ Error kinds surfaced by the expense store
// Display strings are exactly what API clients see in the error envelope

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExpenseError {
    /// Category is missing or not one of the fixed set
    #[error("Invalid category.")]
    InvalidCategory,

    /// Amount is missing, non-numeric, not finite, or not strictly positive
    #[error("Amount must be positive.")]
    InvalidAmount,

    /// Date is missing or cannot be parsed into a timestamp
    #[error("Invalid date.")]
    InvalidDate,
}

impl ExpenseError {
    /// Short machine-friendly name, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ExpenseError::InvalidCategory => "InvalidCategory",
            ExpenseError::InvalidAmount => "InvalidAmount",
            ExpenseError::InvalidDate => "InvalidDate",
        }
    }
}
