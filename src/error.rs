//! Error types for the order book core.
//!
//! Clean error handling using `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Result type alias for book operations.
pub type Result<T> = std::result::Result<T, BookError>;

/// Main error type for book operations.
///
/// Validation errors are raised before any state mutation; a rejected
/// submission leaves the book untouched. Cancelling an unknown order id is
/// not an error (it is the `false` return of [`Book::cancel`]).
///
/// [`Book::cancel`]: crate::Book::cancel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Order id is already live on the book (resting or in-flight)
    #[error("Duplicate order ID: {0}")]
    DuplicateOrderId(u64),

    /// Non-positive submission size
    #[error("Invalid size: {0}")]
    InvalidSize(i32),

    /// Negative limit price
    #[error("Invalid price: {0}")]
    InvalidPrice(i32),

    /// Submission symbol does not match the book's symbol
    #[error("Symbol mismatch: expected {expected}, got {actual}")]
    SymbolMismatch {
        /// The book's symbol
        expected: String,
        /// The symbol carried by the submission
        actual: String,
    },

    /// Book state inconsistency detected (programmer error)
    #[error("Book inconsistency: {0}")]
    InconsistentState(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookError::DuplicateOrderId(12345);
        assert_eq!(err.to_string(), "Duplicate order ID: 12345");

        let err = BookError::SymbolMismatch {
            expected: "NVDA".to_string(),
            actual: "TSLA".to_string(),
        };
        assert_eq!(err.to_string(), "Symbol mismatch: expected NVDA, got TSLA");
    }

    #[test]
    fn test_result_type() {
        let result: Result<i32> = Err(BookError::InvalidPrice(-100));
        assert!(result.is_err());
    }
}
