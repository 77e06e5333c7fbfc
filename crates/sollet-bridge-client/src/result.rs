//! The two-variant outcome returned by every fallible bridge operation.
//!
//! Callers inspect the error before trusting the value; nothing in this crate
//! panics or throws across its public functions.

use crate::BridgeError;

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Wrap a successfully produced value.
pub fn success<T>(value: T) -> BridgeResult<T> {
    Ok(value)
}

/// Wrap the reason a value could not be produced.
pub fn failure<T>(error: impl Into<BridgeError>) -> BridgeResult<T> {
    Err(error.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_carries_no_error() {
        let result = success(42u64);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_failure_carries_the_given_error() {
        let result: BridgeResult<u64> = failure(BridgeError::Signing("user declined".to_string()));
        match result {
            Err(BridgeError::Signing(msg)) => assert_eq!(msg, "user declined"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_failure_has_no_value() {
        let result: BridgeResult<String> = failure(BridgeError::WalletNotConnected);
        assert!(result.as_ref().ok().is_none());
        assert!(result.unwrap_err().to_string().contains("not connected"));
    }
}
