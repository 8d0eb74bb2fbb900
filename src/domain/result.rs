//! Result type alias for the mock service
//!
//! This module provides a convenient Result type alias that uses MockError
//! as the error type.

use super::errors::MockError;

/// Result type alias for fallible operations
///
/// # Examples
///
/// ```
/// use rws_mock::domain::result::Result;
/// use rws_mock::domain::errors::MockError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MockError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::MockError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(MockError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
