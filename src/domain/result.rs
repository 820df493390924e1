//! Result type alias for the push pipeline
//!
//! This module provides a convenient Result type alias that uses PushError
//! as the error type.

use super::errors::PushError;

/// Result type alias for push operations
///
/// This is a convenience type alias that uses `PushError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use aisler_push::domain::result::Result;
/// use aisler_push::domain::errors::PushError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PushError::Board("Layer plot failed".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PushError>;
