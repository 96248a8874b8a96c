//! Result type alias for gee-batch

use super::errors::BatchError;

/// Result type alias for gee-batch operations
///
/// # Examples
///
/// ```
/// use gee_batch::domain::result::Result;
/// use gee_batch::domain::errors::BatchError;
///
/// fn failing_function() -> Result<()> {
///     Err(BatchError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BatchError>;
