//! Input validation error types.

use std::collections::BTreeMap;

/// Aggregated field-level validation failures.
///
/// Carries one message per failing field. All fields are validated before
/// the error is raised, so the caller can re-render a form with every
/// problem reported at once.
///
/// # Examples
///
/// ```
/// use seaboard_error::ValidationError;
///
/// let mut err = ValidationError::empty();
/// err.push("imo", "IMO number is required");
/// assert!(!err.is_empty());
/// assert!(format!("{}", err).contains("imo"));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Field name mapped to a human-readable message
    pub fields: BTreeMap<String, String>,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create an empty accumulator with automatic location tracking.
    #[track_caller]
    pub fn empty() -> Self {
        let location = std::panic::Location::caller();
        Self {
            fields: BTreeMap::new(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Record a failure for one field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    /// True when no field has failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation Error:")?;
        for (field, message) in &self.fields {
            write!(f, " {}: {};", field, message)?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}

impl std::error::Error for ValidationError {}
