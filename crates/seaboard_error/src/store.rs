//! Relational store error types.

/// Store error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// Connection failed
    Connection(String),
    /// Query execution failed
    Query(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Natural key already exists
    Conflict,
    /// Record not found
    NotFound,
    /// Table not found
    TableNotFound(String),
}

impl std::fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreErrorKind::Connection(msg) => write!(f, "Store connection error: {}", msg),
            StoreErrorKind::Query(msg) => write!(f, "Store query error: {}", msg),
            StoreErrorKind::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StoreErrorKind::Conflict => write!(f, "Record with this key already exists"),
            StoreErrorKind::NotFound => write!(f, "Record not found"),
            StoreErrorKind::TableNotFound(table) => {
                write!(f, "Table '{}' not found in store", table)
            }
        }
    }
}

/// Store error with source location tracking.
///
/// # Examples
///
/// ```
/// use seaboard_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::NotFound);
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new StoreError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the underlying failure was a unique-key violation.
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind, StoreErrorKind::Conflict)
    }

    /// True when the underlying failure was an absent record.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, StoreErrorKind::NotFound)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Store Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for StoreError {}

// Diesel error conversions (only available with database feature)
#[cfg(feature = "database")]
impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => StoreError::new(StoreErrorKind::NotFound),
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => StoreError::new(StoreErrorKind::Conflict),
            _ => StoreError::new(StoreErrorKind::Query(err.to_string())),
        }
    }
}

#[cfg(feature = "database")]
impl From<diesel::ConnectionError> for StoreError {
    fn from(err: diesel::ConnectionError) -> Self {
        StoreError::new(StoreErrorKind::Connection(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::new(StoreErrorKind::Serialization(err.to_string()))
    }
}
