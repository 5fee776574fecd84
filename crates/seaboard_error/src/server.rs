//! HTTP server error types.

/// Server error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServerErrorKind {
    /// Configuration value missing or malformed
    Configuration(String),
    /// Server failed to bind or serve
    Startup(String),
}

impl std::fmt::Display for ServerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerErrorKind::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ServerErrorKind::Startup(msg) => write!(f, "Server startup error: {}", msg),
        }
    }
}

/// Server error with source location tracking.
#[derive(Debug, Clone)]
pub struct ServerError {
    /// The kind of error that occurred
    pub kind: ServerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Server Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for ServerError {}
