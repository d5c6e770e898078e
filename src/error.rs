//! Unified error hierarchy for FiveZone
//!
//! Zone math, input validation, workout-log import and configuration each get
//! their own error type; `FiveZoneError` ties them together so callers can use
//! a single `Result` alias.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all FiveZone operations
#[derive(Debug, Error)]
pub enum FiveZoneError {
    /// Zone model precondition violations
    #[error("Zone error: {0}")]
    Zone(#[from] ZoneError),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Workout log import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the heart-rate zone model.
///
/// Every variant indicates a caller bug: the model is deterministic math and
/// never fails on valid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    /// Raw zone number outside 0-5
    #[error("Invalid zone number: {0} (expected 0-5)")]
    InvalidZoneNumber(u8),

    /// Zone 0 sits below the trainable range and has no boundaries
    #[error("Zone {0} has no heart rate range")]
    NoRangeForZone(u8),

    /// Max heart rate must be a positive, finite number for classification
    #[error("Invalid max heart rate: {value}")]
    InvalidMaxHeartRate { value: f64 },

    /// Heart rate must be a number
    #[error("Invalid heart rate: {value}")]
    InvalidHeartRate { value: f64 },
}

/// Field-level validation failures collected from one input struct.
///
/// Keys are the input field names, values the message shown next to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first message for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Workout log import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// File extension not recognised
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Row or document could not be parsed
    #[error("Parse error in {format} at {location}: {reason}")]
    ParseError {
        format: String,
        location: String,
        reason: String,
    },

    /// Required column absent from the file
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },
}

/// Result type alias for FiveZone operations
pub type Result<T> = std::result::Result<T, FiveZoneError>;

impl FiveZoneError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FiveZoneError::Validation(_) => ErrorSeverity::Warning,
            FiveZoneError::Import(ImportError::FileNotFound { .. }) => ErrorSeverity::Warning,
            FiveZoneError::Import(_) => ErrorSeverity::Error,
            FiveZoneError::Zone(_) => ErrorSeverity::Critical,
            FiveZoneError::Configuration(_) => ErrorSeverity::Error,
            FiveZoneError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FiveZoneError::Validation(errors) => {
                format!("Please check your input ({} field(s) need attention): {}", errors.len(), errors)
            }
            FiveZoneError::Import(ImportError::FileNotFound { path }) => {
                format!("Could not find workout log file: {}", path.display())
            }
            FiveZoneError::Import(ImportError::UnsupportedFormat { format }) => {
                format!("Workout logs must be CSV or JSON, got '{}'", format)
            }
            FiveZoneError::Zone(ZoneError::InvalidMaxHeartRate { .. }) => {
                "A positive max heart rate is required. Set your age or a measured max heart rate."
                    .to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Caller bug or broken invariant
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
