//! Error types for work-persona
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI
//!
//! The scoring core never returns these; they belong to the outer layers
//! (configuration, progress storage, the survey session and the CLI).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for work-persona operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO / storage errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,
    StorageUnavailable = 210,
    ProgressCorrupt = 211,

    // Survey input errors (3xx)
    UnknownAnswer = 301,
    AnswerRequired = 302,
    InvalidInput = 303,

    // Result link errors (4xx)
    InvalidResultLink = 400,
    UnknownPersona = 401,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Survey input errors
            400..=499 => 40, // Result link errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO / Storage Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Progress store cannot be used right now
    #[error("Progress storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// Stored progress could not be understood
    #[error("Saved progress is corrupted: {message}")]
    ProgressCorrupt { message: String },

    // ─────────────────────────────────────────────────────────────
    // Survey Input Errors
    // ─────────────────────────────────────────────────────────────

    /// Answer id not valid for the question
    #[error("Answer '{answer_id}' is not an option for question {question_id}")]
    UnknownAnswer {
        question_id: String,
        answer_id: String,
    },

    /// Tried to advance without answering
    #[error("Question {question_id} needs an answer before continuing")]
    AnswerRequired { question_id: String },

    /// Malformed command-line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ─────────────────────────────────────────────────────────────
    // Result Link Errors
    // ─────────────────────────────────────────────────────────────

    /// Share link missing one of its parameters
    #[error("Result link is incomplete or invalid: {link}")]
    InvalidResultLink { link: String },

    /// Share link names a persona we do not have
    #[error("Result link refers to an unknown persona: {persona_id}")]
    UnknownPersona { persona_id: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,
            Error::Json(_) => ErrorCode::ProgressCorrupt,
            Error::StorageUnavailable { .. } => ErrorCode::StorageUnavailable,
            Error::ProgressCorrupt { .. } => ErrorCode::ProgressCorrupt,

            Error::UnknownAnswer { .. } => ErrorCode::UnknownAnswer,
            Error::AnswerRequired { .. } => ErrorCode::AnswerRequired,
            Error::InvalidInput(_) => ErrorCode::InvalidInput,

            Error::InvalidResultLink { .. } => ErrorCode::InvalidResultLink,
            Error::UnknownPersona { .. } => ErrorCode::UnknownPersona,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the error comes from the progress store.
    ///
    /// These are swallowed by the best-effort progress wrapper.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::StorageUnavailable { .. }
                | Error::ProgressCorrupt { .. }
                | Error::Io(_)
                | Error::IoRead { .. }
                | Error::IoWrite { .. }
                | Error::Json(_)
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'work-persona config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'work-persona config validate' to see details."
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values."
            ),
            Error::StorageUnavailable { .. } | Error::ProgressCorrupt { .. } => Some(
                "Run 'work-persona progress clear' to discard saved progress and start over."
            ),
            Error::UnknownAnswer { .. } => Some(
                "Run 'work-persona catalog questions' to list valid question and answer ids."
            ),
            Error::InvalidResultLink { .. } | Error::UnknownPersona { .. } => Some(
                "This link does not hold a complete result. Run 'work-persona survey' to take the survey."
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a storage unavailable error
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Error::StorageUnavailable {
            message: message.into(),
        }
    }

    /// Create an invalid result link error
    pub fn invalid_result_link(link: impl Into<String>) -> Self {
        Error::InvalidResultLink { link: link.into() }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
