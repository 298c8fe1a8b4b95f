//! Error handling for claude-manager
//!
//! Every operation on the configuration document, the backup directory and the
//! agent files reports failure through [`ManagerError`]. The variants follow a
//! small taxonomy:
//!
//! - [`ManagerError::NotFound`] - a required path does not exist
//! - [`ManagerError::ParseError`] - malformed JSON or malformed front-matter
//! - [`ManagerError::SchemaError`] - well-formed data with the wrong shape
//! - [`ManagerError::IoFailure`] - copy, rename or write failure at the OS level
//!
//! Store operations never panic and never terminate the process. They log the
//! failure through `tracing` and hand the error back to the caller, which is
//! usually the interactive front-end and decides whether a failure is fatal.
//!
//! For terminal output, [`user_friendly_error`] converts any [`anyhow::Error`]
//! into an [`ErrorContext`] carrying details and an actionable suggestion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use claude_manager::core::{ManagerError, user_friendly_error};
//! use std::path::PathBuf;
//!
//! let error = ManagerError::NotFound {
//!     path: PathBuf::from("/home/user/.claude.json"),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for claude-manager operations.
#[derive(Error, Debug)]
pub enum ManagerError {
    /// A path the operation depends on does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// The missing path
        path: PathBuf,
    },

    /// The file content could not be decoded.
    ///
    /// Raised for invalid JSON in the configuration document and for
    /// front-matter blocks that are not valid YAML.
    #[error("Failed to parse {}: {reason}", path.display())]
    ParseError {
        /// The file that failed to parse
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// The content decoded but has the wrong shape.
    #[error("Unexpected structure in {}: {reason}", path.display())]
    SchemaError {
        /// The offending file
        path: PathBuf,
        /// What was expected
        reason: String,
    },

    /// An operating-system level failure.
    #[error("Failed {operation} {}: {source}", path.display())]
    IoFailure {
        /// Short description of the failed step, e.g. "writing temp file"
        operation: String,
        /// The path involved
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ManagerError {
    /// Build an [`ManagerError::IoFailure`] from an I/O error.
    pub fn io(operation: impl Into<String>, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::IoFailure {
            operation: operation.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a [`ManagerError::ParseError`].
    pub fn parse(path: impl AsRef<Path>, reason: impl fmt::Display) -> Self {
        Self::ParseError {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`ManagerError::SchemaError`].
    pub fn schema(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::SchemaError {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::ParseError { path, .. }
            | Self::SchemaError { path, .. }
            | Self::IoFailure { path, .. } => path,
        }
    }

    /// Whether the error is [`ManagerError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience alias used throughout the library.
pub type ManagerResult<T> = std::result::Result<T, ManagerError>;

/// An error enriched with details and a suggestion for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// Primary error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: message in red, details in yellow,
    /// suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with contextual suggestions.
///
/// Known [`ManagerError`] variants anywhere in the error chain get tailored
/// advice; everything else is reported with its full context chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            message: ctx.message.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    let manager_error = error.chain().find_map(|cause| cause.downcast_ref::<ManagerError>());

    if let Some(err) = manager_error {
        let ctx = ErrorContext::new(format!("{error:#}"));
        return match err {
            ManagerError::NotFound { path } => ctx
                .with_details(format!("Nothing exists at {}", path.display()))
                .with_suggestion(
                    "Pass the configuration path explicitly with --config or set CLAUDE_MANAGER_CONFIG",
                ),
            ManagerError::ParseError { .. } => ctx
                .with_details("The file is not valid JSON/YAML and was left untouched")
                .with_suggestion(
                    "Restore a known-good copy with 'claude-manager backup list' and 'claude-manager backup restore'",
                ),
            ManagerError::SchemaError { .. } => ctx
                .with_details("The document decoded but does not have the expected structure")
                .with_suggestion("The top level of ~/.claude.json must be a JSON object"),
            ManagerError::IoFailure { source, .. } => match source.kind() {
                std::io::ErrorKind::PermissionDenied => ctx
                    .with_details("The operating system refused access to the file")
                    .with_suggestion("Check the ownership and permissions of the file and its directory"),
                _ => ctx.with_suggestion("Check free disk space and that the directory is writable"),
            },
        };
    }

    ErrorContext::new(format!("{error:#}"))
}
