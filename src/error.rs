//! # Error Handling
//!
//! This module defines the centralized error type for `hook-mirror`. It uses
//! the `thiserror` library to create a single `Error` enum that covers every
//! way a mirror run can fail.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to one failure mode
//!   and carries enough context to produce a useful message on its own.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Every variant is fatal to the run that produced it. Nothing in the library
//! retries or downgrades an error to a warning; versions that were already
//! committed before the failure stay committed, and a re-run resumes from the
//! mirror marker.

use thiserror::Error;

/// Main error type for hook-mirror operations
#[derive(Error, Debug)]
pub enum Error {
    /// The target path is not an initialized git repository.
    #[error("Precondition failed for {path}: {message}")]
    Precondition { path: String, message: String },

    /// An explicitly requested version is not published for the package.
    #[error("target version {version} not found for the package {package}")]
    UnknownVersion { package: String, version: String },

    /// The version stored in the mirror marker is no longer listed by the
    /// registry.
    #[error("Mirror marker version {version} is not listed for {package}; the registry may have removed it")]
    MarkerNotFound { package: String, version: String },

    /// Listing the versions of a package failed (network, registry or
    /// package manager error).
    #[error("Version lookup failed for {package} ({ecosystem}): {message}")]
    Lookup {
        ecosystem: String,
        package: String,
        message: String,
    },

    /// The git binary exited unsuccessfully or could not be started.
    #[error("Git command failed: {command} - {stderr}")]
    VcsCommand { command: String, stderr: String },

    /// Conflicting or malformed command-line input.
    #[error("{message}")]
    Argument { message: String },

    /// No ecosystem is registered under the requested key.
    #[error("Unknown ecosystem '{name}' (available: {available})")]
    UnknownEcosystem { name: String, available: String },

    /// An error occurred during template processing.
    ///
    /// May include the name of the problematic variable when applicable.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        /// The template variable that caused the error, if applicable
        variable: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
