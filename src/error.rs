//! Domain-specific error types for the hardware configuration parser.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`LoadError`], [`LookupError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! HwConfigError
//! ├── Load(LoadError)         — reading the hardware configuration document
//! ├── Lookup(LookupError)     — resolving a host name to a document path
//! └── Settings(SettingsError) — reading hwconfig.toml
//! ```
//!
//! Missing fields, missing blocks and unclassified mount points are not
//! errors: they degrade to absent values inside the parse result.

use thiserror::Error;

/// Top-level error type for the hardware configuration parser.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum HwConfigError {
    /// The configuration document could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// A host name could not be resolved to a configuration document.
    #[error("Host lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// The lookup settings file could not be read or parsed.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Failure to load a hardware configuration document.
///
/// Fatal to the whole parse: no partial result is ever produced alongside it.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document path does not exist.
    #[error("Hardware config not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: String,
    },

    /// The document exists but could not be read as text.
    #[error("IO error reading hardware config {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Failure to map a host name onto a configuration document.
#[derive(Error, Debug)]
pub enum LookupError {
    /// None of the candidate paths exists for the host.
    #[error("No hardware configuration found for '{host}'")]
    HostNotFound {
        /// Host name that was looked up.
        host: String,
        /// Host names that do have a directory under the hosts directory.
        available: Vec<String>,
    },
}

/// Errors that arise from loading `hwconfig.toml`.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file is not valid TOML or has unexpected keys.
    #[error("Invalid TOML syntax in {file}: {message}")]
    InvalidSyntax {
        /// Settings file that failed to parse.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// An I/O error occurred while reading the settings file.
    #[error("IO error reading settings file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
