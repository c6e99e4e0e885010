//! Unified error handling for icplookup.
//!
//! A `thiserror`-based model with:
//!   * Typed variants for the failure domains the pipeline can hit
//!   * A categorization layer (`ErrorCategory`) for diagnostics
//!   * Helper constructors
//!   * `From` conversions for common lower-level errors
//!
//! The retry driver treats every navigation / extraction error as
//! recoverable; input-source errors are fatal and terminate the process
//! before any lookup is issued.

use std::io;

use thiserror::Error;

/// High-level classification used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Extraction,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Network => "network",
            ErrorCategory::Extraction => "extraction",
            ErrorCategory::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Primary application error type.
#[derive(Error, Debug)]
pub enum IcpLookupError {
    // ------------------------ Input / Validation ----------------------------
    #[error("Failed to read domain list file '{path}': {source}")]
    ListFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read domains from standard input: {source}")]
    StdinRead {
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ----------------------------- Network ----------------------------------
    #[error("Failed to launch browser: {source}")]
    BrowserLaunch {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Navigation error during {operation} for '{url}': {source}")]
    Navigation {
        operation: String,
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ---------------------------- Extraction --------------------------------
    #[error("No /home/info link found in query page markup for '{domain}'")]
    LinkNotFound { domain: String },

    #[error("Detail page element '{selector}' not found")]
    MissingField { selector: String },

    #[error("Extracted href '{href}' does not resolve to a valid URL: {source}")]
    InvalidDetailUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },

    // ---------------------------- Internal ----------------------------------
    #[error("Failed to serialize result: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl IcpLookupError {
    /// Categorize the error for diagnostics.
    pub fn category(&self) -> ErrorCategory {
        use IcpLookupError::*;
        match self {
            ListFile { .. } | StdinRead { .. } | Configuration { .. } => ErrorCategory::Input,

            BrowserLaunch { .. } | Navigation { .. } => ErrorCategory::Network,

            LinkNotFound { .. } | MissingField { .. } | InvalidDetailUrl { .. } => {
                ErrorCategory::Extraction
            }

            Serialize { .. } | Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Recoverable errors drive the retry loop; fatal ones abort the run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Input)
    }

    // ---------------------------- Constructors -----------------------------

    pub fn list_file(path: impl Into<String>, source: io::Error) -> Self {
        Self::ListFile {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn browser_launch(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::BrowserLaunch {
            source: source.into(),
        }
    }

    pub fn navigation(
        operation: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Navigation {
            operation: operation.into(),
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn link_not_found(domain: impl Into<String>) -> Self {
        Self::LinkNotFound {
            domain: domain.into(),
        }
    }

    pub fn missing_field(selector: impl Into<String>) -> Self {
        Self::MissingField {
            selector: selector.into(),
        }
    }

    pub fn invalid_detail_url(href: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidDetailUrl {
            href: href.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Public result alias.
pub type Result<T> = std::result::Result<T, IcpLookupError>;

impl From<serde_json::Error> for IcpLookupError {
    fn from(e: serde_json::Error) -> Self {
        IcpLookupError::Serialize { source: e }
    }
}
