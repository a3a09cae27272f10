//! Error types for visibility filtering

use std::error::Error;
use std::fmt;

/// Boxed error type for error sources
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Result type alias for veil operations
pub type Result<T> = std::result::Result<T, VeilError>;

/// Filtering error with rich diagnostics
///
/// Only two families exist: caller contract violations (an unknown content type, or
/// items that don't match the requested type) and failures at the configuration surface
/// (bad level strings, unreadable scenario files). Missing optional data is never an error.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub struct VeilError {
    kind: VeilErrorKind,
    #[source]
    source: Option<BoxError>,
    #[help]
    help: Option<String>,
    context: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VeilErrorKind {
    /// Content type outside the supported set
    UnsupportedType,
    /// Items supplied don't have the shape of the requested content type
    MismatchedItems,
    /// Browsing level or tier name couldn't be parsed
    InvalidLevel,
    /// Scenario document was malformed
    Scenario,
    /// I/O error
    Io,
}

impl VeilError {
    /// Create a new error with the given kind and optional source
    pub fn new(kind: VeilErrorKind, source: Option<BoxError>) -> Self {
        Self {
            kind,
            source,
            help: None,
            context: None,
        }
    }

    /// Add a help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add context information to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> &VeilErrorKind {
        &self.kind
    }

    /// Create an unsupported content type error
    pub fn unsupported_type(name: impl fmt::Display) -> Self {
        Self::new(VeilErrorKind::UnsupportedType, None)
            .with_context(format!("content type: {}", name))
            .with_help(
                "expected one of models, images, articles, users, collections, bounties, posts, tags",
            )
    }

    /// Create an error for items that don't match the requested content type
    pub fn mismatched_items(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::new(VeilErrorKind::MismatchedItems, None)
            .with_context(format!("expected {} items, found {}", expected, found))
    }

    /// Create an invalid browsing level error
    pub fn invalid_level(input: impl Into<String>) -> Self {
        Self::new(VeilErrorKind::InvalidLevel, None)
            .with_context(format!("level: {:?}", input.into()))
            .with_help("use an integer mask or tier names like pg|pg13|r|x|xxx")
    }

    /// Create a scenario parse error
    pub fn scenario(source: impl Error + Send + Sync + 'static) -> Self {
        Self::new(VeilErrorKind::Scenario, Some(Box::new(source)))
    }

    /// Create an I/O error
    pub fn io(source: impl Error + Send + Sync + 'static) -> Self {
        Self::new(VeilErrorKind::Io, Some(Box::new(source)))
    }
}

impl fmt::Display for VeilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;

        if let Some(ctx) = &self.context {
            write!(f, ": {}", ctx)?;
        }

        if let Some(src) = &self.source {
            write!(f, ": {}", src)?;
        }

        Ok(())
    }
}
