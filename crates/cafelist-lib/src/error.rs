use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the café list library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// The two query errors display the exact messages returned to clients, so
/// transports can forward `to_string()` verbatim.
#[derive(Debug, Error)]
pub enum Error {
    /// The `city` parameter was missing or is not a catalog key.
    #[error("unknown city")]
    UnknownCity {
        /// The requested city, if one was supplied.
        name: Option<String>,
        /// Known cities that look similar to the requested one.
        suggestions: Vec<String>,
    },

    /// The `count` parameter was present but is not a non-negative integer.
    #[error("incorrect count")]
    InvalidCount { value: String },

    /// Catalog file could not be located at the given path.
    #[error("catalog not found at {path}")]
    CatalogNotFound { path: PathBuf },

    /// Raised when catalog data fails validation.
    #[error("invalid catalog data: {message}")]
    CatalogValidation { message: String },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::UnknownCity`] without suggestions.
    pub fn unknown_city(name: Option<&str>) -> Self {
        Error::UnknownCity {
            name: name.map(str::to_string),
            suggestions: Vec::new(),
        }
    }

    /// Whether this error was caused by client input rather than the catalog.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UnknownCity { .. } | Error::InvalidCount { .. })
    }
}
