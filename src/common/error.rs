//! Error types for document building and serialization.
use thiserror::Error;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for document operations.
///
/// Serialization is all-or-nothing: the first error aborts the pass and no
/// partial output is produced. Builder misuse (`Structural`) is raised at
/// the call site, not deferred to serialization.
#[derive(Error, Debug)]
pub enum Error {
    /// A declared property's value failed kind validation
    #[error("invalid value for \"{property}\" on {element}: {message}")]
    InvalidPropertyValue {
        /// Element kind the property was declared on
        element: &'static str,
        /// Property name as declared by the caller
        property: String,
        /// What was wrong, including the received value
        message: String,
    },

    /// A builder call was invoked in a cursor mode that forbids it
    #[error("structural error: {0}")]
    Structural(String),

    /// Image metadata could not be read
    #[error("image metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// A measurement input was not a finite number
    #[error("invalid unit value: {0}")]
    InvalidUnit(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
