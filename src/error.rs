//! Error handling for tmplcopy.
//! Defines the error type and result alias used throughout the crate.

use std::path::PathBuf;
use thiserror::Error;

/// All failures that can abort a copy run.
///
/// Every variant is fatal: there is no retry and no partial output for the
/// file being processed when the error occurred.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Serializing a value for the `json` modifier failed
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// The data file could not be parsed. The parser message is kept verbatim.
    #[error("Failed to parse data file '{}': {message}", path.display())]
    DataParseError { path: PathBuf, message: String },

    /// Neither a fallback nor a default could produce a value.
    #[error("Unable to resolve '{fallbacks}' in '{}'.", file.display())]
    UnresolvedExpression { fallbacks: String, file: PathBuf },

    /// A `@path@` variable inside a default value is missing or not a string or number.
    #[error(
        "Variable '{variable}' in default of '{expression}' is not a string or number in '{}'.",
        file.display()
    )]
    InvalidDefaultVariable {
        variable: String,
        expression: String,
        file: PathBuf,
    },

    /// A template file is not valid UTF-8 text.
    #[error("Template '{}' is not valid UTF-8.", path.display())]
    InvalidTemplateEncoding { path: PathBuf },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::IoError(err.into())
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
