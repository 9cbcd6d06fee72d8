use std::path::PathBuf;

/// Errors that can occur while recording documentation.
///
/// Only failures that would lose a captured example are reported: a missing or
/// malformed documentation file is never an error, the corpus simply starts empty.
///
/// # Example
///
/// ```rust,no_run
/// use apidocs_core::{DocsError, persist};
///
/// # fn example(store: &apidocs_core::DocumentStore) {
/// match persist::write("/read-only/users.yml".as_ref(), store) {
///     Ok(()) => {}
///     Err(DocsError::WriteFailure { path, source }) => {
///         panic!("cannot write {path:?}: {source}");
///     }
///     Err(err) => panic!("{err}"),
/// }
/// # }
/// ```
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum DocsError {
    /// Creating the documentation directory or writing a file failed.
    ///
    /// The previous version of the file, if any, is left untouched.
    #[display("Failed to write documentation at {path:?}: {source}")]
    WriteFailure {
        /// The file or directory that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// YAML serialization failed.
    #[display("YAML serialization error: {error}")]
    YamlError {
        /// Detailed error message from the YAML serializer.
        error: String,
    },

    /// The test driver could not perform the call.
    #[display("Test driver error: {error}")]
    Driver {
        /// The error reported by the driver.
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}
