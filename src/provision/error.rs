//! Step-level error types for provisioning operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by individual provisioning steps.
///
/// Variants map onto the failure taxonomy of the setup sequence: missing
/// prerequisites, external tool failures, and filesystem failures. Every
/// variant is terminal; there is no retry path.
#[derive(Error, Debug)]
pub enum Error {
    /// A required file or tool is not present before the step runs
    #[error("missing prerequisite: {what} not found at {}", path.display())]
    MissingPrerequisite {
        /// Human-readable name of the missing thing
        what: String,
        /// Path that was probed
        path: PathBuf,
    },

    /// An external command could not be spawned
    #[error("failed to execute {command}: {error}")]
    CommandFailed {
        /// Command line that failed to start
        command: String,
        /// Underlying spawn error
        error: std::io::Error,
    },

    /// An external command ran but exited non-zero
    #[error("{command} exited with status {}", code.map(|c| c.to_string()).unwrap_or_else(|| "signal".into()))]
    CommandStatus {
        /// Command line that failed
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// Importing into the JDK system trust store failed.
    ///
    /// Carries the manual remediation command so the caller can surface it
    /// before aborting (elevated privileges are the usual cause).
    #[error(
        "failed to update the JDK trust store (exit status {}).\n\
         Elevated privileges may be required. Run manually:\n\
         \n\
         sudo {remediation}",
        code.map(|c| c.to_string()).unwrap_or_else(|| "signal".into())
    )]
    JavaTrustStoreImport {
        /// Exit code of the failed keytool invocation
        code: Option<i32>,
        /// The exact keytool command to re-run with privileges
        remediation: String,
    },

    /// Filesystem operation failure with the operation and path
    #[error("error {operation} at {}: {source}", path.display())]
    Fs {
        /// What was being done
        operation: String,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// IO errors without richer context
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all with a preformatted message
    #[error("{0}")]
    GenericError(String),
}

/// Extension trait attaching an operation + path to raw IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the filesystem operation and path it concerns.
    fn fs_context(self, operation: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, operation: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            operation: operation.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Early-return with a formatted [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::provision::Error::GenericError(format!($($arg)*)).into())
    };
}
