use thiserror::Error;

macro_rules! bootstrap_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Bootstrap {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Bootstrap {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Absence of a symbol is deliberately *not* an error anywhere in this library: lookups that
/// find nothing return `Ok(None)` and the caller decides whether that is fatal. The variants
/// below cover the conditions that genuinely cannot be expressed as absence.
///
/// # Error Categories
///
/// ## Initialization
/// - [`Error::Bootstrap`] - The provider's root namespace or a hand-built base symbol is missing
///
/// ## Runtime Interop
/// - [`Error::CastFailed`] - A native cast was rejected by the runtime
/// - [`Error::MemberNotFound`] - A member required for a runtime operation does not exist
///
/// ## Internal Limits
/// - [`Error::RecursionLimit`] - Maximum inheritance recursion depth exceeded
/// - [`Error::LockError`] - A category state lock was poisoned
///
/// # Examples
///
/// ```rust
/// use introscope::{Error, Repository};
/// use introscope::metadata::provider::MemoryProvider;
/// use std::sync::Arc;
///
/// let provider = Arc::new(MemoryProvider::new());
/// match Repository::bootstrap(provider, "Core", &["Object"]) {
///     Ok(_) => println!("repository ready"),
///     Err(Error::Bootstrap { message, file, line }) => {
///         eprintln!("broken provider: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A bootstrap-time invariant was violated.
    ///
    /// The provider's root namespace descriptor or one of the hand-built base
    /// compounds could not be located. This indicates a broken provider, not a
    /// transient condition, and aborts initialization. The error includes the
    /// source location where the violation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the missing descriptor
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Bootstrap - {file}:{line}: {message}")]
    Bootstrap {
        /// The message to be printed for the Bootstrap error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A native cast was rejected by the runtime.
    ///
    /// This is the one recoverable interop error the design requires to be
    /// descriptive: it names both the source value and the target type so the
    /// embedding layer can surface a meaningful message.
    #[error("Cannot cast {value} to {target}")]
    CastFailed {
        /// Debug rendering of the value that failed to cast
        value: String,
        /// Qualified name of the target compound
        target: String,
    },

    /// A member required for a runtime operation does not exist.
    ///
    /// Produced by operations such as signal connection, where absence of the
    /// named member cannot be handled by the library itself.
    #[error("No member `{name}` on {container}")]
    MemberNotFound {
        /// Qualified name of the compound that was searched
        container: String,
        /// The member name that could not be resolved
        name: String,
    },

    /// Recursion limit reached.
    ///
    /// The inheritance resolver caps traversal depth to protect against stack
    /// overflow on pathological inheritance graphs. The associated value shows
    /// the limit that was reached.
    #[error("Reached the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// Failed to lock target.
    ///
    /// A category's internal state lock was poisoned by a panic on another
    /// thread.
    #[error("Failed to lock target")]
    LockError,

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
