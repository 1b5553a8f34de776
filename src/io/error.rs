//! Error types shared by the view engine, the collaborators and the CLI

use std::fmt;
use std::path::PathBuf;

/// Main error type for all array operations
#[derive(Debug)]
pub enum ArrayError {
    /// Malformed call parameters
    InvalidArgument {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A view's addressable range would leave its backing buffer
    ///
    /// Raised while the view is constructed, never while it is read.
    OutOfBounds {
        /// Offending linear offset (or the offset that overflowed)
        offset: isize,
        /// Length of the backing buffer
        len: usize,
    },

    /// A derived quantity does not fit the target integer type
    Overflow {
        /// What was being computed
        quantity: &'static str,
        /// The value that did not fit
        value: String,
        /// Largest representable value
        limit: String,
    },

    /// An empty array was handed to a collaborator that requires data
    EmptyPayload {
        /// Name under which the array was offered
        name: String,
    },

    /// Array memory cannot be described by one strided view over one slice
    Layout {
        /// Description of the layout problem
        reason: String,
    },

    /// Store entry already exists and overwriting was not requested
    ///
    /// Also raised when a path walks through an entry that is not a group.
    Conflict {
        /// Path of the conflicting entry
        path: String,
    },

    /// No store entry under the given path
    NotFound {
        /// Path that was looked up
        path: String,
    },

    /// Stored element type differs from the requested one
    TypeMismatch {
        /// Path of the entry
        path: String,
        /// Element type requested by the caller
        expected: &'static str,
        /// Element type actually stored
        found: &'static str,
    },

    /// Link chain exceeded the resolution limit
    LinkDepth {
        /// Path where resolution gave up
        path: String,
        /// Maximum number of links followed
        limit: usize,
    },

    /// Failed to load a label image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a label image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid argument '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfBounds { offset, len } => {
                write!(
                    f,
                    "View offset {offset} is outside of a buffer of length {len}"
                )
            }
            Self::Overflow {
                quantity,
                value,
                limit,
            } => {
                write!(f, "Overflow in {quantity}: {value} exceeds {limit}")
            }
            Self::EmptyPayload { name } => {
                write!(f, "The array provided under the name \"{name}\" is empty")
            }
            Self::Layout { reason } => {
                write!(f, "Unsupported array layout: {reason}")
            }
            Self::Conflict { path } => {
                write!(f, "Entry '{path}' already exists")
            }
            Self::NotFound { path } => {
                write!(f, "No entry named '{path}'")
            }
            Self::TypeMismatch {
                path,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Entry '{path}' holds {found} elements, requested {expected}"
                )
            }
            Self::LinkDepth { path, limit } => {
                write!(f, "Resolving '{path}' followed more than {limit} links")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ArrayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for array results
pub type Result<T> = std::result::Result<T, ArrayError>;

impl From<ndarray::ShapeError> for ArrayError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Layout {
            reason: err.to_string(),
        }
    }
}

impl From<image::ImageError> for ArrayError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ArrayError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid argument error
pub fn invalid_argument(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ArrayError {
    ArrayError::InvalidArgument {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an overflow error
pub fn overflow(quantity: &'static str, value: &impl ToString, limit: &impl ToString) -> ArrayError {
    ArrayError::Overflow {
        quantity,
        value: value.to_string(),
        limit: limit.to_string(),
    }
}

/// Create a layout error
pub fn layout_error(reason: &impl ToString) -> ArrayError {
    ArrayError::Layout {
        reason: reason.to_string(),
    }
}
