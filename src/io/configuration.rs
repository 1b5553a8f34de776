//! Constants and runtime configuration defaults

/// Suffix added to relabeled output filenames
pub const OUTPUT_SUFFIX: &str = "_relabeled";

/// Extension of label images accepted by the CLI
pub const LABEL_IMAGE_EXTENSION: &str = "png";

/// Group that receives recorded intermediates unless told otherwise
pub const DEFAULT_RECORDER_GROUP: &str = "debug";

// Guards against reference cycles inside a store
/// Maximum number of links followed while resolving a stored entry
pub const MAX_LINK_DEPTH: usize = 16;

/// Path separator for entries inside a store
pub const PATH_SEPARATOR: char = '/';

// Logging
/// Log directive used when `RUST_LOG` is unset and no `-v` was given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
