//! Label image utilities

/// Compaction of label images to consecutive labels
pub mod renumber;

pub use renumber::{renumber_label_image, unique_nonzero_labels};
