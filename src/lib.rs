//! Zero-copy strided views and cartesian broadcasting over n-dimensional arrays
//!
//! The view engine tiles and reshapes arrays by rewriting their stride
//! description, never copying the underlying buffer. The cartesian operator
//! builds on it to evaluate a binary operator over every pair of elements of
//! two arrays, and the label renumberer uses that to compact segmentation
//! label images to consecutive labels.

#![forbid(unsafe_code)]

/// Cartesian broadcast operator over two arrays
pub mod cartesian;
/// Input/output, persistence, logging and error handling
pub mod io;
/// Label image utilities
pub mod labels;
/// Strided view descriptor and the zero-copy view engine
pub mod view;

pub use io::error::{ArrayError, Result};
