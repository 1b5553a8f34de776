//! Strided view descriptor and the zero-copy view engine
//!
//! Views describe how to read an array (shape, step sizes, base offset)
//! without owning its storage. The engine derives new views from existing
//! ones by rewriting that description only.

/// View descriptor, bounds validation and element iteration
pub mod descriptor;
/// Tiling and axis insertion over existing buffers
pub mod engine;

pub use descriptor::{AsStridedView, StridedView};
pub use engine::{
    Reps, add_singleton_axis_beginning, add_singleton_axis_end, add_singleton_axis_pos,
    expand_view,
};
