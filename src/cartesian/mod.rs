//! Cartesian broadcast operator

/// Binary element operators and elementwise application over views
pub mod ops;
/// Operators applied across the cartesian product of two index spaces
pub mod permutations;

pub use ops::{Addition, Equal, Multiplication, PairOp, Subtraction};
pub use permutations::{all_permutations_equal, all_permutations_operation};
