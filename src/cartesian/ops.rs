//! Binary element operators and their elementwise application
//!
//! [`PairOp`] is the capability handed to the cartesian operator: anything
//! that maps a pair of elements to a result. Closures implement it directly;
//! the unit structs below are the common cases, resolved at compile time.

use ndarray::{ArrayD, IxDyn};

use crate::io::error::{Result, invalid_argument};
use crate::view::StridedView;

/// Binary operator applied to one element of each operand
pub trait PairOp<A, B> {
    /// Result element type
    type Output;

    /// Combine one element of each operand
    fn apply(&self, lhs: &A, rhs: &B) -> Self::Output;
}

impl<A, B, O, F> PairOp<A, B> for F
where
    F: Fn(&A, &B) -> O,
{
    type Output = O;

    fn apply(&self, lhs: &A, rhs: &B) -> O {
        self(lhs, rhs)
    }
}

/// Equality comparison producing booleans
#[derive(Debug, Clone, Copy, Default)]
pub struct Equal;

impl<A, B> PairOp<A, B> for Equal
where
    A: PartialEq<B>,
{
    type Output = bool;

    fn apply(&self, lhs: &A, rhs: &B) -> bool {
        lhs == rhs
    }
}

macro_rules! arithmetic_op {
    ($name:ident, $trait:ident, $method:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl<A, B> PairOp<A, B> for $name
        where
            A: Clone + std::ops::$trait<B>,
            B: Clone,
        {
            type Output = <A as std::ops::$trait<B>>::Output;

            fn apply(&self, lhs: &A, rhs: &B) -> Self::Output {
                std::ops::$trait::$method(lhs.clone(), rhs.clone())
            }
        }
    };
}

arithmetic_op!(Addition, Add, add, "Elementwise `lhs + rhs`");
arithmetic_op!(Subtraction, Sub, sub, "Elementwise `lhs - rhs`");
arithmetic_op!(Multiplication, Mul, mul, "Elementwise `lhs * rhs`");

/// Apply `op` to the elements of two same-shaped views and materialize
///
/// Elements are paired in row-major logical order, so broadcast axes read
/// their single element repeatedly.
///
/// # Errors
///
/// Returns `InvalidArgument` if the shapes differ.
pub fn zip_map<A, B, Op>(
    lhs: &StridedView<'_, A>,
    rhs: &StridedView<'_, B>,
    op: &Op,
) -> Result<ArrayD<Op::Output>>
where
    Op: PairOp<A, B>,
{
    if lhs.dims() != rhs.dims() {
        return Err(invalid_argument(
            "rhs",
            &format!("{:?}", rhs.dims()),
            &format!("shape must match {:?}", lhs.dims()),
        ));
    }

    let elements: Vec<Op::Output> = lhs
        .iter()
        .zip(rhs.iter())
        .map(|(a, b)| op.apply(a, b))
        .collect();
    Ok(ArrayD::from_shape_vec(IxDyn(lhs.dims()), elements)?)
}
